//! Search engine client trait definition.
//!
//! This module defines the abstract interface for search engine operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use std::fmt;

use async_trait::async_trait;

use crate::errors::SearchError;
use search_reindexer_shared::{BulkOperation, Document, DocumentAddress};

/// Which index (or indices) an index deletion targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexTarget {
    /// A single named index.
    Named(String),
    /// Every index in the cluster (`_all`).
    All,
}

impl IndexTarget {
    /// Create a target for a named index.
    pub fn named(index: impl Into<String>) -> Self {
        Self::Named(index.into())
    }

    /// The index expression sent to the engine.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::All => "_all",
        }
    }
}

impl fmt::Display for IndexTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstract interface for search engine operations.
///
/// This trait defines all the operations the reindexer performs against a
/// search engine. Implementations can be swapped for different backends
/// (OpenSearch, mock, etc.) enabling easy testing and potential future
/// migrations.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, SearchError>` for consistent error handling.
/// Every call is a single round trip; implementations do not retry.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Delete an index, or every index.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was deleted
    /// * `Err(SearchError::IndexNotFound)` - If the index does not exist
    /// * `Err(SearchError)` - If the deletion fails for any other reason
    async fn delete_index(&self, target: &IndexTarget) -> Result<(), SearchError>;

    /// Write multiple documents in a single bulk submission.
    ///
    /// Operations are applied in slice order.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If every document was written
    /// * `Err(SearchError::BulkIndexError)` - If any document failed to be written
    async fn bulk_write(&self, operations: &[BulkOperation]) -> Result<(), SearchError>;

    /// Index a single document at the given address.
    ///
    /// If a document already exists at the address, it will be replaced.
    async fn index_document(
        &self,
        address: &DocumentAddress,
        document: &Document,
    ) -> Result<(), SearchError>;

    /// Delete the document at the given address.
    async fn delete_document(&self, address: &DocumentAddress) -> Result<(), SearchError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the search engine is healthy
    /// * `Ok(false)` - If the search engine is unhealthy
    /// * `Err(SearchError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchError>;
}
