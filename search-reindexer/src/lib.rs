//! # Search Reindexer
//!
//! Entry point and configuration for the search reindexer.
//!
//! This crate wires the OpenSearch client and the JSON-directory record
//! store into the reindex pipeline.

pub mod config;

pub use config::{Dependencies, LogFormat, Settings};

use thiserror::Error;

/// Errors that can occur during reindexer initialization or execution.
#[derive(Error, Debug)]
pub enum ReindexerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] search_reindexer_pipeline::PipelineError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] search_reindexer_repository::SearchError),

    /// Record store error.
    #[error("Store error: {0}")]
    StoreError(#[from] search_reindexer_repository::StoreError),

    /// The requested record does not exist.
    #[error("Record not found: {collection}/{id}")]
    RecordNotFound { collection: String, id: String },
}

impl ReindexerError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a record-not-found error.
    pub fn record_not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::RecordNotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }
}
