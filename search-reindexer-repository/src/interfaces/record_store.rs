//! Primary record store trait definition.

use async_trait::async_trait;

use crate::errors::StoreError;
use search_reindexer_shared::Record;

/// Read access to the primary data store.
///
/// The reindexer never writes through this interface.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Enumerate every record of a collection, in the store's natural order.
    ///
    /// An unknown collection yields an empty list.
    async fn enumerate_all(&self, collection: &str) -> Result<Vec<Record>, StoreError>;

    /// Fetch a single record by identifier.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(record))` - If the record exists
    /// * `Ok(None)` - If no record has that identifier
    /// * `Err(StoreError)` - If the store cannot be read
    async fn fetch(&self, collection: &str, id: &str) -> Result<Option<Record>, StoreError>;
}
