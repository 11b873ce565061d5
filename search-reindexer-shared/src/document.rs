//! Indexable documents and their addressing metadata.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::record::Record;

/// The projected, indexable representation of a record.
///
/// A document never carries the record identifier as a body field; the
/// identifier travels separately in the [`DocumentAddress`].
pub type Document = Map<String, Value>;

/// Where a document lives in the search engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentAddress {
    /// Name of the target index.
    pub index: String,
    /// Collection (search "type") the record belongs to.
    pub collection: String,
    /// Identifier of the record.
    pub id: String,
}

impl DocumentAddress {
    /// Create an address from its parts.
    pub fn new(
        index: impl Into<String>,
        collection: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            index: index.into(),
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Address of a record inside the given index.
    pub fn for_record(index: &str, record: &Record) -> Self {
        Self::new(index, record.collection.as_str(), record.id.as_str())
    }

    /// Engine-level document ID.
    ///
    /// Uses format: `{collection}_{id}` so identical IDs in different
    /// collections never collide within one index.
    pub fn document_id(&self) -> String {
        format!("{}_{}", self.collection, self.id)
    }
}

/// One entry of a bulk request: a document and the address it is written to.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkOperation {
    pub address: DocumentAddress,
    pub document: Document,
}

impl BulkOperation {
    pub fn new(address: DocumentAddress, document: Document) -> Self {
        Self { address, document }
    }
}
