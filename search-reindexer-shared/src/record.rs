//! Records as read from the primary data store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the attribute carrying a record's identifier.
pub const ID_ATTRIBUTE: &str = "id";

/// A single entity owned by the primary data store.
///
/// The reindexer only ever reads records. Attributes hold arbitrary JSON
/// values (strings, scalars or composite objects), keyed by attribute name
/// in the order the store produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stable identifier of the record within its collection.
    pub id: String,
    /// Name of the collection the record belongs to.
    pub collection: String,
    /// Named attributes of the record.
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl Record {
    /// Create a record with no attributes.
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            collection: collection.into(),
            attributes: Map::new(),
        }
    }

    /// Set an attribute value.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Read a named attribute.
    ///
    /// Returns `None` when the attribute does not exist or is `null`; a null
    /// attribute is "not set" as far as indexing is concerned.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name).filter(|value| !value.is_null())
    }

    /// Snapshot of every attribute of the record.
    pub fn snapshot(&self) -> Map<String, Value> {
        self.attributes.clone()
    }
}
