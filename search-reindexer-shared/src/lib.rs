//! # Search Reindexer Shared
//!
//! Data model shared by every crate of the search reindexer: records read
//! from the primary store, the documents projected from them, the address
//! a document is written to, and the resolved field specification used by
//! schema-driven projection.

mod document;
mod field_spec;
mod record;

pub use document::{BulkOperation, Document, DocumentAddress};
pub use field_spec::{FieldBinding, FieldSpec};
pub use record::{Record, ID_ATTRIBUTE};
