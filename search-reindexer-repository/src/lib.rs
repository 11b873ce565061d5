//! # Search Reindexer Repository
//!
//! This crate provides the traits the reindexer consumes from its external
//! collaborators (search engine, primary record store, field-definition
//! source) together with concrete implementations: OpenSearch for the
//! search engine, and a JSON directory for records and field definitions.

pub mod errors;
pub mod interfaces;
pub mod json;
pub mod opensearch;

pub use errors::{SearchError, StoreError};
pub use interfaces::{FieldDefinition, IndexTarget, RecordStore, SchemaSource, SearchEngineClient};
pub use json::{JsonRecordStore, JsonSchemaSource};
pub use opensearch::OpenSearchClient;
