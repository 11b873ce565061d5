//! Interface definitions for the reindexer's external collaborators.
//!
//! This module defines the abstract traits that allow for dependency
//! injection and swappable backends: the search engine, the primary record
//! store and the field-definition source.

mod record_store;
mod schema_source;
mod search_engine_client;

pub use record_store::RecordStore;
pub use schema_source::{FieldDefinition, SchemaSource};
pub use search_engine_client::{IndexTarget, SearchEngineClient};
