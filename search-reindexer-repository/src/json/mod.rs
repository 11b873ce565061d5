//! JSON directory implementations of the record store and schema source.
//!
//! A data directory holds one file per collection:
//!
//! ```text
//! <data_dir>/records/<Collection>.json     array of record objects, each with an "id"
//! <data_dir>/searchdefs/<Collection>.json  object of field name -> field definition
//! ```

mod record_store;
mod schema_source;

pub use record_store::JsonRecordStore;
pub use schema_source::JsonSchemaSource;

use std::io::ErrorKind;
use std::path::Path;

use crate::errors::StoreError;

/// Read a collection file, treating a missing file as absent.
async fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Io(e)),
    }
}
