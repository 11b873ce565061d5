//! Record store and schema source error types.

use thiserror::Error;

/// Errors raised while reading records or field definitions.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The underlying storage could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored content could not be decoded.
    #[error("Parse error in {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// A stored record is malformed (e.g. has no identifier).
    #[error("Invalid record in {collection}: {message}")]
    InvalidRecord { collection: String, message: String },
}

impl StoreError {
    /// Create a parse error.
    pub fn parse(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid record error.
    pub fn invalid_record(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            collection: collection.into(),
            message: message.into(),
        }
    }
}
