//! Search error types.
//!
//! This module defines the error types that can occur during search engine operations.

use thiserror::Error;

/// Errors that can occur during search engine operations.
#[derive(Error, Debug, Clone)]
pub enum SearchError {
    /// Failed to establish connection to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to index a single document.
    #[error("Index error: {0}")]
    IndexError(String),

    /// Bulk indexing operation had failures.
    #[error("Bulk index error: {0}")]
    BulkIndexError(String),

    /// Failed to delete a document.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// The index targeted by a delete does not exist.
    #[error("Index not found: {0}")]
    IndexNotFound(String),

    /// Failed to delete an index for a reason other than absence.
    #[error("Index deletion error: {0}")]
    IndexDeletionError(String),

    /// Failed to parse response from search engine.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SearchError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create a bulk index error.
    pub fn bulk_index(msg: impl Into<String>) -> Self {
        Self::BulkIndexError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create an index not found error.
    pub fn index_not_found(index: impl Into<String>) -> Self {
        Self::IndexNotFound(index.into())
    }

    /// Create an index deletion error.
    pub fn index_deletion(msg: impl Into<String>) -> Self {
        Self::IndexDeletionError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Whether this is the distinguished "index absent" outcome of a delete.
    pub fn is_index_not_found(&self) -> bool {
        matches!(self, Self::IndexNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SearchError::index_not_found("main");
        assert_eq!(err.to_string(), "Index not found: main");

        let err = SearchError::bulk_index("3 items failed");
        assert_eq!(err.to_string(), "Bulk index error: 3 items failed");
    }

    #[test]
    fn test_is_index_not_found() {
        assert!(SearchError::index_not_found("main").is_index_not_found());
        assert!(!SearchError::index_deletion("forbidden").is_index_not_found());
    }
}
