//! Error types for the search reindexer pipeline.

use search_reindexer_repository::{SearchError, StoreError};
use thiserror::Error;

/// Errors that can occur in the search reindexer pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Error from the search engine.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),

    /// Error from the record store or the schema source.
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// A collection failed and the run was aborted.
    #[error(
        "Reindex aborted in {collection} after {records_indexed} records \
         in {collections_processed} collections: {source}"
    )]
    RunAborted {
        collection: String,
        records_indexed: u64,
        collections_processed: usize,
        #[source]
        source: Box<PipelineError>,
    },

    /// The run was cancelled by a shutdown signal.
    #[error("Reindex cancelled")]
    Cancelled,
}
