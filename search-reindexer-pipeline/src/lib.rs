//! # Search Reindexer Pipeline
//!
//! This crate provides the pipeline components for rebuilding the search
//! index from the primary record store.
//!
//! ## Architecture
//!
//! A full reindex runs through the following components:
//!
//! 1. **Schema**: Resolves which fields of a collection are indexable
//! 2. **Projector**: Transforms records into search documents
//! 3. **Loader**: Submits documents to the search engine in batches
//! 4. **Orchestrator**: Drops the index and drives every collection through the loader
//!
//! The **single record** indexer keeps the index current between full runs.

/// Emit a progress line at info level when reporting is enabled, debug otherwise.
macro_rules! progress {
    ($enabled:expr, $($arg:tt)+) => {
        if $enabled {
            ::tracing::info!($($arg)+)
        } else {
            ::tracing::debug!($($arg)+)
        }
    };
}

pub mod config;
pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod projector;
pub mod schema;
pub mod shutdown;
pub mod single_record;

#[cfg(test)]
mod test_support;

pub use config::{FailurePolicy, ProjectionStrategy, RetryConfig, RunConfig};
pub use errors::PipelineError;
pub use loader::{BatchIndexer, CollectionReport};
pub use orchestrator::{ReindexOrchestrator, RunSummary};
pub use projector::{FieldProjector, Projection};
pub use schema::{SchemaResolver, SearchDefsResolver};
pub use shutdown::ShutdownSignal;
pub use single_record::SingleRecordIndexer;
