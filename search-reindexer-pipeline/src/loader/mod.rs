//! Loader module for the search reindexer pipeline.
//!
//! Batches projected documents into bulk submissions to the search index.

mod retry;

use std::sync::Arc;
use tracing::{debug, error, instrument};

use crate::config::RunConfig;
use crate::errors::PipelineError;
use crate::projector::FieldProjector;
use crate::shutdown::ShutdownSignal;
use search_reindexer_repository::SearchEngineClient;
use search_reindexer_shared::{BulkOperation, DocumentAddress, Record};

/// Outcome of indexing one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionReport {
    /// Name of the collection.
    pub collection: String,
    /// Records submitted to the index.
    pub records: u64,
    /// Bulk submissions made.
    pub batches: usize,
}

impl CollectionReport {
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            ..Default::default()
        }
    }
}

/// Loader that writes documents into the search engine in fixed-size batches.
///
/// The loader is responsible for:
/// - Addressing and projecting every record of a collection
/// - Flushing the buffer whenever it reaches the configured batch size
/// - Flushing the trailing partial batch at the end of the collection
/// - Retrying bulk submissions according to the run's retry policy
pub struct BatchIndexer {
    client: Arc<dyn SearchEngineClient>,
    config: RunConfig,
    pending: Vec<BulkOperation>,
}

impl BatchIndexer {
    /// Create a new batch indexer with the given client and run configuration.
    pub fn new(client: Arc<dyn SearchEngineClient>, config: RunConfig) -> Self {
        let batch_size = config.batch_size.max(1);
        Self {
            client,
            config,
            pending: Vec::with_capacity(batch_size),
        }
    }

    fn batch_size(&self) -> usize {
        self.config.batch_size.max(1)
    }

    /// Index every record of a collection.
    ///
    /// Records are submitted in enumeration order; each lands in exactly one
    /// bulk submission. `report` is updated after every successful
    /// submission, so it holds what reached the index even when a later
    /// batch fails. The shutdown signal is checked before each batch after
    /// the first; a collection whose last batch was submitted completes.
    #[instrument(
        skip(self, records, projector, report, shutdown),
        fields(collection = %report.collection, record_count = records.len())
    )]
    pub async fn index_collection(
        &mut self,
        records: Vec<Record>,
        projector: &dyn FieldProjector,
        report: &mut CollectionReport,
        shutdown: &mut ShutdownSignal,
    ) -> Result<(), PipelineError> {
        self.pending.clear();
        let total = records.len();

        for (position, record) in records.iter().enumerate() {
            let address = DocumentAddress::for_record(&self.config.index_name, record);
            let document = projector.project(record);
            self.pending.push(BulkOperation::new(address, document));

            if self.pending.len() >= self.batch_size() {
                self.flush(report).await?;

                if position + 1 < total && shutdown.is_triggered() {
                    return Err(PipelineError::Cancelled);
                }
            }
        }

        // Send the trailing partial batch
        self.flush(report).await?;

        Ok(())
    }

    /// Submit the pending buffer as one bulk write and clear it.
    async fn flush(&mut self, report: &mut CollectionReport) -> Result<(), PipelineError> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let count = self.pending.len();
        debug!(count = count, "Flushing documents to search index");

        let result = self.bulk_write_with_retry(&self.pending).await;
        self.pending.clear();

        match result {
            Ok(()) => {
                report.records += count as u64;
                report.batches += 1;
                progress!(
                    self.config.report_progress,
                    collection = %report.collection,
                    batch = report.batches,
                    submitted = report.records,
                    "Batch submitted"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    collection = %report.collection,
                    error = %e,
                    count = count,
                    "Failed to submit batch"
                );
                Err(PipelineError::SearchError(e))
            }
        }
    }
}
