//! Orchestrator module for the search reindexer pipeline.
//!
//! Coordinates a full drop-and-rebuild of the search index.

mod summary;

pub use summary::{estimate_seconds, CollectionFailure, RunCounters, RunSummary};

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{error, info, instrument, warn};

use crate::config::{FailurePolicy, RunConfig};
use crate::errors::PipelineError;
use crate::loader::{BatchIndexer, CollectionReport};
use crate::projector::Projection;
use crate::shutdown::ShutdownSignal;
use search_reindexer_repository::{RecordStore, SearchEngineClient};

/// Orchestrator that rebuilds the search index from the record store.
///
/// The orchestrator:
/// - Drops the existing index (a missing index is not an error)
/// - Indexes every configured collection, in order, one at a time
/// - Applies the configured failure policy when a collection fails
/// - Reports counters, timing and a throughput estimate
pub struct ReindexOrchestrator {
    client: Arc<dyn SearchEngineClient>,
    store: Arc<dyn RecordStore>,
    projection: Projection,
    loader: BatchIndexer,
    config: RunConfig,
    shutdown_tx: broadcast::Sender<()>,
    shutdown: ShutdownSignal,
}

impl ReindexOrchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(
        client: Arc<dyn SearchEngineClient>,
        store: Arc<dyn RecordStore>,
        projection: Projection,
        config: RunConfig,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let loader = BatchIndexer::new(client.clone(), config.clone());

        Self {
            client,
            store,
            projection,
            loader,
            config,
            shutdown_tx,
            shutdown: ShutdownSignal::new(shutdown_rx),
        }
    }

    /// Handle for requesting a shutdown from another task.
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Request a shutdown; the run stops at the next batch or collection boundary.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Run a full reindex.
    ///
    /// Collections are indexed sequentially; every bulk submission completes
    /// before the next one starts.
    #[instrument(skip(self), fields(index = %self.config.index_name, strategy = %self.projection.strategy()))]
    pub async fn run(&mut self) -> Result<RunSummary, PipelineError> {
        info!("Starting indexing procedures");

        self.drop_index().await?;

        let started_at = Utc::now();
        let start = Instant::now();
        let mut counters = RunCounters::default();

        for collection in self.config.collections.clone() {
            if self.shutdown.is_triggered() {
                warn!(
                    records_indexed = counters.records_indexed,
                    collections = counters.collections_processed,
                    "Shutdown requested, stopping reindex"
                );
                return Err(PipelineError::Cancelled);
            }

            let mut report = CollectionReport::new(&collection);
            let result = self.index_collection(&mut report).await;
            counters.record_submitted(&report);

            match result {
                Ok(()) => {
                    counters.record_completed();
                    progress!(
                        self.config.report_progress,
                        collection = %collection,
                        records = report.records,
                        "Indexed collection"
                    );
                }
                Err(PipelineError::Cancelled) => {
                    warn!(
                        collection = %collection,
                        records_indexed = counters.records_indexed,
                        "Shutdown requested, stopping reindex"
                    );
                    return Err(PipelineError::Cancelled);
                }
                Err(e) => match self.config.failure_policy {
                    FailurePolicy::FailFast => {
                        error!(
                            collection = %collection,
                            error = %e,
                            records_indexed = counters.records_indexed,
                            collections = counters.collections_processed,
                            "Reindex aborted"
                        );
                        return Err(PipelineError::RunAborted {
                            collection,
                            records_indexed: counters.records_indexed,
                            collections_processed: counters.collections_processed,
                            source: Box::new(e),
                        });
                    }
                    FailurePolicy::BestEffort => {
                        error!(
                            collection = %collection,
                            error = %e,
                            "Collection failed, continuing with the next one"
                        );
                        counters.record_failure(&collection, &e);
                    }
                },
            }
        }

        let summary = RunSummary {
            counters,
            elapsed: start.elapsed(),
            started_at,
            finished_at: Utc::now(),
        };
        self.report(&summary);

        Ok(summary)
    }

    /// Delete the existing index; a missing index counts as deleted.
    async fn drop_index(&self) -> Result<(), PipelineError> {
        let target = self.config.drop_target();

        match self.client.delete_index(&target).await {
            Ok(()) => {
                info!(target = %target, "Deleted existing index");
                Ok(())
            }
            Err(e) if e.is_index_not_found() => {
                info!(target = %target, "Index not found, no index has been deleted");
                Ok(())
            }
            Err(e) => {
                error!(target = %target, error = %e, "Failed to delete existing index");
                Err(e.into())
            }
        }
    }

    async fn index_collection(&mut self, report: &mut CollectionReport) -> Result<(), PipelineError> {
        let records = self.store.enumerate_all(&report.collection).await?;
        let projector = self.projection.projector_for(&report.collection).await?;

        self.loader
            .index_collection(records, projector.as_ref(), report, &mut self.shutdown)
            .await
    }

    fn report(&self, summary: &RunSummary) {
        let counters = &summary.counters;

        info!(
            collections = counters.collections_processed,
            records = counters.records_indexed,
            batches = counters.batches_submitted,
            elapsed_secs = format!("{:.3}", summary.elapsed.as_secs_f64()),
            "Done! Reindex complete"
        );

        for failure in &counters.failed_collections {
            warn!(collection = %failure.collection, error = %failure.error, "Collection was not indexed");
        }

        let reference = self.config.throughput_reference;
        match summary.estimated_seconds_for(reference) {
            Some(seconds) => progress!(
                self.config.report_progress,
                reference = reference,
                estimated_secs = format!("{:.0}", seconds),
                estimated_mins = format!("{:.0}", seconds / 60.0),
                "Estimated time for reference record count, assuming linear expansion"
            ),
            None => progress!(
                self.config.report_progress,
                "No records indexed, throughput estimate unavailable"
            ),
        }
    }
}
