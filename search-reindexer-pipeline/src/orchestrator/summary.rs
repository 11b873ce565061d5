//! Run counters and the end-of-run summary.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::loader::CollectionReport;

/// A collection that failed under the best-effort policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionFailure {
    pub collection: String,
    pub error: String,
}

/// Counters mutated by the orchestrator during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunCounters {
    /// Total records indexed across all collections.
    pub records_indexed: u64,
    /// Collections indexed to completion.
    pub collections_processed: usize,
    /// Bulk submissions made.
    pub batches_submitted: usize,
    /// Collections skipped after a failure.
    pub failed_collections: Vec<CollectionFailure>,
}

impl RunCounters {
    /// Add what a collection submitted, whether or not it completed.
    pub(crate) fn record_submitted(&mut self, report: &CollectionReport) {
        self.records_indexed += report.records;
        self.batches_submitted += report.batches;
    }

    pub(crate) fn record_completed(&mut self) {
        self.collections_processed += 1;
    }

    pub(crate) fn record_failure(&mut self, collection: &str, error: impl ToString) {
        self.failed_collections.push(CollectionFailure {
            collection: collection.to_string(),
            error: error.to_string(),
        });
    }
}

/// Result of a completed reindex run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub counters: RunCounters,
    /// Wall-clock time spent indexing, excluding the initial index drop.
    pub elapsed: Duration,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    /// Whether every collection was indexed.
    pub fn is_complete(&self) -> bool {
        self.counters.failed_collections.is_empty()
    }

    /// Linear projection of how long `reference` records would take.
    pub fn estimated_seconds_for(&self, reference: u64) -> Option<f64> {
        estimate_seconds(self.elapsed, self.counters.records_indexed, reference)
    }
}

/// `elapsed * reference / total_indexed`, or `None` when nothing was indexed.
pub fn estimate_seconds(elapsed: Duration, total_indexed: u64, reference: u64) -> Option<f64> {
    if total_indexed == 0 {
        return None;
    }
    Some(elapsed.as_secs_f64() * reference as f64 / total_indexed as f64)
}
