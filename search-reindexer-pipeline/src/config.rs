//! Run configuration shared by every pipeline component.
//!
//! A [`RunConfig`] is built once, before anything touches the search engine,
//! and handed to the orchestrator, the loader and the single-record indexer.
//! Nothing mutates it afterwards.

use std::fmt;

use search_reindexer_repository::IndexTarget;

/// Default name of the search index.
pub const DEFAULT_INDEX_NAME: &str = "main";

/// Default number of documents per bulk submission.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Default reference record count for the throughput estimate.
pub const DEFAULT_THROUGHPUT_REFERENCE: u64 = 200_000;

/// Collections indexed when none are configured.
pub const DEFAULT_COLLECTIONS: [&str; 3] = ["Accounts", "Contacts", "Users"];

/// How records are projected into documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectionStrategy {
    /// Serialize the whole record, minus its identifier.
    #[default]
    Generic,
    /// Project only the fields declared by the search definitions.
    SchemaDriven,
}

impl fmt::Display for ProjectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => f.write_str("generic"),
            Self::SchemaDriven => f.write_str("schema-driven"),
        }
    }
}

/// What happens to the rest of a run when one collection fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the whole run on the first failure.
    #[default]
    FailFast,
    /// Record the failed collection and continue with the next one.
    BestEffort,
}

/// Retry policy applied to every bulk submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of retry attempts. Zero submits exactly once.
    pub max_retries: u32,
    /// Initial retry delay in milliseconds.
    pub initial_retry_delay_ms: u64,
    /// Maximum retry delay in milliseconds.
    pub max_retry_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_retry_delay_ms: 100,
            max_retry_delay_ms: 5000,
        }
    }
}

/// Immutable configuration of a reindex run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Name of the index documents are written to.
    pub index_name: String,
    /// Number of documents per bulk submission.
    pub batch_size: usize,
    /// Projection strategy.
    pub strategy: ProjectionStrategy,
    /// Whether progress lines are emitted at info level.
    pub report_progress: bool,
    /// Collections to index, in order.
    pub collections: Vec<String>,
    /// Behavior when a collection fails.
    pub failure_policy: FailurePolicy,
    /// Retry policy for bulk submissions.
    pub retry: RetryConfig,
    /// Drop every index (`_all`) instead of only `index_name` before rebuilding.
    pub drop_all_indices: bool,
    /// Record count the throughput estimate is extrapolated to.
    pub throughput_reference: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            index_name: DEFAULT_INDEX_NAME.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            strategy: ProjectionStrategy::default(),
            report_progress: false,
            collections: DEFAULT_COLLECTIONS.iter().map(|c| c.to_string()).collect(),
            failure_policy: FailurePolicy::default(),
            retry: RetryConfig::default(),
            drop_all_indices: false,
            throughput_reference: DEFAULT_THROUGHPUT_REFERENCE,
        }
    }
}

impl RunConfig {
    /// Set the index name.
    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = index_name.into();
        self
    }

    /// Set the batch size. Zero is raised to one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Set the projection strategy.
    pub fn with_strategy(mut self, strategy: ProjectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enable or disable progress reporting.
    pub fn with_progress(mut self, report_progress: bool) -> Self {
        self.report_progress = report_progress;
        self
    }

    /// Set the collections to index.
    pub fn with_collections<I, S>(mut self, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collections = collections.into_iter().map(Into::into).collect();
        self
    }

    /// Set the failure policy.
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Drop every index before rebuilding.
    pub fn with_drop_all_indices(mut self, drop_all_indices: bool) -> Self {
        self.drop_all_indices = drop_all_indices;
        self
    }

    /// Index (or indices) removed at the start of a run.
    pub fn drop_target(&self) -> IndexTarget {
        if self.drop_all_indices {
            IndexTarget::All
        } else {
            IndexTarget::named(self.index_name.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();

        assert_eq!(config.index_name, "main");
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.strategy, ProjectionStrategy::Generic);
        assert_eq!(config.collections, vec!["Accounts", "Contacts", "Users"]);
        assert_eq!(config.failure_policy, FailurePolicy::FailFast);
        assert_eq!(config.retry.max_retries, 0);
        assert_eq!(config.throughput_reference, 200_000);
    }

    #[test]
    fn test_zero_batch_size_is_raised() {
        let config = RunConfig::default().with_batch_size(0);
        assert_eq!(config.batch_size, 1);
    }

    #[test]
    fn test_drop_target() {
        let config = RunConfig::default().with_index_name("crm");
        assert_eq!(config.drop_target(), IndexTarget::named("crm"));

        let config = config.with_drop_all_indices(true);
        assert_eq!(config.drop_target(), IndexTarget::All);
    }
}
