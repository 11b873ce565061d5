//! Dependency initialization and wiring for the search reindexer.

use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::ReindexerError;
use search_reindexer_pipeline::{
    ProjectionStrategy, Projection, ReindexOrchestrator, RunConfig, SchemaResolver,
    SearchDefsResolver, SingleRecordIndexer,
};
use search_reindexer_repository::{
    JsonRecordStore, JsonSchemaSource, OpenSearchClient, RecordStore, SearchEngineClient,
};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Search engine the index is written to.
    pub search_client: Arc<dyn SearchEngineClient>,
    /// Primary record store.
    pub store: Arc<dyn RecordStore>,
    /// Resolver used by schema-driven projection.
    pub resolver: Arc<dyn SchemaResolver>,
    settings: Settings,
}

impl Dependencies {
    /// Initialize all dependencies from the given settings.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ReindexerError)` - If OpenSearch is unreachable or unhealthy
    pub async fn new(settings: Settings) -> Result<Self, ReindexerError> {
        info!(
            opensearch_url = %settings.opensearch_url,
            index_name = %settings.index_name,
            data_dir = %settings.data_dir.display(),
            "Initializing dependencies"
        );

        // Initialize OpenSearch client
        let search_client = OpenSearchClient::new(&settings.opensearch_url)
            .await
            .map_err(|e| ReindexerError::config(format!("Failed to create OpenSearch client: {}", e)))?;

        // Verify OpenSearch is reachable
        let healthy = search_client
            .health_check()
            .await
            .map_err(|e| ReindexerError::config(format!("OpenSearch health check failed: {}", e)))?;

        if !healthy {
            return Err(ReindexerError::config("OpenSearch cluster is unhealthy"));
        }

        info!("OpenSearch connection verified");

        let store = JsonRecordStore::new(&settings.data_dir);
        let resolver = SearchDefsResolver::new(Arc::new(JsonSchemaSource::new(&settings.data_dir)));

        Ok(Self {
            search_client: Arc::new(search_client),
            store: Arc::new(store),
            resolver: Arc::new(resolver),
            settings,
        })
    }

    /// Run configuration derived from the settings.
    pub fn run_config(&self) -> RunConfig {
        RunConfig::default()
            .with_index_name(self.settings.index_name.as_str())
            .with_batch_size(self.settings.batch_size)
            .with_collections(self.settings.collections.iter().cloned())
    }

    /// Projection for the given strategy.
    pub fn projection(&self, strategy: ProjectionStrategy) -> Projection {
        Projection::from_strategy(strategy, self.resolver.clone())
    }

    /// Orchestrator for a full reindex.
    pub fn orchestrator(&self, config: RunConfig) -> ReindexOrchestrator {
        ReindexOrchestrator::new(
            self.search_client.clone(),
            self.store.clone(),
            self.projection(config.strategy),
            config,
        )
    }

    /// Indexer for single-record operations.
    pub fn single_record_indexer(&self, config: &RunConfig) -> SingleRecordIndexer {
        SingleRecordIndexer::new(
            self.search_client.clone(),
            self.projection(config.strategy),
            config,
        )
    }
}
