use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use search_reindexer::{Dependencies, LogFormat, ReindexerError, Settings};
use search_reindexer_pipeline::{FailurePolicy, ProjectionStrategy, RetryConfig, RunConfig};
use search_reindexer_shared::Record;

#[derive(Parser)]
#[command(name = "search-reindexer")]
#[command(about = "Rebuild and maintain the search index from the primary record store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drop the index and rebuild it from every configured collection
    Reindex {
        /// Project only the fields declared by the search definitions
        #[arg(long)]
        schema_driven: bool,

        /// Log progress lines at debug level only
        #[arg(long)]
        quiet: bool,

        /// Continue with the next collection when one fails
        #[arg(long)]
        best_effort: bool,

        /// Retry attempts for each bulk submission
        #[arg(long, default_value = "0")]
        max_retries: u32,

        /// Drop every index in the cluster, not only the configured one
        #[arg(long)]
        drop_all: bool,
    },
    /// Index a single record
    IndexRecord {
        collection: String,
        id: String,

        /// Project only the fields declared by the search definitions
        #[arg(long)]
        schema_driven: bool,
    },
    /// Remove a single record from the index
    RemoveRecord { collection: String, id: String },
    /// Delete the configured index
    RemoveIndex,
}

fn strategy(schema_driven: bool) -> ProjectionStrategy {
    if schema_driven {
        ProjectionStrategy::SchemaDriven
    } else {
        ProjectionStrategy::Generic
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing(LogFormat::from_env());

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!(error = %e, "Reindexer failed");

        let mut source = std::error::Error::source(&e);
        while let Some(err) = source {
            error!("  Caused by: {}", err);
            source = err.source();
        }

        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ReindexerError> {
    let settings = Settings::from_env()?;
    let deps = Dependencies::new(settings).await?;
    let base = deps.run_config();

    match cli.command {
        Commands::Reindex {
            schema_driven,
            quiet,
            best_effort,
            max_retries,
            drop_all,
        } => {
            let failure_policy = if best_effort {
                FailurePolicy::BestEffort
            } else {
                FailurePolicy::FailFast
            };
            let config = base
                .with_strategy(strategy(schema_driven))
                .with_progress(!quiet)
                .with_failure_policy(failure_policy)
                .with_retry(RetryConfig {
                    max_retries,
                    ..Default::default()
                })
                .with_drop_all_indices(drop_all);

            reindex(&deps, config).await
        }
        Commands::IndexRecord {
            collection,
            id,
            schema_driven,
        } => {
            let config = base.with_strategy(strategy(schema_driven));
            let record = deps
                .store
                .fetch(&collection, &id)
                .await?
                .ok_or_else(|| ReindexerError::record_not_found(&collection, &id))?;

            deps.single_record_indexer(&config)
                .index_record(&record, None)
                .await?;
            Ok(())
        }
        Commands::RemoveRecord { collection, id } => {
            // The record may already be gone from the store; only its address is needed.
            let record = Record::new(collection, id);

            deps.single_record_indexer(&base).remove_record(&record).await?;
            Ok(())
        }
        Commands::RemoveIndex => {
            deps.single_record_indexer(&base).remove_index().await?;
            Ok(())
        }
    }
}

async fn reindex(deps: &Dependencies, config: RunConfig) -> Result<(), ReindexerError> {
    let mut orchestrator = deps.orchestrator(config);
    let shutdown = orchestrator.shutdown_handle();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal");
            let _ = shutdown.send(());
        }
    });

    let summary = orchestrator.run().await?;

    info!(
        started_at = %summary.started_at.to_rfc3339(),
        finished_at = %summary.finished_at.to_rfc3339(),
        "Reindex finished"
    );

    if !summary.is_complete() {
        warn!(
            failed = summary.counters.failed_collections.len(),
            "Some collections were not indexed"
        );
    }

    Ok(())
}
