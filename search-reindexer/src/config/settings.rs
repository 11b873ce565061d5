//! Settings read from the environment.

use std::env;
use std::path::PathBuf;

use crate::ReindexerError;
use search_reindexer_pipeline::config::{
    DEFAULT_BATCH_SIZE, DEFAULT_COLLECTIONS, DEFAULT_INDEX_NAME,
};

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default directory holding `records/` and `searchdefs/`.
const DEFAULT_DATA_DIR: &str = "./data";

/// Output format of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, ANSI colored.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT`; anything but `json` selects text.
    pub fn from_env() -> Self {
        match env::var("LOG_FORMAT") {
            Ok(value) if value.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Environment settings of the reindexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub opensearch_url: String,
    pub index_name: String,
    pub data_dir: PathBuf,
    pub batch_size: usize,
    pub collections: Vec<String>,
}

impl Settings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `REINDEX_INDEX_NAME`: Search index name (default: main)
    /// - `REINDEX_DATA_DIR`: JSON data directory (default: ./data)
    /// - `REINDEX_BATCH_SIZE`: Documents per bulk submission (default: 1000)
    /// - `REINDEX_COLLECTIONS`: Comma-separated collections (default: Accounts,Contacts,Users)
    pub fn from_env() -> Result<Self, ReindexerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ReindexerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let opensearch_url =
            lookup("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string());
        let index_name =
            lookup("REINDEX_INDEX_NAME").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string());
        let data_dir = PathBuf::from(
            lookup("REINDEX_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
        );

        let batch_size = match lookup("REINDEX_BATCH_SIZE") {
            Some(raw) => parse_batch_size(&raw)?,
            None => DEFAULT_BATCH_SIZE,
        };

        let collections = match lookup("REINDEX_COLLECTIONS") {
            Some(raw) => parse_collections(&raw)?,
            None => DEFAULT_COLLECTIONS.iter().map(|c| c.to_string()).collect(),
        };

        Ok(Self {
            opensearch_url,
            index_name,
            data_dir,
            batch_size,
            collections,
        })
    }
}

fn parse_batch_size(raw: &str) -> Result<usize, ReindexerError> {
    match raw.trim().parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ReindexerError::config(format!(
            "REINDEX_BATCH_SIZE must be a positive integer, got '{}'",
            raw
        ))),
    }
}

fn parse_collections(raw: &str) -> Result<Vec<String>, ReindexerError> {
    let collections: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    if collections.is_empty() {
        return Err(ReindexerError::config("REINDEX_COLLECTIONS lists no collection"));
    }
    Ok(collections)
}
