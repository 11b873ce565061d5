//! OpenSearch implementation of the search engine client.
//!
//! This module provides a concrete implementation of `SearchEngineClient`
//! using OpenSearch as the backend.

mod bulk;
mod client;

pub use client::OpenSearchClient;
