//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::IndicesDeleteParts,
    BulkParts, DeleteParts, IndexParts, OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::{IndexTarget, SearchEngineClient};
use crate::opensearch::bulk::{build_bulk_body, bulk_failures};
use search_reindexer_shared::{BulkOperation, Document, DocumentAddress};

/// OpenSearch client implementation.
///
/// Documents are addressed by `_index = address.index` and
/// `_id = "{collection}_{id}"`; OpenSearch has no mapping types, so the
/// collection is folded into the document ID.
///
/// # Example
///
/// ```ignore
/// let client = OpenSearchClient::new("http://localhost:9200").await?;
/// let address = DocumentAddress::new("main", "Accounts", "42");
/// client.index_document(&address, &document).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If connection setup fails
    pub async fn new(url: &str) -> Result<Self, SearchError> {
        let parsed_url = Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch client");

        Ok(Self { client })
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    #[instrument(skip(self), fields(target = %target))]
    async fn delete_index(&self, target: &IndexTarget) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[target.as_str()]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            return Err(SearchError::index_not_found(target.as_str()));
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Delete index request failed");
            return Err(SearchError::index_deletion(format!(
                "Delete index failed with status {}: {}",
                status, error_body
            )));
        }

        debug!("Index deleted");
        Ok(())
    }

    #[instrument(skip(self, operations), fields(count = operations.len()))]
    async fn bulk_write(&self, operations: &[BulkOperation]) -> Result<(), SearchError> {
        if operations.is_empty() {
            return Ok(());
        }

        let response = self
            .client
            .bulk(BulkParts::None)
            .body(build_bulk_body(operations))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchError::bulk_index(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        if let Some(failures) = bulk_failures(&response_body) {
            if failures.failed > 0 {
                error!(
                    failed = failures.failed,
                    total = operations.len(),
                    reason = ?failures.first_reason,
                    "Bulk request had item failures"
                );
                return Err(SearchError::bulk_index(format!(
                    "{} of {} documents failed: {}",
                    failures.failed,
                    operations.len(),
                    failures.first_reason.unwrap_or_default()
                )));
            }
        }

        debug!("Bulk request completed");
        Ok(())
    }

    async fn index_document(
        &self,
        address: &DocumentAddress,
        document: &Document,
    ) -> Result<(), SearchError> {
        let doc_id = address.document_id();

        let response = self
            .client
            .index(IndexParts::IndexId(&address.index, &doc_id))
            .body(Value::Object(document.clone()))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(SearchError::index(format!(
                "Index failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %doc_id, "Document indexed");
        Ok(())
    }

    /// Delete a document from the search index.
    ///
    /// If the document doesn't exist, the operation is considered successful.
    async fn delete_document(&self, address: &DocumentAddress) -> Result<(), SearchError> {
        let doc_id = address.document_id();

        let response = self
            .client
            .delete(DeleteParts::IndexId(&address.index, &doc_id))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - document may not exist
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Delete request failed");
            return Err(SearchError::delete(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %doc_id, "Document deleted");
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            return Ok(false);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let status = body.get("status").and_then(Value::as_str).unwrap_or("red");
        debug!(cluster_status = %status, "Cluster health");

        Ok(status != "red")
    }
}
