//! In-memory doubles for the search engine, the record store and the
//! schema source.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use search_reindexer_repository::{
    FieldDefinition, IndexTarget, RecordStore, SchemaSource, SearchEngineClient, SearchError,
    StoreError,
};
use search_reindexer_shared::{BulkOperation, Document, DocumentAddress, Record};

/// `n` records of a collection with identifiers `1..=n`.
pub fn numbered_records(collection: &str, n: usize) -> Vec<Record> {
    (1..=n)
        .map(|i| {
            Record::new(collection, i.to_string())
                .with_attribute("id", i.to_string())
                .with_attribute("name", format!("{} {}", collection, i))
        })
        .collect()
}

/// Search client that records every call.
pub struct RecordingSearchClient {
    bulks: Mutex<Vec<Vec<BulkOperation>>>,
    indexed: Mutex<Vec<(DocumentAddress, Document)>>,
    deleted: Mutex<Vec<DocumentAddress>>,
    deleted_indices: Mutex<Vec<IndexTarget>>,
    index_exists: AtomicBool,
    fail_index_deletion: bool,
    failing_collection: Option<String>,
    failing_call: Option<usize>,
    transient_failures: AtomicUsize,
    bulk_attempts: AtomicUsize,
}

impl RecordingSearchClient {
    pub fn new() -> Self {
        Self {
            bulks: Mutex::new(Vec::new()),
            indexed: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            deleted_indices: Mutex::new(Vec::new()),
            index_exists: AtomicBool::new(true),
            fail_index_deletion: false,
            failing_collection: None,
            failing_call: None,
            transient_failures: AtomicUsize::new(0),
            bulk_attempts: AtomicUsize::new(0),
        }
    }

    /// Start with no index in the cluster.
    pub fn without_index(self) -> Self {
        self.index_exists.store(false, Ordering::SeqCst);
        self
    }

    /// Fail every index deletion with a non-absence error.
    pub fn failing_index_deletion(mut self) -> Self {
        self.fail_index_deletion = true;
        self
    }

    /// Reject every bulk write containing a document of `collection`.
    pub fn failing_bulk_for(mut self, collection: &str) -> Self {
        self.failing_collection = Some(collection.to_string());
        self
    }

    /// Reject only the `call`-th bulk write, counting from one.
    pub fn failing_bulk_call(mut self, call: usize) -> Self {
        self.failing_call = Some(call);
        self
    }

    /// Fail the first `count` bulk writes with a connection error.
    pub fn with_transient_bulk_failures(self, count: usize) -> Self {
        self.transient_failures.store(count, Ordering::SeqCst);
        self
    }

    /// Successful bulk writes, in submission order.
    pub async fn bulks(&self) -> Vec<Vec<BulkOperation>> {
        self.bulks.lock().await.clone()
    }

    /// Bulk writes attempted, including failed ones.
    pub fn bulk_attempts(&self) -> usize {
        self.bulk_attempts.load(Ordering::SeqCst)
    }

    /// Documents of `collection` written through bulk submissions.
    pub async fn documents_for(&self, collection: &str) -> usize {
        self.bulks
            .lock()
            .await
            .iter()
            .flatten()
            .filter(|operation| operation.address.collection == collection)
            .count()
    }

    pub async fn indexed(&self) -> Vec<(DocumentAddress, Document)> {
        self.indexed.lock().await.clone()
    }

    pub async fn deleted(&self) -> Vec<DocumentAddress> {
        self.deleted.lock().await.clone()
    }

    pub async fn deleted_indices(&self) -> Vec<IndexTarget> {
        self.deleted_indices.lock().await.clone()
    }
}

#[async_trait]
impl SearchEngineClient for RecordingSearchClient {
    async fn delete_index(&self, target: &IndexTarget) -> Result<(), SearchError> {
        self.deleted_indices.lock().await.push(target.clone());

        if self.fail_index_deletion {
            return Err(SearchError::index_deletion("cluster_block_exception"));
        }
        if !self.index_exists.swap(false, Ordering::SeqCst) {
            return Err(SearchError::index_not_found(target.as_str()));
        }
        Ok(())
    }

    async fn bulk_write(&self, operations: &[BulkOperation]) -> Result<(), SearchError> {
        let call = self.bulk_attempts.fetch_add(1, Ordering::SeqCst) + 1;

        if self.failing_call == Some(call) {
            return Err(SearchError::bulk_index(format!(
                "1 of {} documents failed: mapper_parsing_exception",
                operations.len()
            )));
        }

        if self
            .transient_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(SearchError::connection("connection reset by peer"));
        }

        if let Some(collection) = &self.failing_collection {
            if operations.iter().any(|op| &op.address.collection == collection) {
                return Err(SearchError::bulk_index(format!(
                    "1 of {} documents failed: mapper_parsing_exception",
                    operations.len()
                )));
            }
        }

        self.index_exists.store(true, Ordering::SeqCst);
        self.bulks.lock().await.push(operations.to_vec());
        Ok(())
    }

    async fn index_document(
        &self,
        address: &DocumentAddress,
        document: &Document,
    ) -> Result<(), SearchError> {
        self.index_exists.store(true, Ordering::SeqCst);
        self.indexed
            .lock()
            .await
            .push((address.clone(), document.clone()));
        Ok(())
    }

    async fn delete_document(&self, address: &DocumentAddress) -> Result<(), SearchError> {
        self.deleted.lock().await.push(address.clone());
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        Ok(true)
    }
}

/// Record store backed by a map of collection to records.
#[derive(Default)]
pub struct InMemoryRecordStore {
    collections: HashMap<String, Vec<Record>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add records, each to its own collection.
    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        for record in records {
            self.collections
                .entry(record.collection.clone())
                .or_default()
                .push(record);
        }
        self
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn enumerate_all(&self, collection: &str) -> Result<Vec<Record>, StoreError> {
        Ok(self.collections.get(collection).cloned().unwrap_or_default())
    }

    async fn fetch(&self, collection: &str, id: &str) -> Result<Option<Record>, StoreError> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|records| records.iter().find(|r| r.id == id))
            .cloned())
    }
}

/// Schema source serving fixed declarations.
#[derive(Default)]
pub struct StaticSchemaSource {
    definitions: HashMap<String, Vec<(String, FieldDefinition)>>,
}

impl StaticSchemaSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(
        mut self,
        collection: &str,
        definitions: Vec<(String, FieldDefinition)>,
    ) -> Self {
        self.definitions.insert(collection.to_string(), definitions);
        self
    }
}

#[async_trait]
impl SchemaSource for StaticSchemaSource {
    async fn field_definitions(
        &self,
        collection: &str,
    ) -> Result<Vec<(String, FieldDefinition)>, StoreError> {
        Ok(self.definitions.get(collection).cloned().unwrap_or_default())
    }
}
