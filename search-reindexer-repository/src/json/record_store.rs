use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::read_optional;
use crate::errors::StoreError;
use crate::interfaces::RecordStore;
use search_reindexer_shared::{Record, ID_ATTRIBUTE};

/// Record store backed by `<data_dir>/records/<Collection>.json` files.
pub struct JsonRecordStore {
    records_dir: PathBuf,
}

impl JsonRecordStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            records_dir: data_dir.as_ref().join("records"),
        }
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.records_dir.join(format!("{}.json", collection))
    }

    fn parse_records(collection: &str, content: &str) -> Result<Vec<Record>, StoreError> {
        let values: Vec<Value> = serde_json::from_str(content)
            .map_err(|e| StoreError::parse(format!("records/{}.json", collection), e.to_string()))?;

        values
            .into_iter()
            .enumerate()
            .map(|(position, value)| Self::to_record(collection, position, value))
            .collect()
    }

    fn to_record(collection: &str, position: usize, value: Value) -> Result<Record, StoreError> {
        let Value::Object(attributes) = value else {
            return Err(StoreError::invalid_record(
                collection,
                format!("entry {} is not an object", position),
            ));
        };

        let id = match attributes.get(ID_ATTRIBUTE) {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => {
                return Err(StoreError::invalid_record(
                    collection,
                    format!("entry {} has no usable id", position),
                ))
            }
        };

        Ok(Record {
            id,
            collection: collection.to_string(),
            attributes,
        })
    }
}

#[async_trait]
impl RecordStore for JsonRecordStore {
    async fn enumerate_all(&self, collection: &str) -> Result<Vec<Record>, StoreError> {
        let path = self.collection_path(collection);
        let Some(content) = read_optional(&path).await? else {
            debug!(collection = %collection, path = %path.display(), "No records file");
            return Ok(Vec::new());
        };

        Self::parse_records(collection, &content)
    }

    async fn fetch(&self, collection: &str, id: &str) -> Result<Option<Record>, StoreError> {
        let records = self.enumerate_all(collection).await?;
        Ok(records.into_iter().find(|record| record.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write_records(dir: &TempDir, collection: &str, content: &str) {
        let records_dir = dir.path().join("records");
        fs::create_dir_all(&records_dir).unwrap();
        fs::write(records_dir.join(format!("{}.json", collection)), content).unwrap();
    }

    #[tokio::test]
    async fn test_enumerate_in_file_order() {
        let dir = TempDir::new().unwrap();
        write_records(
            &dir,
            "Accounts",
            r#"[{"id": "42", "name": "Acme"}, {"id": 7, "name": "Globex"}]"#,
        );

        let store = JsonRecordStore::new(dir.path());
        let records = store.enumerate_all("Accounts").await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "42");
        assert_eq!(records[0].collection, "Accounts");
        assert_eq!(records[0].attribute("name"), Some(&json!("Acme")));
        assert_eq!(records[1].id, "7");
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonRecordStore::new(dir.path());

        let records = store.enumerate_all("Leads").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_record_without_id_is_rejected() {
        let dir = TempDir::new().unwrap();
        write_records(&dir, "Accounts", r#"[{"name": "Nameless"}]"#);

        let store = JsonRecordStore::new(dir.path());
        let result = store.enumerate_all("Accounts").await;

        assert!(matches!(result, Err(StoreError::InvalidRecord { .. })));
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        write_records(&dir, "Accounts", "{not json");

        let store = JsonRecordStore::new(dir.path());
        let result = store.enumerate_all("Accounts").await;

        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_fetch_by_id() {
        let dir = TempDir::new().unwrap();
        write_records(&dir, "Contacts", r#"[{"id": "c1", "first_name": "Jane"}]"#);

        let store = JsonRecordStore::new(dir.path());

        let found = store.fetch("Contacts", "c1").await.unwrap();
        assert_eq!(found.map(|r| r.id), Some("c1".to_string()));

        let missing = store.fetch("Contacts", "c2").await.unwrap();
        assert!(missing.is_none());
    }
}
