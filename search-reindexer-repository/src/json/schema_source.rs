use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use super::read_optional;
use crate::errors::StoreError;
use crate::interfaces::{FieldDefinition, SchemaSource};

/// Field-definition source backed by `<data_dir>/searchdefs/<Collection>.json`.
///
/// Declaration order in the file is preserved.
pub struct JsonSchemaSource {
    searchdefs_dir: PathBuf,
}

impl JsonSchemaSource {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            searchdefs_dir: data_dir.as_ref().join("searchdefs"),
        }
    }

    fn parse_definitions(
        collection: &str,
        content: &str,
    ) -> Result<Vec<(String, FieldDefinition)>, StoreError> {
        let source_name = format!("searchdefs/{}.json", collection);
        let fields: Map<String, Value> = serde_json::from_str(content)
            .map_err(|e| StoreError::parse(source_name.as_str(), e.to_string()))?;

        fields
            .into_iter()
            .map(|(name, value)| {
                serde_json::from_value::<FieldDefinition>(value)
                    .map(|definition| (name.clone(), definition))
                    .map_err(|e| {
                        StoreError::parse(source_name.as_str(), format!("field {}: {}", name, e))
                    })
            })
            .collect()
    }
}

#[async_trait]
impl SchemaSource for JsonSchemaSource {
    async fn field_definitions(
        &self,
        collection: &str,
    ) -> Result<Vec<(String, FieldDefinition)>, StoreError> {
        let path = self.searchdefs_dir.join(format!("{}.json", collection));
        let Some(content) = read_optional(&path).await? else {
            debug!(collection = %collection, "No search definitions file");
            return Ok(Vec::new());
        };

        Self::parse_definitions(collection, &content)
    }
}
