//! Field-definition source trait definition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;

/// A search field as declared by the field-definition source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Query type of the field; absent means the default type.
    #[serde(default)]
    pub query_type: Option<String>,
    /// Query operator attached to the field, if any.
    #[serde(default)]
    pub operator: Option<String>,
    /// Underlying attributes the field is composed from.
    #[serde(default, rename = "db_field")]
    pub source_attributes: Vec<String>,
}

impl FieldDefinition {
    /// Set the query type.
    pub fn with_query_type(mut self, query_type: impl Into<String>) -> Self {
        self.query_type = Some(query_type.into());
        self
    }

    /// Set the operator.
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    /// Set the source attributes.
    pub fn with_source_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_attributes = attributes.into_iter().map(Into::into).collect();
        self
    }
}

/// Source of per-collection search field declarations.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Field declarations of a collection, in declaration order.
    async fn field_definitions(
        &self,
        collection: &str,
    ) -> Result<Vec<(String, FieldDefinition)>, StoreError>;
}
