//! Schema resolver for schema-driven projection.
//!
//! Turns the search field declarations of a collection into the
//! [`FieldSpec`] the schema-driven projector consumes. Unsupported entries
//! are skipped with a warning; they never fail resolution.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::errors::PipelineError;
use search_reindexer_repository::{FieldDefinition, SchemaSource};
use search_reindexer_shared::FieldSpec;

/// The only query type the reindexer knows how to project.
pub const DEFAULT_QUERY_TYPE: &str = "default";

/// Substring marking a date-range search field.
pub const DATE_RANGE_MARKER: &str = "range_date";

/// Produces the field specification of a collection.
#[async_trait]
pub trait SchemaResolver: Send + Sync {
    /// Resolve the indexable fields of a collection.
    ///
    /// Identical declarations always resolve to an identical spec, in
    /// declaration order.
    async fn resolve_fields(&self, collection: &str) -> Result<FieldSpec, PipelineError>;
}

/// Resolver reading declarations from a [`SchemaSource`].
pub struct SearchDefsResolver {
    source: Arc<dyn SchemaSource>,
}

impl SearchDefsResolver {
    pub fn new(source: Arc<dyn SchemaSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl SchemaResolver for SearchDefsResolver {
    #[instrument(skip(self))]
    async fn resolve_fields(&self, collection: &str) -> Result<FieldSpec, PipelineError> {
        let definitions = self.source.field_definitions(collection).await?;
        let spec = resolve_definitions(collection, &definitions);

        debug!(
            declared = definitions.len(),
            resolved = spec.len(),
            "Resolved search fields"
        );
        Ok(spec)
    }
}

/// Why a declared field is left out of the spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exclusion {
    UnsupportedQueryType,
    HasOperator,
    DateRange,
}

fn exclusion(name: &str, definition: &FieldDefinition) -> Option<Exclusion> {
    if definition
        .query_type
        .as_deref()
        .is_some_and(|query_type| query_type != DEFAULT_QUERY_TYPE)
    {
        return Some(Exclusion::UnsupportedQueryType);
    }

    if definition
        .operator
        .as_deref()
        .is_some_and(|operator| !operator.is_empty())
    {
        return Some(Exclusion::HasOperator);
    }

    if name.contains(DATE_RANGE_MARKER) {
        return Some(Exclusion::DateRange);
    }

    None
}

/// Filter and normalize field declarations into a spec.
pub fn resolve_definitions(collection: &str, definitions: &[(String, FieldDefinition)]) -> FieldSpec {
    let mut spec = FieldSpec::new();

    for (name, definition) in definitions {
        match exclusion(name, definition) {
            Some(Exclusion::UnsupportedQueryType) => {
                warn!(
                    collection = %collection,
                    field = %name,
                    query_type = ?definition.query_type,
                    "Field has an unsupported query type, skipping"
                );
            }
            Some(Exclusion::HasOperator) => {
                warn!(
                    collection = %collection,
                    field = %name,
                    operator = ?definition.operator,
                    "Field has an operator, skipping"
                );
            }
            Some(Exclusion::DateRange) => {
                warn!(collection = %collection, field = %name, "Field is a date range, skipping");
            }
            None if definition.source_attributes.is_empty() => spec.push_simple(name.as_str()),
            None => spec.push_composite(name.as_str(), definition.source_attributes.clone()),
        }
    }

    spec
}
