//! Projector module for the search reindexer pipeline.
//!
//! Transforms records into search documents. The strategy is chosen once
//! per run as a [`Projection`]; for every collection it yields a
//! [`FieldProjector`] that is then applied to each record of that
//! collection.

mod generic;
mod schema_driven;

pub use generic::GenericProjector;
pub use schema_driven::SchemaDrivenProjector;

use std::sync::Arc;

use crate::config::ProjectionStrategy;
use crate::errors::PipelineError;
use crate::schema::SchemaResolver;
use search_reindexer_shared::{Document, Record};

/// Turns a record into an indexable document.
///
/// Projection never fails and never mutates the record; the returned
/// document never contains the record identifier.
pub trait FieldProjector: Send + Sync {
    fn project(&self, record: &Record) -> Document;
}

/// Projection strategy of a run, selected once at configuration time.
#[derive(Clone)]
pub enum Projection {
    /// Whole-record serialization.
    Generic,
    /// Declared fields only, resolved per collection.
    SchemaDriven(Arc<dyn SchemaResolver>),
}

impl Projection {
    /// Build the projection for a configured strategy.
    pub fn from_strategy(strategy: ProjectionStrategy, resolver: Arc<dyn SchemaResolver>) -> Self {
        match strategy {
            ProjectionStrategy::Generic => Self::Generic,
            ProjectionStrategy::SchemaDriven => Self::SchemaDriven(resolver),
        }
    }

    pub fn strategy(&self) -> ProjectionStrategy {
        match self {
            Self::Generic => ProjectionStrategy::Generic,
            Self::SchemaDriven(_) => ProjectionStrategy::SchemaDriven,
        }
    }

    /// Projector for every record of a collection.
    ///
    /// Schema-driven projection resolves the collection's field spec here,
    /// once, and reuses it for every record.
    pub async fn projector_for(
        &self,
        collection: &str,
    ) -> Result<Box<dyn FieldProjector>, PipelineError> {
        match self {
            Self::Generic => Ok(Box::new(GenericProjector)),
            Self::SchemaDriven(resolver) => {
                let spec = resolver.resolve_fields(collection).await?;
                Ok(Box::new(SchemaDrivenProjector::new(spec)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SearchDefsResolver;
    use crate::test_support::StaticSchemaSource;
    use search_reindexer_repository::FieldDefinition;
    use serde_json::json;

    fn resolver() -> Arc<dyn SchemaResolver> {
        let source = StaticSchemaSource::new().with_collection(
            "Accounts",
            vec![("name".to_string(), FieldDefinition::default())],
        );
        Arc::new(SearchDefsResolver::new(Arc::new(source)))
    }

    #[test]
    fn test_from_strategy() {
        let generic = Projection::from_strategy(ProjectionStrategy::Generic, resolver());
        assert_eq!(generic.strategy(), ProjectionStrategy::Generic);

        let schema = Projection::from_strategy(ProjectionStrategy::SchemaDriven, resolver());
        assert_eq!(schema.strategy(), ProjectionStrategy::SchemaDriven);
    }

    #[tokio::test]
    async fn test_projector_per_strategy() {
        let record = Record::new("Accounts", "42")
            .with_attribute("id", "42")
            .with_attribute("name", "Acme")
            .with_attribute("extra", "x");

        let generic = Projection::Generic.projector_for("Accounts").await.unwrap();
        let document = generic.project(&record);
        assert_eq!(serde_json::Value::Object(document), json!({"name": "Acme", "extra": "x"}));

        let schema = Projection::SchemaDriven(resolver())
            .projector_for("Accounts")
            .await
            .unwrap();
        let document = schema.project(&record);
        assert_eq!(serde_json::Value::Object(document), json!({"name": "Acme"}));
    }
}
