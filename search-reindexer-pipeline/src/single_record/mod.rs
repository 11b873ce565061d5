//! Incremental upkeep of the search index for individual records.

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::config::RunConfig;
use crate::errors::PipelineError;
use crate::projector::{FieldProjector, Projection, SchemaDrivenProjector};
use search_reindexer_repository::{IndexTarget, SearchEngineClient};
use search_reindexer_shared::{DocumentAddress, FieldSpec, Record};

/// Indexes and removes single records outside of a full reindex.
///
/// Uses the same addressing and projection as the batch path, so a record
/// written here replaces the document a full run would have produced.
pub struct SingleRecordIndexer {
    client: Arc<dyn SearchEngineClient>,
    projection: Projection,
    index_name: String,
}

impl SingleRecordIndexer {
    pub fn new(client: Arc<dyn SearchEngineClient>, projection: Projection, config: &RunConfig) -> Self {
        Self {
            client,
            projection,
            index_name: config.index_name.clone(),
        }
    }

    /// Address of a record's document in the configured index.
    pub fn address_of(&self, record: &Record) -> DocumentAddress {
        DocumentAddress::for_record(&self.index_name, record)
    }

    /// Project a record and write it to the index.
    ///
    /// A supplied `field_spec` is used as-is under schema-driven projection;
    /// otherwise the spec is resolved for the record's collection. Generic
    /// projection ignores `field_spec`.
    #[instrument(skip(self, record, field_spec), fields(collection = %record.collection, record_id = %record.id))]
    pub async fn index_record(
        &self,
        record: &Record,
        field_spec: Option<&FieldSpec>,
    ) -> Result<(), PipelineError> {
        let projector: Box<dyn FieldProjector> = match (&self.projection, field_spec) {
            (Projection::SchemaDriven(_), Some(spec)) => Box::new(SchemaDrivenProjector::new(spec.clone())),
            _ => self.projection.projector_for(&record.collection).await?,
        };

        let address = self.address_of(record);
        let document = projector.project(record);

        self.client
            .index_document(&address, &document)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to index record"))?;

        info!(document_id = %address.document_id(), "Indexed record");
        Ok(())
    }

    /// Delete a record's document from the index.
    #[instrument(skip(self, record), fields(collection = %record.collection, record_id = %record.id))]
    pub async fn remove_record(&self, record: &Record) -> Result<(), PipelineError> {
        let address = self.address_of(record);

        self.client
            .delete_document(&address)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to remove record"))?;

        info!(document_id = %address.document_id(), "Removed record");
        Ok(())
    }

    /// Delete the whole configured index.
    ///
    /// Unlike the drop at the start of a reindex, a missing index is an error here.
    #[instrument(skip(self), fields(index = %self.index_name))]
    pub async fn remove_index(&self) -> Result<(), PipelineError> {
        self.client
            .delete_index(&IndexTarget::named(self.index_name.as_str()))
            .await
            .inspect_err(|e| error!(error = %e, "Failed to remove index"))?;

        info!("Removed index");
        Ok(())
    }
}
