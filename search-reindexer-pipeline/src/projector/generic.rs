use crate::projector::FieldProjector;
use search_reindexer_shared::{Document, Record, ID_ATTRIBUTE};

/// Projects the full attribute snapshot of a record, minus its identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericProjector;

impl FieldProjector for GenericProjector {
    fn project(&self, record: &Record) -> Document {
        let mut document = record.snapshot();
        document.shift_remove(ID_ATTRIBUTE);
        document
    }
}
