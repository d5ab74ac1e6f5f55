use super::models::ExportDocument;
use crate::board::Board;
use taskzen_core::{TaskzenError, TaskzenResult};

/// Serializes boards into the portable document format.
///
/// Output is deterministic: card and tag maps are ordered, so exporting the
/// same board twice yields byte-identical documents.
pub struct BoardExporter;

impl BoardExporter {
    pub fn to_json(board: &Board) -> TaskzenResult<String> {
        let document = ExportDocument::from_board(board);
        serde_json::to_string_pretty(&document)
            .map_err(|e| TaskzenError::Serialization(e.to_string()))
    }
}
