use super::models::ExportDocument;
use crate::board::Board;
use crate::schema::validate_document;
use taskzen_core::{TaskzenError, TaskzenResult};

/// Parses and validates portable documents back into boards.
///
/// Parsing is all-or-nothing: a document that fails any structural check
/// produces an error and no board. The returned board is normalized, so its
/// placement invariant holds even when the document's orderings were
/// inconsistent.
pub struct BoardImporter;

impl BoardImporter {
    pub fn from_json(data: &str) -> TaskzenResult<Board> {
        let value: serde_json::Value = serde_json::from_str(data)
            .map_err(|e| TaskzenError::Validation(format!("not valid JSON: {}", e)))?;

        validate_document(&value)?;

        let document: ExportDocument = serde_json::from_value(value)
            .map_err(|e| TaskzenError::Validation(e.to_string()))?;

        let mut board = document.into_board();
        board.normalize();
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, NewCard};
    use crate::column::ColumnId;
    use crate::export::BoardExporter;
    use crate::store::{BoardOps, BoardStore};
    use crate::tag::NewTag;

    #[test]
    fn test_round_trip_reproduces_board() {
        let mut store = BoardStore::new(Board::new("work"));
        let a = store
            .add_card(ColumnId::Todo, NewCard::titled("Plan release"))
            .unwrap();
        store
            .add_card(ColumnId::Doing, NewCard::titled("Fix importer"))
            .unwrap();
        let tag = store
            .add_tag(NewTag {
                name: "urgent".to_string(),
                color: "red".to_string(),
            })
            .unwrap();
        store.add_card_tag(&a, &tag).unwrap();
        store.archive_card(&a).unwrap();

        let exported = BoardExporter::to_json(store.board()).unwrap();
        let imported = BoardImporter::from_json(&exported).unwrap();

        assert_eq!(&imported, store.board());
    }

    #[test]
    fn test_rejects_unsupported_version() {
        let board = Board::new("work");
        let exported = BoardExporter::to_json(&board).unwrap();
        let bumped = exported.replace("\"version\": 1", "\"version\": 2");

        let err = BoardImporter::from_json(&bumped).unwrap_err();
        assert!(err.to_string().contains("unsupported version"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(BoardImporter::from_json("not json at all").is_err());
    }

    #[test]
    fn test_import_repairs_inconsistent_ordering() {
        let mut board = Board::new("work");
        let card = Card::new("Stray".to_string(), None, Vec::new());
        let id = card.id.clone();
        board.cards.insert(id.clone(), card);
        // Deliberately leave the card out of every cardOrder.
        let exported = BoardExporter::to_json(&board).unwrap();

        let imported = BoardImporter::from_json(&exported).unwrap();
        assert!(imported.check_integrity().is_ok());
        assert!(imported.columns.todo.contains(&id));
    }
}
