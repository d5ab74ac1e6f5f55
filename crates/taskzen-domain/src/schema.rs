//! Structural validation for import documents.
//!
//! Import data arrives as untyped JSON. Rather than letting a typed
//! deserialize fail with an opaque message, `validate_document` walks the
//! value first and reports exactly which rule a bad document breaks. It
//! never mutates anything; the caller only replaces its board after
//! validation and typed parsing both succeed.

use serde_json::Value;
use thiserror::Error;

use crate::column::ColumnId;
use taskzen_core::TaskzenError;

/// The document version this build reads and writes.
pub const SUPPORTED_VERSION: u64 = 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("document is not a JSON object")]
    NotAnObject,

    #[error("missing or non-integer 'version' field")]
    MissingVersion,

    #[error("unsupported version {0} (this build reads version {SUPPORTED_VERSION})")]
    UnsupportedVersion(u64),

    #[error("missing 'board' object")]
    MissingBoard,

    #[error("'board.columns' is not an object")]
    MalformedColumns,

    #[error("missing required column '{0}'")]
    MissingColumn(ColumnId),

    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("column '{0}' cardOrder is not an array of strings")]
    MalformedCardOrder(String),

    #[error("'board.cards' is not an object")]
    MalformedCards,

    #[error("card '{0}' has a missing or empty title")]
    InvalidCardTitle(String),

    #[error("'board.tags' is not an object")]
    MalformedTags,
}

impl From<SchemaError> for TaskzenError {
    fn from(err: SchemaError) -> Self {
        TaskzenError::Validation(err.to_string())
    }
}

/// Check that a value is a structurally valid version-1 export document.
pub fn validate_document(value: &Value) -> Result<(), SchemaError> {
    let document = value.as_object().ok_or(SchemaError::NotAnObject)?;

    let version = document
        .get("version")
        .and_then(Value::as_u64)
        .ok_or(SchemaError::MissingVersion)?;
    if version != SUPPORTED_VERSION {
        return Err(SchemaError::UnsupportedVersion(version));
    }

    let board = document
        .get("board")
        .and_then(Value::as_object)
        .ok_or(SchemaError::MissingBoard)?;

    let columns = board
        .get("columns")
        .and_then(Value::as_object)
        .ok_or(SchemaError::MalformedColumns)?;

    for required in ColumnId::CORE {
        if !columns.contains_key(required.as_str()) {
            return Err(SchemaError::MissingColumn(required));
        }
    }

    for (name, column) in columns {
        if name.parse::<ColumnId>().is_err() {
            // An unrecognized column would be silently dropped by the typed
            // parse, losing whatever cards it orders. Refuse instead.
            return Err(SchemaError::UnknownColumn(name.clone()));
        }
        let order_ok = column
            .get("cardOrder")
            .and_then(Value::as_array)
            .is_some_and(|order| order.iter().all(Value::is_string));
        if !order_ok {
            return Err(SchemaError::MalformedCardOrder(name.clone()));
        }
    }

    if let Some(cards) = board.get("cards") {
        let cards = cards.as_object().ok_or(SchemaError::MalformedCards)?;
        for (id, card) in cards {
            let title_ok = card
                .get("title")
                .and_then(Value::as_str)
                .is_some_and(|title| !title.trim().is_empty());
            if !title_ok {
                return Err(SchemaError::InvalidCardTitle(id.clone()));
            }
        }
    }

    if let Some(tags) = board.get("tags") {
        if !tags.is_object() {
            return Err(SchemaError::MalformedTags);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_document() -> Value {
        json!({
            "version": 1,
            "board": {
                "columns": {
                    "todo": {"id": "todo", "title": "Todo", "cardOrder": []},
                    "doing": {"id": "doing", "title": "Doing", "cardOrder": []},
                    "done": {"id": "done", "title": "Done", "cardOrder": []}
                },
                "cards": {}
            }
        })
    }

    #[test]
    fn test_minimal_document_is_valid() {
        assert_eq!(validate_document(&minimal_document()), Ok(()));
    }

    #[test]
    fn test_rejects_non_object() {
        assert_eq!(
            validate_document(&json!([1, 2])),
            Err(SchemaError::NotAnObject)
        );
    }

    #[test]
    fn test_rejects_missing_version() {
        let mut doc = minimal_document();
        doc.as_object_mut().unwrap().remove("version");
        assert_eq!(validate_document(&doc), Err(SchemaError::MissingVersion));
    }

    #[test]
    fn test_rejects_unsupported_version() {
        let mut doc = minimal_document();
        doc["version"] = json!(2);
        let err = validate_document(&doc).unwrap_err();
        assert_eq!(err, SchemaError::UnsupportedVersion(2));
        assert!(err.to_string().contains("unsupported version 2"));
    }

    #[test]
    fn test_rejects_missing_core_column() {
        let mut doc = minimal_document();
        doc["board"]["columns"]
            .as_object_mut()
            .unwrap()
            .remove("doing");
        assert_eq!(
            validate_document(&doc),
            Err(SchemaError::MissingColumn(ColumnId::Doing))
        );
    }

    #[test]
    fn test_rejects_unknown_column() {
        let mut doc = minimal_document();
        doc["board"]["columns"]["backlog"] =
            json!({"id": "backlog", "title": "Backlog", "cardOrder": []});
        assert_eq!(
            validate_document(&doc),
            Err(SchemaError::UnknownColumn("backlog".to_string()))
        );
    }

    #[test]
    fn test_rejects_malformed_card_order() {
        let mut doc = minimal_document();
        doc["board"]["columns"]["todo"]["cardOrder"] = json!(["a", 7]);
        assert_eq!(
            validate_document(&doc),
            Err(SchemaError::MalformedCardOrder("todo".to_string()))
        );

        doc["board"]["columns"]["todo"]["cardOrder"] = json!("not-an-array");
        assert!(validate_document(&doc).is_err());
    }

    #[test]
    fn test_rejects_card_without_title() {
        let mut doc = minimal_document();
        doc["board"]["cards"]["c-1"] = json!({"id": "c-1", "title": "   "});
        assert_eq!(
            validate_document(&doc),
            Err(SchemaError::InvalidCardTitle("c-1".to_string()))
        );
    }

    #[test]
    fn test_archive_column_is_accepted() {
        let mut doc = minimal_document();
        doc["board"]["columns"]["archive"] =
            json!({"id": "archive", "title": "Archive", "cardOrder": []});
        assert_eq!(validate_document(&doc), Ok(()));
    }
}
