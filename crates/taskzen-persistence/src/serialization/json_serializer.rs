use crate::traits::Serializer;
use taskzen_core::{TaskzenError, TaskzenResult};

/// Pretty-printed JSON serialization for domain models.
pub struct JsonSerializer;

impl<T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync> Serializer<T>
    for JsonSerializer
{
    fn serialize(&self, data: &T) -> TaskzenResult<Vec<u8>> {
        serde_json::to_vec_pretty(data).map_err(|e| TaskzenError::Serialization(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> TaskzenResult<T> {
        serde_json::from_slice(bytes).map_err(|e| TaskzenError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskzen_domain::Board;

    #[test]
    fn test_board_round_trip() {
        let serializer = JsonSerializer;
        let board = Board::new("default");

        let bytes = serializer.serialize(&board).unwrap();
        let restored: Board = serializer.deserialize(&bytes).unwrap();

        assert_eq!(board, restored);
    }

    #[test]
    fn test_output_is_pretty_printed() {
        let serializer = JsonSerializer;
        let board = Board::new("default");

        let bytes = serializer.serialize(&board).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains("profileName"));
    }
}
