//! Board-level access on top of the raw storage slot.
//!
//! `BoardRepository` owns the board <-> bytes conversion so callers deal in
//! domain values only. Boards loaded from disk are normalized before use;
//! whatever was persisted, the placement invariant holds by the time a
//! caller sees the board.

use taskzen_core::TaskzenResult;
use taskzen_domain::Board;

use crate::serialization::JsonSerializer;
use crate::traits::{BoardStorage, PersistenceMetadata, Serializer, StoreSnapshot};

pub struct BoardRepository<S> {
    storage: S,
    serializer: JsonSerializer,
}

impl<S: BoardStorage> BoardRepository<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            serializer: JsonSerializer,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the stored board, or `None` on first run.
    pub async fn load(&self) -> TaskzenResult<Option<Board>> {
        if !self.storage.exists().await {
            return Ok(None);
        }
        let snapshot = self.storage.load().await?;
        let mut board: Board = self.serializer.deserialize(&snapshot.data)?;
        board.normalize();
        Ok(Some(board))
    }

    pub async fn save(&self, board: &Board) -> TaskzenResult<PersistenceMetadata> {
        let data = self.serializer.serialize(board)?;
        let snapshot = StoreSnapshot {
            data,
            metadata: PersistenceMetadata::new(),
        };
        self.storage.save(snapshot).await
    }
}
