use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use taskzen_core::TaskzenResult;

#[cfg(test)]
use mockall::automock;

/// On-disk envelope version written by this build.
pub const STORAGE_FORMAT_VERSION: u32 = 1;

/// Metadata recorded alongside every saved snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistenceMetadata {
    /// Version of the on-disk envelope format.
    pub format_version: u32,
    /// When this data was saved.
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new() -> Self {
        Self {
            format_version: STORAGE_FORMAT_VERSION,
            saved_at: Utc::now(),
        }
    }
}

impl Default for PersistenceMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time capture of the serialized board, ready to persist.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    /// Raw JSON bytes of the board.
    pub data: Vec<u8>,
    pub metadata: PersistenceMetadata,
}

/// Abstract storage slot for board snapshots. Implementations handle the
/// actual backend (JSON file today, anything durable tomorrow).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BoardStorage: Send + Sync {
    /// Save a snapshot to the slot.
    async fn save(&self, snapshot: StoreSnapshot) -> TaskzenResult<PersistenceMetadata>;

    /// Load the current snapshot from the slot.
    async fn load(&self) -> TaskzenResult<StoreSnapshot>;

    /// Whether the slot holds any data yet.
    async fn exists(&self) -> bool;

    /// Path of the backing slot.
    fn path(&self) -> &Path;
}

/// Serialization strategy, so the storage layer never assumes a format.
pub trait Serializer<T: Send + Sync>: Send + Sync {
    fn serialize(&self, data: &T) -> TaskzenResult<Vec<u8>>;

    fn deserialize(&self, bytes: &[u8]) -> TaskzenResult<T>;
}
