use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{BoardStorage, PersistenceMetadata, StoreSnapshot, STORAGE_FORMAT_VERSION};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use taskzen_core::{TaskzenError, TaskzenResult};

/// JSON file slot for one board.
///
/// The file is a versioned envelope around the board payload, so the format
/// can evolve without guessing at the contents of old files.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonEnvelope {
    version: u32,
    metadata: PersistenceMetadata,
    data: serde_json::Value,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl BoardStorage for JsonFileStore {
    async fn save(&self, mut snapshot: StoreSnapshot) -> TaskzenResult<PersistenceMetadata> {
        snapshot.metadata.saved_at = chrono::Utc::now();

        let data_value: serde_json::Value = serde_json::from_slice(&snapshot.data)
            .map_err(|e| TaskzenError::Serialization(e.to_string()))?;
        let envelope = JsonEnvelope {
            version: STORAGE_FORMAT_VERSION,
            metadata: snapshot.metadata.clone(),
            data: data_value,
        };

        let json_bytes = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| TaskzenError::Serialization(e.to_string()))?;

        AtomicWriter::write_atomic(&self.path, &json_bytes).await?;

        tracing::info!("saved {} bytes to {}", json_bytes.len(), self.path.display());

        Ok(snapshot.metadata)
    }

    async fn load(&self) -> TaskzenResult<StoreSnapshot> {
        let file_bytes = AtomicWriter::read_all(&self.path).await?;

        let envelope: JsonEnvelope = serde_json::from_slice(&file_bytes)
            .map_err(|e| TaskzenError::Serialization(e.to_string()))?;

        if envelope.version != STORAGE_FORMAT_VERSION {
            return Err(TaskzenError::Serialization(format!(
                "unsupported storage format version: {}",
                envelope.version
            )));
        }

        let data = serde_json::to_vec(&envelope.data)
            .map_err(|e| TaskzenError::Serialization(e.to_string()))?;

        tracing::info!("loaded {} bytes from {}", file_bytes.len(), self.path.display());

        Ok(StoreSnapshot {
            data,
            metadata: envelope.metadata,
        })
    }

    async fn exists(&self) -> bool {
        self.path.exists()
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
