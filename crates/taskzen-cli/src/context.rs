use std::path::{Path, PathBuf};

use taskzen_core::{AppConfig, TaskzenError, TaskzenResult};
use taskzen_domain::{seed, Board, BoardStore, Profile, ProfileId, ProfileRegistry};
use taskzen_persistence::{AtomicWriter, BoardRepository, JsonFileStore};

const REGISTRY_FILE: &str = "profiles.json";

/// One CLI invocation's view of the data directory: the profile registry,
/// the active profile's board behind a `BoardStore`, and the repository to
/// write it back. Every mutating handler calls `save` before printing, so a
/// command either persists its change or reports an error.
pub struct CliContext {
    dir: PathBuf,
    registry: ProfileRegistry,
    pub store: BoardStore,
    repository: BoardRepository<JsonFileStore>,
}

impl CliContext {
    pub async fn load(dir: PathBuf, seed_demo: bool) -> TaskzenResult<Self> {
        let mut registry = read_registry(&dir).await?;
        registry.ensure_default();

        let profile = registry
            .active()
            .ok_or_else(|| TaskzenError::Internal("no active profile".to_string()))?
            .clone();

        let repository = BoardRepository::new(JsonFileStore::new(board_path(&dir, &profile.slug)));
        let (board, fresh) = match repository.load().await? {
            Some(mut board) => {
                // The profile may have been renamed since the board was saved.
                board.profile_name = profile.name.clone();
                (board, false)
            }
            None if seed_demo => {
                tracing::info!(profile = %profile.slug, "seeding demo board");
                (seed::demo_board(&profile.name), true)
            }
            None => (Board::new(profile.name.as_str()), true),
        };

        let ctx = Self {
            dir,
            registry,
            store: BoardStore::new(board),
            repository,
        };
        if fresh {
            // First run for this profile: persist the starting board so the
            // slot exists before any mutation.
            ctx.save().await?;
        }
        Ok(ctx)
    }

    pub async fn save(&self) -> TaskzenResult<()> {
        write_registry(&self.dir, &self.registry).await?;
        self.repository.save(self.store.board()).await?;
        Ok(())
    }

    pub fn profiles(&self) -> &[Profile] {
        self.registry.profiles()
    }

    pub fn active_profile(&self) -> Option<&Profile> {
        self.registry.active()
    }

    pub async fn create_profile(&mut self, name: &str) -> TaskzenResult<Profile> {
        let id = self.registry.create(name)?;
        let profile = self
            .registry
            .get(id)
            .ok_or_else(|| TaskzenError::Internal("profile vanished after create".to_string()))?
            .clone();

        // Give the new profile an empty board slot right away so it shows up
        // even before the first switch.
        let repository =
            BoardRepository::new(JsonFileStore::new(board_path(&self.dir, &profile.slug)));
        repository.save(&Board::new(profile.name.as_str())).await?;
        write_registry(&self.dir, &self.registry).await?;
        Ok(profile)
    }

    pub async fn switch_profile(&mut self, id: ProfileId) -> TaskzenResult<Profile> {
        let profile = self.registry.switch(id)?.clone();
        write_registry(&self.dir, &self.registry).await?;
        Ok(profile)
    }

    pub async fn rename_profile(&mut self, id: ProfileId, name: &str) -> TaskzenResult<Profile> {
        self.registry.rename(id, name)?;
        let profile = self
            .registry
            .get(id)
            .ok_or_else(|| TaskzenError::Internal("profile vanished after rename".to_string()))?
            .clone();

        // Keep the stored board's display name in line with the registry.
        let repository = BoardRepository::new(JsonFileStore::new(board_path(&self.dir, &profile.slug)));
        if let Some(mut board) = repository.load().await? {
            board.profile_name = profile.name.clone();
            repository.save(&board).await?;
        }
        write_registry(&self.dir, &self.registry).await?;
        Ok(profile)
    }

    pub async fn delete_profile(&mut self, id: ProfileId) -> TaskzenResult<Profile> {
        let removed = self.registry.delete(id)?;

        let path = board_path(&self.dir, &removed.slug);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        write_registry(&self.dir, &self.registry).await?;
        Ok(removed)
    }
}

fn board_path(dir: &Path, slug: &str) -> PathBuf {
    dir.join(format!("{}.json", slug))
}

/// Resolve the data directory: flag/env first, then config, then the
/// platform default.
pub fn resolve_data_dir(flag: Option<PathBuf>, config: &AppConfig) -> TaskzenResult<PathBuf> {
    flag.or_else(|| config.effective_data_dir()).ok_or_else(|| {
        TaskzenError::Validation(
            "no data directory available; pass --dir or set TASKZEN_DIR".to_string(),
        )
    })
}

async fn read_registry(dir: &Path) -> TaskzenResult<ProfileRegistry> {
    let path = dir.join(REGISTRY_FILE);
    if !path.exists() {
        return Ok(ProfileRegistry::new());
    }
    let bytes = AtomicWriter::read_all(&path).await?;
    serde_json::from_slice(&bytes).map_err(|e| TaskzenError::Serialization(e.to_string()))
}

async fn write_registry(dir: &Path, registry: &ProfileRegistry) -> TaskzenResult<()> {
    let bytes = serde_json::to_vec_pretty(registry)
        .map_err(|e| TaskzenError::Serialization(e.to_string()))?;
    AtomicWriter::write_atomic(&dir.join(REGISTRY_FILE), &bytes).await
}
