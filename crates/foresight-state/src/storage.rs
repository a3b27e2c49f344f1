//! Whole-state persistence.
//!
//! The aggregate is persisted as a single keyed JSON blob: every save is a
//! full-state overwrite (last-write-wins, concurrent writers unsupported),
//! and a corrupt or missing blob loads as the default empty state rather
//! than failing the caller.

use std::path::PathBuf;

use async_trait::async_trait;
use foresight_core::error::{ForesightError, Result};
use foresight_core::exploration::DemoState;
use tokio::sync::RwLock;
use tracing::warn;

/// Trait for whole-state load/save/reset backends.
#[async_trait]
pub trait StateStorage: Send + Sync {
    /// Load the persisted state, falling back to defaults when nothing is
    /// stored or the stored blob is unreadable. Never fails the caller.
    async fn load(&self) -> DemoState;

    /// Overwrite the persisted copy with the full state.
    async fn save(&self, state: &DemoState) -> Result<()>;

    /// Delete the persisted copy.
    async fn reset(&self) -> Result<()>;
}

/// Parse a persisted blob, recovering defaults from corrupt data.
///
/// Missing fields deserialize to their defaults, so blobs written by older
/// versions keep loading after fields are added.
fn parse_blob(raw: &str) -> DemoState {
    match serde_json::from_str(raw) {
        Ok(state) => state,
        Err(err) => {
            warn!("persisted state unreadable, falling back to defaults: {err}");
            DemoState::default()
        }
    }
}

/// JSON-file-backed storage.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Persist to the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StateStorage for JsonFileStorage {
    async fn load(&self) -> DemoState {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => parse_blob(&raw),
            Err(_) => DemoState::default(),
        }
    }

    async fn save(&self, state: &DemoState) -> Result<()> {
        let raw = serde_json::to_string(state)?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| ForesightError::Storage(e.to_string()))
    }

    async fn reset(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ForesightError::Storage(e.to_string())),
        }
    }
}

/// In-memory storage holding the serialized blob, for tests and ephemeral
/// sessions. Serializes on save so persistence round-trips are exercised.
#[derive(Default)]
pub struct InMemoryStorage {
    blob: RwLock<Option<String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a raw pre-seeded blob (possibly invalid, for tests).
    pub fn with_blob(raw: impl Into<String>) -> Self {
        Self {
            blob: RwLock::new(Some(raw.into())),
        }
    }
}

#[async_trait]
impl StateStorage for InMemoryStorage {
    async fn load(&self) -> DemoState {
        match self.blob.read().await.as_deref() {
            Some(raw) => parse_blob(raw),
            None => DemoState::default(),
        }
    }

    async fn save(&self, state: &DemoState) -> Result<()> {
        let raw = serde_json::to_string(state)?;
        *self.blob.write().await = Some(raw);
        Ok(())
    }

    async fn reset(&self) -> Result<()> {
        *self.blob.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::create_exploration;
    use foresight_core::types::Mode;

    #[tokio::test]
    async fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("state.json"));

        let mut state = DemoState::default();
        let id = create_exploration(&mut state, "round trip", Mode::Guided);
        storage.save(&state).await.unwrap();

        let loaded = storage.load().await;
        assert_eq!(loaded.explorations.len(), 1);
        assert_eq!(loaded.explorations[0].id, id);
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("missing.json"));
        assert_eq!(storage.load().await, DemoState::default());
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, "{not json at all")
            .await
            .unwrap();

        let storage = JsonFileStorage::new(path);
        assert_eq!(storage.load().await, DemoState::default());
    }

    #[tokio::test]
    async fn test_reset_removes_persisted_copy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let storage = JsonFileStorage::new(&path);

        storage.save(&DemoState::default()).await.unwrap();
        assert!(path.exists());

        storage.reset().await.unwrap();
        assert!(!path.exists());

        // Resetting again is fine.
        storage.reset().await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_storage_corrupt_blob_falls_back() {
        let storage = InMemoryStorage::with_blob("\"wrong shape\"");
        assert_eq!(storage.load().await, DemoState::default());
    }

    #[tokio::test]
    async fn test_forward_compatible_load() {
        // Blob written before some fields existed still loads.
        let storage = InMemoryStorage::with_blob("{\"explorations\": []}");
        let state = storage.load().await;
        assert!(state.preferable_futures.is_empty());
        assert!(state.signal_selections.is_empty());
    }
}
