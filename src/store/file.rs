//! File-backed snapshot persistence.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use super::snapshot::Snapshot;

/// Persistence failures, kept distinct from engine state: a failed load
/// never corrupts the in-memory engine.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot not found at {0}")]
    NotFound(PathBuf),
    #[error("snapshot io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Storage seam for engine snapshots.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError>;
    async fn load(&self) -> Result<Snapshot, SnapshotError>;
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let encoded = serde_json::to_vec_pretty(snapshot)?;
        tokio::fs::write(&self.path, encoded).await?;
        info!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }

    async fn load(&self) -> Result<Snapshot, SnapshotError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(SnapshotError::NotFound(self.path.clone()));
            }
            Err(error) => return Err(SnapshotError::Io(error)),
        };
        let snapshot = serde_json::from_slice(&raw)?;
        info!(path = %self.path.display(), "snapshot loaded");
        Ok(snapshot)
    }
}
