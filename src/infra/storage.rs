//! Object storage for uploaded PDFs and submission media.
//!
//! The store is an external collaborator behind a narrow trait: callers
//! hand it a path and bytes and get back a public URL. Workflow code
//! writes the object first and only then records it in the database; a
//! failed record write leaves the object behind as an orphan for a later
//! cleanup pass rather than attempting a cross-store rollback.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::errors::{AppError, AppResult};

/// Storage contract: `put` must be durable before it returns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` at `path`, overwriting any existing object, and
    /// return the public URL it is served under.
    async fn put(&self, path: &str, bytes: Vec<u8>) -> AppResult<String>;
}

/// Local-disk storage serving objects from a media directory.
pub struct DiskStorage {
    root: PathBuf,
    base_url: String,
}

impl DiskStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    /// Reject traversal components so a caller-chosen path stays inside
    /// the media root.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let relative = Path::new(path);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || path.is_empty() {
            return Err(AppError::validation("Invalid storage path"));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStorage for DiskStorage {
    async fn put(&self, path: &str, bytes: Vec<u8>) -> AppResult<String> {
        let target = self.resolve(path)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::unavailable(format!("Storage write failed: {}", e)))?;
        }

        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| AppError::unavailable(format!("Storage write failed: {}", e)))?;

        tracing::debug!(path = %path, "Stored object");

        Ok(format!("{}/{}", self.base_url.trim_end_matches('/'), path))
    }
}
