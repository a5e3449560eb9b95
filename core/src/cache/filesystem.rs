//! Filesystem-based blob store implementation
//!
//! Stores cache entries as plain files under a base directory; the cache
//! key (`{view}/{fnv}_{digest}.cache`) maps directly to the relative path.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::backend::BlobStore;
use super::error::CacheError;

/// Filesystem-based blob store
#[derive(Debug, Clone)]
pub struct FilesystemStore {
    /// Base path under which all entries live
    base_path: PathBuf,
}

impl FilesystemStore {
    /// Create a new filesystem store rooted at `base_path`
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the full path for a cache key
    fn blob_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }

    /// Reject keys that would escape the base directory
    fn validate_key(key: &str) -> Result<(), CacheError> {
        let escapes = Path::new(key)
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)));
        if key.is_empty() || escapes {
            return Err(CacheError::Backend(format!("invalid cache key: {key}")));
        }
        Ok(())
    }

    /// Ensure parent directories exist for a blob path
    async fn ensure_parent_dirs(&self, path: &Path) -> Result<(), CacheError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for FilesystemStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Self::validate_key(key)?;

        let path = self.blob_path(key);

        // Read directly; map ENOENT to None instead of a separate exists()
        // check which would be a TOCTOU race.
        match fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::Io(e)),
        }
    }

    async fn put(&self, key: &str, data: Vec<u8>) -> Result<(), CacheError> {
        Self::validate_key(key)?;

        let path = self.blob_path(key);
        self.ensure_parent_dirs(&path).await?;
        fs::write(&path, &data).await?;

        tracing::debug!(
            key,
            size = data.len(),
            path = %path.display(),
            "Cache entry stored"
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        Self::validate_key(key)?;

        let path = self.blob_path(key);
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(key, "Cache entry deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::Io(e)),
        }
    }

    fn backend_name(&self) -> &'static str {
        "filesystem"
    }
}
