//! Result cache
//!
//! Content-addressed, TTL-based caching of query results over pluggable
//! blob backends:
//! - Filesystem (default) - plain files under a base directory
//! - Memory - dashmap, for tests and single-process deployments
//! - S3 - AWS S3 or compatible object stores
//!
//! Keys are derived from the view name and the fully-resolved SQL text
//! ([`cache_key`]); entries embed their expiry instant and are purged
//! lazily on read ([`CacheStore`]). Named instances are held by a
//! [`CacheRegistry`].

mod backend;
mod error;
mod filesystem;
mod key;
mod memory;
mod registry;
mod s3;
mod store;

use std::sync::Arc;

pub use backend::BlobStore;
pub use error::CacheError;
pub use filesystem::FilesystemStore;
pub use key::{cache_key, resolve_sql};
pub use memory::MemoryStore;
pub use registry::CacheRegistry;
pub use s3::S3Store;
pub use store::CacheStore;

use crate::core::config::{CacheBackendType, CacheConfig};

/// Build a cache store from configuration
///
/// Backend selection fails fast on missing settings so misconfiguration
/// surfaces at startup rather than per request.
pub async fn build_store(config: &CacheConfig) -> Result<CacheStore, CacheError> {
    let backend: Arc<dyn BlobStore> = match config.backend {
        CacheBackendType::Filesystem => {
            let base_path = config.base_path.clone().ok_or_else(|| {
                CacheError::Config("base_path required for filesystem backend".into())
            })?;
            tracing::debug!(path = %base_path.display(), "Initializing filesystem cache backend");
            Arc::new(FilesystemStore::new(base_path))
        }
        CacheBackendType::Memory => {
            tracing::debug!("Initializing in-memory cache backend");
            Arc::new(MemoryStore::new())
        }
        CacheBackendType::S3 => {
            let bucket = config
                .s3_bucket
                .clone()
                .ok_or_else(|| CacheError::Config("s3_bucket required for S3 backend".into()))?;
            let prefix = config.s3_prefix.clone().unwrap_or_default();
            Arc::new(
                S3Store::new(
                    bucket,
                    prefix,
                    config.s3_region.clone(),
                    config.s3_endpoint.clone(),
                )
                .await?,
            )
        }
    };

    Ok(CacheStore::new(backend, config.ttl()))
}
