//! Blob store trait definition

use async_trait::async_trait;

use super::error::CacheError;

/// Byte-addressable blob store backing a cache service
///
/// The cache embeds expiry metadata in the payload itself, so a backend
/// needs no native TTL support; any store with get/put/delete semantics
/// works. Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch the blob at `key`
    ///
    /// Returns `None` when no object exists at that location.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Write `data` at `key`, overwriting any existing blob
    async fn put(&self, key: &str, data: Vec<u8>) -> Result<(), CacheError>;

    /// Remove the blob at `key`
    ///
    /// Does not fail if no object exists at that location.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Backend name for debugging/logging
    fn backend_name(&self) -> &'static str;
}
