//! TTL-aware cache store over a pluggable blob backend
//!
//! Every uploaded entry is prefixed with its absolute expiry instant as a
//! fixed 19-character decimal nanosecond-epoch string, so the prefix is
//! self-delimiting and any byte-addressable backend works without native
//! TTL support. Expiration is lazy: an expired entry is discovered and
//! purged on read; there is no background sweeper.
//!
//! Concurrent misses for the same key are not de-duplicated; both callers
//! re-execute and the last upload wins, which is benign for idempotent
//! payloads.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::core::constants::EXPIRY_PREFIX_LEN;

use super::backend::BlobStore;
use super::error::CacheError;

/// TTL cache store
pub struct CacheStore {
    backend: Arc<dyn BlobStore>,
    ttl: Duration,
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("backend", &self.backend.backend_name())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl CacheStore {
    /// Create a cache store over `backend` with a fixed entry TTL
    pub fn new(backend: Arc<dyn BlobStore>, ttl: Duration) -> Self {
        Self { backend, ttl }
    }

    /// Entry time-to-live
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Name of the underlying blob backend
    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    /// Store `payload` at `key`, valid for the configured TTL
    pub async fn upload(&self, key: &str, payload: &[u8]) -> Result<(), CacheError> {
        let expires_at = epoch_nanos(SystemTime::now() + self.ttl);
        let mut blob = Vec::with_capacity(EXPIRY_PREFIX_LEN + payload.len());
        blob.extend_from_slice(format!("{expires_at:019}").as_bytes());
        blob.extend_from_slice(payload);
        self.backend.put(key, blob).await
    }

    /// Fetch the payload at `key`
    ///
    /// Returns `None` when no entry exists or the entry has expired; an
    /// expired entry is deleted before returning.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let Some(blob) = self.backend.get(key).await? else {
            return Ok(None);
        };

        let expires_at = parse_expiry(&blob, key)?;
        if epoch_nanos(SystemTime::now()) > expires_at {
            self.backend.delete(key).await?;
            tracing::debug!(key, "Expired cache entry purged");
            return Ok(None);
        }

        Ok(Some(blob[EXPIRY_PREFIX_LEN..].to_vec()))
    }

    /// Remove the entry at `key` unconditionally
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.backend.delete(key).await
    }
}

fn epoch_nanos(t: SystemTime) -> u64 {
    t.duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos() as u64
}

/// Parse the fixed-width decimal expiry prefix of a stored blob
fn parse_expiry(blob: &[u8], key: &str) -> Result<u64, CacheError> {
    let Some(prefix) = blob.get(..EXPIRY_PREFIX_LEN) else {
        return Err(CacheError::corrupt(key, "entry shorter than expiry prefix"));
    };
    std::str::from_utf8(prefix)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .ok_or_else(|| CacheError::corrupt(key, "non-decimal expiry prefix"))
}
