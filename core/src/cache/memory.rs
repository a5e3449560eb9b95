//! In-memory blob store implementation using dashmap
//!
//! Mainly used in tests and for single-process deployments where cache
//! persistence across restarts is not needed.

use async_trait::async_trait;
use dashmap::DashMap;

use super::backend::BlobStore;
use super::error::CacheError;

/// In-memory blob store
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: DashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.objects.get(key).map(|entry| entry.clone()))
    }

    async fn put(&self, key: &str, data: Vec<u8>) -> Result<(), CacheError> {
        self.objects.insert(key.to_string(), data);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.objects.remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
