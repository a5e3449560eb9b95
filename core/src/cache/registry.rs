//! Named cache service registry
//!
//! Maps registry names to cache store instances so views can select their
//! cache by name. Instances are constructed explicitly and passed around
//! by the caller; there is no process-global registry, which keeps tests
//! isolated and allows several independent registries per process.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::error::CacheError;
use super::store::CacheStore;

/// Concurrent name-to-service registry for cache stores
#[derive(Debug, Default)]
pub struct CacheRegistry {
    services: RwLock<HashMap<String, Arc<CacheStore>>>,
}

impl CacheRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `service` under `name`, replacing any previous registration
    pub fn register(&self, name: impl Into<String>, service: Arc<CacheStore>) {
        let name = name.into();
        tracing::debug!(name = %name, backend = service.backend_name(), "Cache service registered");
        self.services.write().insert(name, service);
    }

    /// Look up the service registered under `name`
    pub fn get(&self, name: &str) -> Result<Arc<CacheStore>, CacheError> {
        self.services
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| CacheError::UnknownService(name.to_string()))
    }

    /// Remove the registration under `name`, returning the service if any
    pub fn remove(&self, name: &str) -> Option<Arc<CacheStore>> {
        self.services.write().remove(name)
    }

    /// Names of all registered services, in no particular order
    pub fn keys(&self) -> Vec<String> {
        self.services.read().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::cache::memory::MemoryStore;

    fn service() -> Arc<CacheStore> {
        Arc::new(CacheStore::new(
            Arc::new(MemoryStore::new()),
            Duration::from_secs(60),
        ))
    }

    #[test]
    fn test_register_and_get() {
        let registry = CacheRegistry::new();
        registry.register("default", service());

        let found = registry.get("default").unwrap();
        assert_eq!(found.backend_name(), "memory");
    }

    #[test]
    fn test_get_unknown_is_an_error() {
        let registry = CacheRegistry::new();
        assert!(matches!(
            registry.get("missing"),
            Err(CacheError::UnknownService(_))
        ));
    }

    #[test]
    fn test_remove() {
        let registry = CacheRegistry::new();
        registry.register("default", service());

        assert!(registry.remove("default").is_some());
        assert!(registry.remove("default").is_none());
        assert!(registry.get("default").is_err());
    }

    #[test]
    fn test_keys_unordered() {
        let registry = CacheRegistry::new();
        registry.register("a", service());
        registry.register("b", service());

        let mut keys = registry.keys();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_register_replaces() {
        let registry = CacheRegistry::new();
        registry.register("default", service());
        registry.register("default", service());
        assert_eq!(registry.keys().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_access() {
        let registry = Arc::new(CacheRegistry::new());

        let mut handles = Vec::new();
        for i in 0..8 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                let name = format!("cache-{i}");
                registry.register(name.clone(), service());
                registry.get(&name).unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(registry.keys().len(), 8);
    }
}
