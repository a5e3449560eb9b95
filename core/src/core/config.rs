use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::criteria::Kind;

use super::constants::{DEFAULT_CACHE_NAME, DEFAULT_TTL_SECS};

// =============================================================================
// Cache Backend Enum
// =============================================================================

/// Cache blob backend type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendType {
    #[default]
    Filesystem,
    Memory,
    S3,
}

impl fmt::Display for CacheBackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheBackendType::Filesystem => write!(f, "filesystem"),
            CacheBackendType::Memory => write!(f, "memory"),
            CacheBackendType::S3 => write!(f, "s3"),
        }
    }
}

// =============================================================================
// Cache Configuration
// =============================================================================

/// Configuration for one named cache service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Blob backend storing the entries
    #[serde(default)]
    pub backend: CacheBackendType,

    /// Base directory for the filesystem backend
    #[serde(default)]
    pub base_path: Option<PathBuf>,

    /// Time-to-live applied to uploaded entries, in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Bucket for the S3 backend
    #[serde(default)]
    pub s3_bucket: Option<String>,

    /// Key prefix for the S3 backend
    #[serde(default)]
    pub s3_prefix: Option<String>,

    /// Region for the S3 backend
    #[serde(default)]
    pub s3_region: Option<String>,

    /// Custom endpoint for S3-compatible services (MinIO etc.)
    #[serde(default)]
    pub s3_endpoint: Option<String>,
}

impl CacheConfig {
    /// Entry time-to-live as a [`Duration`]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackendType::default(),
            base_path: None,
            ttl_secs: DEFAULT_TTL_SECS,
            s3_bucket: None,
            s3_prefix: None,
            s3_region: None,
            s3_endpoint: None,
        }
    }
}

fn default_ttl_secs() -> u64 {
    DEFAULT_TTL_SECS
}

fn default_cache_name() -> String {
    DEFAULT_CACHE_NAME.to_string()
}

// =============================================================================
// View Configuration
// =============================================================================

/// Per-view configuration: column allow-list, TTL and cache selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewConfig {
    /// View name, also the directory prefix of its cache keys
    pub name: String,

    /// Time-to-live for this view's cached results, in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Registry name of the cache service this view uses
    #[serde(default = "default_cache_name")]
    pub cache: String,

    /// Allow-list mapping filterable column names to their expected kind;
    /// empty means the view accepts any criteria column
    #[serde(default)]
    pub columns: HashMap<String, Kind>,
}

impl ViewConfig {
    /// Result time-to-live as a [`Duration`]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Load view configurations from a JSON file
pub fn load_views(path: &Path) -> Result<Vec<ViewConfig>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read view config: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse view config: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_type_display() {
        assert_eq!(CacheBackendType::Filesystem.to_string(), "filesystem");
        assert_eq!(CacheBackendType::Memory.to_string(), "memory");
        assert_eq!(CacheBackendType::S3.to_string(), "s3");
    }

    #[test]
    fn test_cache_config_defaults() {
        let config: CacheConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.backend, CacheBackendType::Filesystem);
        assert_eq!(config.ttl_secs, DEFAULT_TTL_SECS);
        assert!(config.base_path.is_none());
    }

    #[test]
    fn test_view_config_deserialize() {
        let json = r#"{
            "name": "EVENTS",
            "ttl_secs": 60,
            "columns": { "ID": "int", "NAME": "string" }
        }"#;
        let view: ViewConfig = serde_json::from_str(json).unwrap();
        assert_eq!(view.name, "EVENTS");
        assert_eq!(view.ttl(), Duration::from_secs(60));
        assert_eq!(view.cache, DEFAULT_CACHE_NAME);
        assert_eq!(view.columns.get("ID"), Some(&Kind::Int));
        assert_eq!(view.columns.get("NAME"), Some(&Kind::String));
    }

    #[test]
    fn test_load_views_missing_file() {
        let result = load_views(Path::new("/nonexistent/views.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_views_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("views.json");
        fs::write(
            &path,
            r#"[{ "name": "FOOS", "columns": { "ID": "int" } }]"#,
        )
        .unwrap();

        let views = load_views(&path).unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].name, "FOOS");
    }
}
