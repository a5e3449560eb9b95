// =============================================================================
// Criteria Limits
// =============================================================================

/// Maximum size of a criteria string in bytes (64KB)
pub const MAX_CRITERIA_SIZE: usize = 64 * 1024;

/// Default separator for multi-value query parameters
pub const DEFAULT_VALUE_SEPARATOR: char = ',';

// =============================================================================
// Cache Layout
// =============================================================================

/// Length of the decimal nanosecond-epoch expiry prefix stored ahead of
/// every cached payload
pub const EXPIRY_PREFIX_LEN: usize = 19;

/// File extension for cache entries
pub const CACHE_FILE_EXTENSION: &str = "cache";

// =============================================================================
// Cache Defaults
// =============================================================================

/// Default time-to-live for cached results, in seconds
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Registry name a view uses when none is configured
pub const DEFAULT_CACHE_NAME: &str = "default";
