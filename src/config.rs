//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;

/// Default number of slots reserved in the entry map.
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// Cache configuration parameters.
///
/// Values can be configured via environment variables with sensible defaults.
/// Nothing here changes expiration semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Number of entries the map is pre-sized for
    pub initial_capacity: usize,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_INITIAL_CAPACITY` - Pre-allocated map capacity (default: 64)
    pub fn from_env() -> Self {
        Self {
            initial_capacity: env::var("CACHE_INITIAL_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_INITIAL_CAPACITY),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}
