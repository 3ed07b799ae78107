//! Expiring Cache - A process-wide in-memory key/value cache
//!
//! Stores type-erased values with optional TTL expiration. Expired entries are
//! evicted lazily: on read, on a full sweep (`size`), or by a prefix clear.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheEntry, CacheStats, CacheStore, CacheValue, NO_EXPIRATION};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
