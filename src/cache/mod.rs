//! Cache Module
//!
//! Provides an in-memory key/value store with TTL expiration and lazy eviction.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry, CacheValue, NO_EXPIRATION};
pub use stats::CacheStats;
pub use store::CacheStore;
