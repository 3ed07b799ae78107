//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::any::Any;
use std::sync::Arc;

use chrono::Utc;

/// Type-erased payload held by the cache.
///
/// Readers receive a clone of the `Arc`, never a copy of the payload.
pub type CacheValue = Arc<dyn Any + Send + Sync>;

/// TTL sentinel for entries that never expire.
pub const NO_EXPIRATION: i64 = -1;

// == Cache Entry ==
/// Represents a single cache entry with value and expiration contract.
///
/// The shape is fixed at construction; replacing a key stores a new entry.
#[derive(Clone)]
pub struct CacheEntry {
    key: String,
    value: CacheValue,
    /// TTL in milliseconds, <= 0 = no expiration
    ttl_ms: i64,
    /// Creation timestamp (Unix milliseconds)
    created_at: i64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    ///
    /// # Arguments
    /// * `key` - The key the entry is stored under
    /// * `value` - The payload
    /// * `ttl_ms` - TTL in milliseconds; zero or negative never expires
    pub fn new(key: impl Into<String>, value: CacheValue, ttl_ms: i64) -> Self {
        Self {
            key: key.into(),
            value,
            ttl_ms,
            created_at: current_timestamp_ms(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn ttl_ms(&self) -> i64 {
        self.ttl_ms
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    // == Value ==
    /// Returns the payload, or `None` once the entry has expired.
    pub fn value(&self) -> Option<&CacheValue> {
        if self.is_expired() {
            None
        } else {
            Some(&self.value)
        }
    }

    /// Returns the payload regardless of expiration.
    ///
    /// The store uses this after it has already decided the entry is live, so
    /// the decision and the read are made against the same instant.
    pub fn raw_value(&self) -> &CacheValue {
        &self.value
    }

    // == Is Expired ==
    /// Checks if the entry has expired relative to `now_ms`.
    ///
    /// Only a strictly positive TTL can expire, and the boundary is strict:
    /// an entry is still live at exactly `created_at + ttl_ms`.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.ttl_ms > 0 && now_ms > self.created_at.saturating_add(self.ttl_ms)
    }

    /// Checks if the entry has expired relative to the wall clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Returns the expiration timestamp, or None if the entry never expires.
    pub fn expires_at(&self) -> Option<i64> {
        (self.ttl_ms > 0).then(|| self.created_at.saturating_add(self.ttl_ms))
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(0)` if the entry has expired (TTL elapsed)
    /// - `Some(remaining_ms)` if the entry has TTL and hasn't expired
    /// - `None` if the entry has no TTL (never expires)
    pub fn ttl_remaining_ms(&self) -> Option<i64> {
        self.expires_at()
            .map(|expires| (expires - current_timestamp_ms()).max(0))
    }
}

impl std::fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheEntry")
            .field("key", &self.key)
            .field("ttl_ms", &self.ttl_ms)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}
