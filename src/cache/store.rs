//! Cache Store Module
//!
//! Main cache engine: a mutex-guarded HashMap with lazy TTL eviction.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::cache::{current_timestamp_ms, CacheEntry, CacheStats, CacheValue, NO_EXPIRATION};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Store State ==
/// Everything behind the lock: entries and the counters they drive.
#[derive(Debug)]
struct StoreState {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
}

impl StoreState {
    /// Returns the entry for `key` if it is live at `now`.
    ///
    /// An expired entry is removed here, at the moment it is observed.
    fn live_entry(&mut self, key: &str, now: i64) -> Option<&CacheEntry> {
        if self.entries.get(key)?.is_expired_at(now) {
            self.entries.remove(key);
            self.stats.record_expiration();
            debug!(key, "evicted expired cache entry");
            return None;
        }
        self.entries.get(key)
    }

    /// Removes every entry expired at `now`. Returns the number removed.
    fn sweep(&mut self, now: i64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, entry| {
            let expired = entry.is_expired_at(now);
            if expired {
                trace!(key = %key, "sweeping expired cache entry");
            }
            !expired
        });

        let removed = before - self.entries.len();
        self.stats.expirations += removed as u64;
        if removed > 0 {
            debug!(removed, "swept expired cache entries");
        }
        removed
    }
}

// == Cache Store ==
/// Concurrency-safe key/value store with TTL expiration.
///
/// There is no background sweeper. An expired entry stays in the map until a
/// read touches it, `size`/`size_with_prefix` sweep it, or a clear removes it.
///
/// Build one at startup and share it as `Arc<CacheStore>`.
#[derive(Debug)]
pub struct CacheStore {
    state: Mutex<StoreState>,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore {
    // == Constructors ==
    /// Creates an empty store with the default configuration.
    pub fn new() -> Self {
        Self::from_config(&CacheConfig::default())
    }

    /// Creates an empty store sized from `config`.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            state: Mutex::new(StoreState {
                entries: HashMap::with_capacity(config.initial_capacity),
                stats: CacheStats::new(),
            }),
        }
    }

    /// Creates an empty store ready to be handed to several owners.
    pub fn shared(config: &CacheConfig) -> Arc<Self> {
        Arc::new(Self::from_config(config))
    }

    // == Put ==
    /// Stores a value that never expires, replacing any existing entry.
    pub fn put<V>(&self, key: impl Into<String>, value: V)
    where
        V: Any + Send + Sync,
    {
        self.put_value(key, Arc::new(value), NO_EXPIRATION);
    }

    /// Stores a value with a TTL in milliseconds, replacing any existing entry.
    ///
    /// A TTL of zero or less never expires.
    pub fn put_with_ttl<V>(&self, key: impl Into<String>, value: V, ttl_ms: i64)
    where
        V: Any + Send + Sync,
    {
        self.put_value(key, Arc::new(value), ttl_ms);
    }

    /// Stores an already type-erased value.
    ///
    /// The replacement is a brand new entry, so its TTL clock starts now.
    pub fn put_value(&self, key: impl Into<String>, value: CacheValue, ttl_ms: i64) {
        let key = key.into();
        let mut state = self.state.lock();
        let entry = CacheEntry::new(key.clone(), value, ttl_ms);
        trace!(key = %key, ttl_ms, "storing cache entry");
        state.entries.insert(key, entry);
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns None for a key that was never stored and for one whose TTL has
    /// elapsed; the expired entry is evicted as part of this call.
    pub fn get(&self, key: &str) -> Option<CacheValue> {
        let mut state = self.state.lock();
        let now = current_timestamp_ms();
        let value = state
            .live_entry(key, now)
            .map(|entry| Arc::clone(entry.raw_value()));

        if value.is_some() {
            state.stats.record_hit();
        } else {
            state.stats.record_miss();
        }
        value
    }

    /// Retrieves a value by key as a concrete type.
    ///
    /// # Errors
    /// `CacheError::TypeMismatch` if the stored value is not a `T`. The entry
    /// is left in place.
    pub fn get_as<T>(&self, key: &str) -> Result<Option<Arc<T>>>
    where
        T: Any + Send + Sync,
    {
        match self.get(key) {
            Some(value) => value
                .downcast::<T>()
                .map(Some)
                .map_err(|_| CacheError::type_mismatch::<T>(key)),
            None => Ok(None),
        }
    }

    /// Retrieves a string, stored either as `String` or `&'static str`.
    pub fn get_string(&self, key: &str) -> Result<Option<String>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };

        if let Some(s) = value.downcast_ref::<String>() {
            Ok(Some(s.clone()))
        } else if let Some(s) = value.downcast_ref::<&'static str>() {
            Ok(Some((*s).to_string()))
        } else {
            Err(CacheError::type_mismatch::<String>(key))
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        self.get_copied(key)
    }

    pub fn get_i32(&self, key: &str) -> Result<Option<i32>> {
        self.get_copied(key)
    }

    pub fn get_i64(&self, key: &str) -> Result<Option<i64>> {
        self.get_copied(key)
    }

    fn get_copied<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: Any + Send + Sync + Copy,
    {
        Ok(self.get_as::<T>(key)?.map(|value| *value))
    }

    // == Introspection ==
    /// Returns true if `key` holds a live entry.
    ///
    /// Evicts the entry if it has expired, but does not count as a read.
    pub fn contains_key(&self, key: &str) -> bool {
        let mut state = self.state.lock();
        state.live_entry(key, current_timestamp_ms()).is_some()
    }

    /// Returns the remaining TTL of a live entry in milliseconds.
    ///
    /// # Returns
    /// - `None` if the key is absent or expired
    /// - `Some(NO_EXPIRATION)` if the entry never expires
    /// - `Some(remaining_ms)` otherwise
    pub fn ttl_remaining_ms(&self, key: &str) -> Option<i64> {
        let mut state = self.state.lock();
        let now = current_timestamp_ms();
        state.live_entry(key, now).map(|entry| {
            entry
                .expires_at()
                .map_or(NO_EXPIRATION, |expires| expires - now)
        })
    }

    // == Remove ==
    /// Removes an entry by key. Removing a missing key is a no-op.
    pub fn remove(&self, key: &str) {
        self.state.lock().entries.remove(key);
    }

    // == Clear ==
    /// Removes every entry. Statistics are kept.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        let removed = state.entries.len();
        state.entries.clear();
        debug!(removed, "cleared cache");
    }

    /// Removes every entry whose key starts with `prefix`, live or expired.
    ///
    /// Returns the number of entries removed.
    pub fn clear_key_starts_with(&self, prefix: &str) -> usize {
        let mut state = self.state.lock();
        let before = state.entries.len();
        state.entries.retain(|key, _| !key.starts_with(prefix));

        let removed = before - state.entries.len();
        debug!(prefix, removed, "cleared cache entries by prefix");
        removed
    }

    // == Size ==
    /// Sweeps out every expired entry and returns how many remain.
    pub fn size(&self) -> usize {
        let mut state = self.state.lock();
        state.sweep(current_timestamp_ms());
        state.entries.len()
    }

    /// Sweeps out every expired entry and counts the live keys starting
    /// with `prefix`.
    pub fn size_with_prefix(&self, prefix: &str) -> usize {
        let mut state = self.state.lock();
        state.sweep(current_timestamp_ms());
        state
            .entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .count()
    }

    /// Returns the live keys starting with `prefix`, sorted.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut state = self.state.lock();
        state.sweep(current_timestamp_ms());

        let mut keys: Vec<String> = state
            .entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort_unstable();
        keys
    }

    // == Stats ==
    /// Returns a snapshot of the access statistics.
    ///
    /// Does not sweep, so `total_entries` may include expired entries.
    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        let mut stats = state.stats.clone();
        stats.set_total_entries(state.entries.len());
        stats
    }

    /// Zeroes the hit, miss and expiration counters.
    pub fn reset_stats(&self) {
        self.state.lock().stats = CacheStats::new();
    }
}
