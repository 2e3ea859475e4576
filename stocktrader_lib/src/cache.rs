//! In-memory TTL cache backed by `DashMap`.

use std::time::{Duration, Instant};

use dashmap::DashMap;

struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// Thread-safe in-memory cache with per-entry time-to-live.
///
/// Values are serialized JSON strings; the caller owns the (de)serialization.
/// An expired entry is evicted on the `get` that observes it.
pub struct MemoryCache {
    store: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached value for `key`, or `None` if missing or expired.
    pub fn get(&self, key: &str) -> Option<String> {
        let entry = self.store.get(key)?;
        if Instant::now() > entry.expires_at {
            drop(entry);
            self.store.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    /// Inserts or overwrites an entry, expiring after the configured TTL.
    pub fn set(&self, key: String, value: String) {
        self.store.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drops a single entry, if present. Used to invalidate stale reads
    /// after a successful write to the server.
    pub fn remove(&self, key: &str) {
        self.store.remove(key);
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
