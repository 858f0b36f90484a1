//! Cache Store Module
//!
//! Main cache engine combining namespaced HashMap storage with TTL expiration
//! and LRU eviction at insertion time.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::lru::{least_recently_used, AccessClock};
use crate::cache::stats::CacheCounters;
use crate::cache::{CacheEntry, CacheKey, CacheStats};

// == Cache Store ==
/// Namespaced cache storage with LRU eviction and TTL support.
///
/// One instance is meant to be shared by every consumer in the process; wrap
/// it in [`SharedCache`](crate::cache::SharedCache) and hand out clones.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<CacheKey, CacheEntry<V>>,
    /// Recency stamps for LRU selection
    clock: AccessClock,
    /// Performance counters
    counters: CacheCounters,
    /// Maximum number of entries allowed
    max_size: usize,
    /// TTL applied by [`set`](Self::set)
    default_ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// # Arguments
    /// * `max_size` - Maximum number of entries the cache can hold
    /// * `default_ttl` - TTL for entries stored without an explicit one
    pub fn new(max_size: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            clock: AccessClock::new(),
            counters: CacheCounters::default(),
            max_size,
            default_ttl,
        }
    }

    // == Get ==
    /// Retrieves a value, refreshing its recency on a hit.
    ///
    /// Expired entries are removed on the spot and counted as misses.
    pub fn get(&mut self, namespace: &str, id: &str) -> Option<V> {
        let key = CacheKey::new(namespace, id);
        let now = current_timestamp_ms();

        let expired = match self.entries.get(&key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                self.counters.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(&key);
            self.counters.record_miss();
            debug!(key = %key, "Lazily evicted expired entry");
            return None;
        }

        let seq = self.clock.tick();
        let entry = self.entries.get_mut(&key)?;
        entry.touch(seq);
        self.counters.record_hit();
        Some(entry.value.clone())
    }

    // == Has ==
    /// Returns whether a live value exists.
    ///
    /// NOT a pure probe: this is `get(..).is_some()`, so it counts a hit or
    /// miss, refreshes recency and removes an expired entry. Use
    /// [`peek`](Self::peek) to look without touching anything.
    pub fn has(&mut self, namespace: &str, id: &str) -> bool {
        self.get(namespace, id).is_some()
    }

    // == Peek ==
    /// Side-effect-free lookup. Expired entries read as absent but are left
    /// in place for `get` or `cleanup` to reclaim.
    pub fn peek(&self, namespace: &str, id: &str) -> Option<&V> {
        let now = current_timestamp_ms();
        self.entries
            .get(&CacheKey::new(namespace, id))
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| &entry.value)
    }

    // == Set ==
    /// Stores a value under the default TTL.
    pub fn set(&mut self, namespace: &str, id: impl Into<String>, value: V) {
        let ttl = self.default_ttl;
        self.set_with_ttl(namespace, id, value, ttl);
    }

    /// Stores a value expiring `ttl` from now.
    ///
    /// Overwriting an existing key resets its TTL and never evicts. Inserting
    /// a new key into a full cache first evicts the least recently used entry.
    pub fn set_with_ttl(
        &mut self,
        namespace: &str,
        id: impl Into<String>,
        value: V,
        ttl: Duration,
    ) {
        self.counters.record_set();
        if self.max_size == 0 {
            return;
        }

        let key = CacheKey::new(namespace, id);

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_size {
            if let Some(victim) = least_recently_used(&self.entries) {
                self.entries.remove(&victim);
                self.counters.record_eviction();
                debug!(key = %victim, "Evicted least recently used entry");
            }
        }

        let entry = CacheEntry::new(&key, value, ttl, self.clock.tick());
        self.entries.insert(key, entry);
    }

    // == Delete ==
    /// Removes an entry. Returns whether anything was removed.
    pub fn delete(&mut self, namespace: &str, id: &str) -> bool {
        self.entries.remove(&CacheKey::new(namespace, id)).is_some()
    }

    // == Clear Namespace ==
    /// Removes every entry in `namespace`, returning how many were removed.
    pub fn clear_namespace(&mut self, namespace: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.namespace != namespace);
        let removed = before - self.entries.len();
        debug!(namespace, removed, "Cleared namespace");
        removed
    }

    // == Clear ==
    /// Removes everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.counters.record_clear();
    }

    // == Cleanup ==
    /// Removes all expired entries, returning the number removed.
    ///
    /// Only reclaims memory; `get` never depends on it having run.
    pub fn cleanup(&mut self) -> usize {
        let now = current_timestamp_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    // == Batch Get ==
    /// Looks up several ids in one namespace. Missing or expired ids are
    /// omitted from the result; each lookup counts like a `get`.
    pub fn batch_get<I, S>(&mut self, namespace: &str, ids: I) -> HashMap<String, V>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter()
            .filter_map(|id| {
                let id = id.as_ref();
                self.get(namespace, id).map(|value| (id.to_string(), value))
            })
            .collect()
    }

    // == Batch Set ==
    /// Applies `set` for every pair in iteration order. `None` uses the
    /// default TTL.
    pub fn batch_set<I, K>(&mut self, namespace: &str, entries: I, ttl: Option<Duration>)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        let ttl = ttl.unwrap_or(self.default_ttl);
        for (id, value) in entries {
            self.set_with_ttl(namespace, id, value, ttl);
        }
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats::snapshot(&self.counters, self.entries.len(), self.max_size)
    }

    // == Accessors ==
    /// Returns the current number of entries, expired-but-unreclaimed included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}
