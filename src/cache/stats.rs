//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, sets and evictions.

use std::fmt;

use serde::Serialize;

// == Cache Counters ==
/// Running counters owned by the store.
#[derive(Debug, Clone, Default)]
pub(crate) struct CacheCounters {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub evictions: u64,
    pub clears: u64,
}

impl CacheCounters {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_set(&mut self) {
        self.sets += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_clear(&mut self) {
        self.clears += 1;
    }
}

// == Cache Stats ==
/// Snapshot of cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Current number of entries in the cache
    pub size: usize,
    /// Configured capacity
    pub max_size: usize,
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of `set` calls
    pub sets: u64,
    /// Number of entries evicted due to LRU policy
    pub evictions: u64,
    /// Number of full clears
    pub clears: u64,
    /// hits / (hits + misses), 0.0 before any lookup
    pub hit_rate: f64,
}

impl CacheStats {
    pub(crate) fn snapshot(counters: &CacheCounters, size: usize, max_size: usize) -> Self {
        Self {
            size,
            max_size,
            hits: counters.hits,
            misses: counters.misses,
            sets: counters.sets,
            evictions: counters.evictions,
            clears: counters.clears,
            hit_rate: hit_rate(counters.hits, counters.misses),
        }
    }

    /// Hit rate as a percentage in `0.0..=100.0`.
    pub fn hit_rate_percent(&self) -> f64 {
        self.hit_rate * 100.0
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size={}/{} hits={} misses={} sets={} evictions={} clears={} hit_rate={:.2}%",
            self.size,
            self.max_size,
            self.hits,
            self.misses,
            self.sets,
            self.evictions,
            self.clears,
            self.hit_rate_percent()
        )
    }
}

// == Hit Rate ==
/// Returns hits / (hits + misses), or 0.0 if no requests have been made.
fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}
