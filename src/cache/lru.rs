//! LRU Module
//!
//! Least Recently Used victim selection by scanning entry recency stamps.
//!
//! Recency is not maintained as an ordered structure. Every set or hit takes a
//! stamp from an [`AccessClock`] and eviction scans for the smallest
//! `(last_accessed_at, access_seq)` pair. Since the sequence never repeats,
//! ties on the millisecond timestamp resolve in access order, which for a
//! burst of writes is insertion order.

use std::collections::HashMap;

use crate::cache::{CacheEntry, CacheKey};

// == Access Clock ==
/// Monotonic logical clock handing out access sequence numbers.
#[derive(Debug, Default)]
pub struct AccessClock {
    last: u64,
}

impl AccessClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next sequence number.
    pub fn tick(&mut self) -> u64 {
        self.last += 1;
        self.last
    }
}

// == Victim Selection ==
/// Returns the key of the least recently used entry, or `None` when empty.
pub fn least_recently_used<V>(entries: &HashMap<CacheKey, CacheEntry<V>>) -> Option<CacheKey> {
    entries
        .iter()
        .min_by_key(|(_, entry)| entry.recency())
        .map(|(key, _)| key.clone())
}
