//! Cache Entry Module
//!
//! Defines the composite cache key and individual entries with TTL support.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Key ==
/// Composite key identifying one logical cached fact.
///
/// Stored structurally so that `("a:b", "c")` and `("a", "b:c")` stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub namespace: String,
    pub id: String,
}

impl CacheKey {
    /// Separator used when rendering the key as a single string.
    pub const SEPARATOR: char = ':';

    pub fn new(namespace: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, Self::SEPARATOR, self.id)
    }
}

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
    /// Last successful read or write (Unix milliseconds)
    pub last_accessed_at: u64,
    /// Access sequence number, strictly increasing per store
    pub(crate) access_seq: u64,
    pub namespace: String,
    pub id: String,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `key` - The composite key the entry is stored under
    /// * `value` - The value to store
    /// * `ttl` - Time to live measured from insertion
    /// * `access_seq` - Recency stamp from the owning store's clock
    pub fn new(key: &CacheKey, value: V, ttl: Duration, access_seq: u64) -> Self {
        let now = current_timestamp_ms();
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);

        Self {
            value,
            created_at: now,
            expires_at: now.saturating_add(ttl_ms),
            last_accessed_at: now,
            access_seq,
            namespace: key.namespace.clone(),
            id: key.id.clone(),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry stays readable up to and including `expires_at`; it is expired
    /// once the current time is strictly greater.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Same as [`is_expired`](Self::is_expired) against a caller-supplied clock reading.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms > self.expires_at
    }

    // == Touch ==
    /// Records a successful access.
    pub(crate) fn touch(&mut self, access_seq: u64) {
        self.last_accessed_at = current_timestamp_ms();
        self.access_seq = access_seq;
    }

    /// Recency ordering key; smaller means less recently used.
    pub(crate) fn recency(&self) -> (u64, u64) {
        (self.last_accessed_at, self.access_seq)
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, `0` once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A clock set before the epoch reads as `0` rather than failing.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
