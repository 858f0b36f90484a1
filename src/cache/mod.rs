//! Cache Module
//!
//! Provides namespaced in-memory caching with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry, CacheKey};
pub use stats::CacheStats;
pub use store::CacheStore;

/// Handle to the process-wide cache instance.
pub type SharedCache<V> = Arc<RwLock<CacheStore<V>>>;

/// Wraps a store in a shareable handle.
pub fn shared<V>(store: CacheStore<V>) -> SharedCache<V> {
    Arc::new(RwLock::new(store))
}
