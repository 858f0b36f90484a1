//! Reel Cache - caching and subscription lifecycle core
//!
//! A namespaced TTL/LRU cache for memoizing upstream movie metadata and
//! ratings lookups, plus a registry that guarantees push subscriptions are
//! torn down exactly once.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod subscriptions;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheStats, CacheStore, SharedCache};
pub use config::Config;
pub use subscriptions::{ScopeChange, SharedRegistry, SubscriptionRegistry, Unsubscribe};
pub use tasks::{spawn_cleanup_task, MaintenanceHandle};
