//! Subscriptions Module
//!
//! Lifecycle tracking for push subscriptions so none outlive their owner.

mod registry;
mod scope;
mod unsubscribe;

use std::sync::Arc;

use tokio::sync::Mutex;

pub use registry::{ActiveSubscription, SubscriptionRegistry};
pub use scope::ScopeChange;
pub use unsubscribe::{try_unsubscribe_fn, unsubscribe_fn, Unsubscribe};

/// Handle to the process-wide registry instance.
///
/// A mutex rather than a RwLock: capabilities are `Send` but not `Sync`, and
/// nearly every registry operation mutates.
pub type SharedRegistry = Arc<Mutex<SubscriptionRegistry>>;

/// Wraps a registry in a shareable handle.
pub fn shared(registry: SubscriptionRegistry) -> SharedRegistry {
    Arc::new(Mutex::new(registry))
}
