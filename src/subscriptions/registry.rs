//! Subscription Registry Module
//!
//! Owns the cancellation capabilities of live push subscriptions, keyed by a
//! caller-chosen id and optionally grouped by scope.
//!
//! Teardown is best-effort: a capability that errors or panics is logged and
//! its record removed anyway, so one misbehaving listener never stops the rest
//! of a cleanup pass. Dropping the registry cancels whatever is still live.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::subscriptions::{ScopeChange, Unsubscribe};

// == Subscription Record ==
struct Subscription {
    unsubscribe: Box<dyn Unsubscribe>,
    scope: Option<String>,
    registered_at: DateTime<Utc>,
}

// == Active Subscription ==
/// Diagnostic snapshot of one live subscription.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveSubscription {
    pub id: String,
    pub scope: Option<String>,
    pub registered_at: DateTime<Utc>,
    /// Milliseconds since registration
    pub age_ms: u64,
}

// == Subscription Registry ==
/// Tracks live subscriptions, at most one per id.
#[derive(Default)]
pub struct SubscriptionRegistry {
    subscriptions: HashMap<String, Subscription>,
    /// Secondary index: scope -> ids registered under it
    scopes: HashMap<String, HashSet<String>>,
    current_scope: Option<String>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // == Register ==
    /// Records a subscription's cancellation capability.
    ///
    /// A live subscription already registered under `id` is cancelled first.
    /// An empty id is logged and ignored; the capability is dropped without
    /// being invoked. Returns whether the subscription was recorded.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        unsubscribe: Box<dyn Unsubscribe>,
        scope: Option<String>,
    ) -> bool {
        let id = id.into();
        if id.trim().is_empty() {
            warn!("Ignoring subscription registered with an empty id");
            return false;
        }

        if self.cancel(&id) {
            debug!(id = %id, "Replaced existing subscription");
        }

        if let Some(scope) = &scope {
            self.scopes
                .entry(scope.clone())
                .or_default()
                .insert(id.clone());
        }

        debug!(id = %id, scope = ?scope, "Registered subscription");
        self.subscriptions.insert(
            id,
            Subscription {
                unsubscribe,
                scope,
                registered_at: Utc::now(),
            },
        );
        true
    }

    // == Cancel ==
    /// Cancels one subscription. Returns false if `id` is not registered.
    pub fn cancel(&mut self, id: &str) -> bool {
        let Some(subscription) = self.subscriptions.remove(id) else {
            return false;
        };

        if let Some(scope) = &subscription.scope {
            if let Some(ids) = self.scopes.get_mut(scope) {
                ids.remove(id);
                if ids.is_empty() {
                    self.scopes.remove(scope);
                }
            }
        }

        invoke(id, subscription.unsubscribe);
        true
    }

    // == Cancel Scope ==
    /// Cancels every subscription registered under `scope`, returning how many.
    pub fn cancel_scope(&mut self, scope: &str) -> usize {
        let Some(ids) = self.scopes.remove(scope) else {
            return 0;
        };

        let mut cancelled = 0;
        for id in ids {
            if let Some(subscription) = self.subscriptions.remove(&id) {
                invoke(&id, subscription.unsubscribe);
                cancelled += 1;
            }
        }

        info!(scope, cancelled, "Cancelled scope subscriptions");
        cancelled
    }

    // == Cancel All ==
    /// Cancels every live subscription, returning how many.
    pub fn cancel_all(&mut self) -> usize {
        let subscriptions = std::mem::take(&mut self.subscriptions);
        self.scopes.clear();

        let cancelled = subscriptions.len();
        for (id, subscription) in subscriptions {
            invoke(&id, subscription.unsubscribe);
        }

        if cancelled > 0 {
            info!(cancelled, "Cancelled all subscriptions");
        }
        cancelled
    }

    // == Scope Change ==
    /// Releases the previous scope when it differs from the new one, then
    /// records the new scope as current. Returns how many were cancelled.
    pub fn handle_scope_change(&mut self, change: &ScopeChange) -> usize {
        let cancelled = change
            .released_scope()
            .map(|scope| self.cancel_scope(scope))
            .unwrap_or(0);

        self.current_scope = change.new_scope.clone();
        cancelled
    }

    // == Active ==
    /// Snapshot of live subscriptions, oldest first.
    pub fn active(&self) -> Vec<ActiveSubscription> {
        let now = Utc::now();
        let mut active: Vec<ActiveSubscription> = self
            .subscriptions
            .iter()
            .map(|(id, subscription)| ActiveSubscription {
                id: id.clone(),
                scope: subscription.scope.clone(),
                registered_at: subscription.registered_at,
                age_ms: (now - subscription.registered_at).num_milliseconds().max(0) as u64,
            })
            .collect();

        active.sort_by(|a, b| {
            a.registered_at
                .cmp(&b.registered_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        active
    }

    // == Accessors ==
    pub fn is_registered(&self, id: &str) -> bool {
        self.subscriptions.contains_key(id)
    }

    pub fn current_scope(&self) -> Option<&str> {
        self.current_scope.as_deref()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl fmt::Debug for SubscriptionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionRegistry")
            .field("subscriptions", &self.subscriptions.keys().collect::<Vec<_>>())
            .field("scopes", &self.scopes)
            .field("current_scope", &self.current_scope)
            .finish()
    }
}

impl Drop for SubscriptionRegistry {
    fn drop(&mut self) {
        if !self.subscriptions.is_empty() {
            info!(
                remaining = self.subscriptions.len(),
                "Registry dropped, cancelling remaining subscriptions"
            );
            self.cancel_all();
        }
    }
}

// == Invocation ==
/// Runs a capability exactly once, containing errors and panics.
fn invoke(id: &str, unsubscribe: Box<dyn Unsubscribe>) {
    match panic::catch_unwind(AssertUnwindSafe(move || unsubscribe.unsubscribe())) {
        Ok(Ok(())) => debug!(id, "Cancelled subscription"),
        Ok(Err(err)) => error!(id, error = %err, "Unsubscribe failed, dropping record anyway"),
        Err(_) => error!(id, "Unsubscribe panicked, dropping record anyway"),
    }
}
