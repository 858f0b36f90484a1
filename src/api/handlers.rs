//! API Handlers
//!
//! HTTP request handlers for the diagnostics and admin endpoints.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{self, CacheStats, CacheStore, SharedCache};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    BatchGetRequest, BatchGetResponse, BatchSetRequest, CancelledResponse, GetResponse,
    HealthResponse, MessageResponse, RemovedResponse, SetRequest, SubscriptionsResponse,
};
use crate::models::requests::{validate_key, validate_namespace};
use crate::subscriptions::{self, ScopeChange, SharedRegistry, SubscriptionRegistry};

/// Application state shared across all handlers.
///
/// Holds handles to the single cache and registry instances built by the
/// composition root; cloning the state clones the handles, not the data.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache of upstream JSON payloads
    pub cache: SharedCache<Value>,
    /// Shared subscription registry
    pub registry: SharedRegistry,
}

impl AppState {
    pub fn new(cache: CacheStore<Value>, registry: SubscriptionRegistry) -> Self {
        Self {
            cache: cache::shared(cache),
            registry: subscriptions::shared(registry),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let cache = CacheStore::new(config.max_size, config.default_ttl_duration());
        Self::new(cache, SubscriptionRegistry::new())
    }
}

/// Handler for GET /cache/:namespace/:id
///
/// Takes the write lock: a lookup refreshes recency and updates statistics.
pub async fn get_handler(
    State(state): State<AppState>,
    Path((namespace, id)): Path<(String, String)>,
) -> Result<Json<GetResponse>> {
    check_key(&namespace, &id)?;

    let value = state
        .cache
        .write()
        .await
        .get(&namespace, &id)
        .ok_or_else(|| ApiError::NotFound(format!("{namespace}:{id}")))?;

    Ok(Json(GetResponse::new(namespace, id, value)))
}

/// Handler for PUT /cache/:namespace/:id
pub async fn set_handler(
    State(state): State<AppState>,
    Path((namespace, id)): Path<(String, String)>,
    Json(req): Json<SetRequest>,
) -> Result<Json<MessageResponse>> {
    check_key(&namespace, &id)?;

    let mut cache = state.cache.write().await;
    match req.ttl {
        Some(ttl) => cache.set_with_ttl(&namespace, id.clone(), req.value, Duration::from_secs(ttl)),
        None => cache.set(&namespace, id.clone(), req.value),
    }

    Ok(Json(MessageResponse::new(format!(
        "Key '{namespace}:{id}' set successfully"
    ))))
}

/// Handler for DELETE /cache/:namespace/:id
pub async fn delete_handler(
    State(state): State<AppState>,
    Path((namespace, id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>> {
    check_key(&namespace, &id)?;

    if !state.cache.write().await.delete(&namespace, &id) {
        return Err(ApiError::NotFound(format!("{namespace}:{id}")));
    }

    Ok(Json(MessageResponse::new(format!(
        "Key '{namespace}:{id}' deleted successfully"
    ))))
}

/// Handler for DELETE /cache/:namespace
pub async fn clear_namespace_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
) -> Result<Json<RemovedResponse>> {
    check_namespace(&namespace)?;

    let removed = state.cache.write().await.clear_namespace(&namespace);
    Ok(Json(RemovedResponse { removed }))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.cache.write().await.clear();
    Json(MessageResponse::new("Cache cleared"))
}

/// Handler for POST /batch/:namespace/get
pub async fn batch_get_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    Json(req): Json<BatchGetRequest>,
) -> Result<Json<BatchGetResponse>> {
    check_namespace(&namespace)?;
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let found = state.cache.write().await.batch_get(&namespace, &req.ids);
    Ok(Json(BatchGetResponse { namespace, found }))
}

/// Handler for PUT /batch/:namespace
pub async fn batch_set_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    Json(req): Json<BatchSetRequest>,
) -> Result<Json<MessageResponse>> {
    check_namespace(&namespace)?;
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let count = req.entries.len();
    state
        .cache
        .write()
        .await
        .batch_set(&namespace, req.entries, req.ttl.map(Duration::from_secs));

    Ok(Json(MessageResponse::new(format!(
        "Stored {count} entries in '{namespace}'"
    ))))
}

/// Handler for POST /cleanup
pub async fn cleanup_handler(State(state): State<AppState>) -> Json<RemovedResponse> {
    let removed = state.cache.write().await.cleanup();
    Json(RemovedResponse { removed })
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.read().await.stats())
}

/// Handler for GET /subscriptions
pub async fn subscriptions_handler(State(state): State<AppState>) -> Json<SubscriptionsResponse> {
    let registry = state.registry.lock().await;
    Json(SubscriptionsResponse {
        current_scope: registry.current_scope().map(String::from),
        active: registry.active(),
    })
}

/// Handler for DELETE /subscriptions/:id
pub async fn cancel_subscription_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    if !state.registry.lock().await.cancel(&id) {
        return Err(ApiError::NotFound(id));
    }

    Ok(Json(MessageResponse::new(format!(
        "Subscription '{id}' cancelled"
    ))))
}

/// Handler for DELETE /scopes/:scope
pub async fn cancel_scope_handler(
    State(state): State<AppState>,
    Path(scope): Path<String>,
) -> Json<CancelledResponse> {
    let cancelled = state.registry.lock().await.cancel_scope(&scope);
    Json(CancelledResponse { cancelled })
}

/// Handler for PUT /scope
///
/// Signals that the client navigated from one scope to another.
pub async fn scope_change_handler(
    State(state): State<AppState>,
    Json(change): Json<ScopeChange>,
) -> Json<CancelledResponse> {
    let cancelled = state.registry.lock().await.handle_scope_change(&change);
    Json(CancelledResponse { cancelled })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

fn check_key(namespace: &str, id: &str) -> Result<()> {
    validate_key(namespace, id).map_or(Ok(()), |msg| Err(ApiError::InvalidRequest(msg)))
}

fn check_namespace(namespace: &str) -> Result<()> {
    validate_namespace(namespace).map_or(Ok(()), |msg| Err(ApiError::InvalidRequest(msg)))
}
