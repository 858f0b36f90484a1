//! API Routes
//!
//! Configures the Axum router with all diagnostics endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    batch_get_handler, batch_set_handler, cancel_scope_handler, cancel_subscription_handler,
    cleanup_handler, clear_handler, clear_namespace_handler, delete_handler, get_handler,
    health_handler, scope_change_handler, set_handler, stats_handler, subscriptions_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin, the browser client calls this directly
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/cache", delete(clear_handler))
        .route("/cache/:namespace", delete(clear_namespace_handler))
        .route(
            "/cache/:namespace/:id",
            get(get_handler).put(set_handler).delete(delete_handler),
        )
        .route("/batch/:namespace", put(batch_set_handler))
        .route("/batch/:namespace/get", post(batch_get_handler))
        .route("/cleanup", post(cleanup_handler))
        .route("/stats", get(stats_handler))
        .route("/subscriptions", get(subscriptions_handler))
        .route("/subscriptions/:id", delete(cancel_subscription_handler))
        .route("/scopes/:scope", delete(cancel_scope_handler))
        .route("/scope", put(scope_change_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
