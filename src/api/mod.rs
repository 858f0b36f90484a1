//! API Module
//!
//! HTTP handlers and routing for the diagnostics surface over the shared
//! cache and subscription registry.
//!
//! # Endpoints
//! - `GET|PUT|DELETE /cache/:namespace/:id` - Read, store or remove one entry
//! - `DELETE /cache/:namespace` - Clear a namespace
//! - `DELETE /cache` - Clear everything
//! - `PUT /batch/:namespace` - Store several entries
//! - `POST /batch/:namespace/get` - Look up several ids
//! - `POST /cleanup` - Sweep expired entries now
//! - `GET /stats` - Cache statistics
//! - `GET /subscriptions` - Live subscriptions
//! - `DELETE /subscriptions/:id` - Cancel one subscription
//! - `DELETE /scopes/:scope` - Cancel a scope
//! - `PUT /scope` - Report a scope change
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
