//! Response DTOs for the diagnostics API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::subscriptions::ActiveSubscription;

/// Response body for GET /cache/:namespace/:id
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub namespace: String,
    pub id: String,
    pub value: Value,
}

impl GetResponse {
    pub fn new(namespace: impl Into<String>, id: impl Into<String>, value: Value) -> Self {
        Self {
            namespace: namespace.into(),
            id: id.into(),
            value,
        }
    }
}

/// Generic acknowledgement carrying a human-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for bulk removals (namespace clear, cleanup).
#[derive(Debug, Clone, Serialize)]
pub struct RemovedResponse {
    pub removed: usize,
}

/// Response body for POST /batch/:namespace/get
#[derive(Debug, Clone, Serialize)]
pub struct BatchGetResponse {
    pub namespace: String,
    /// Ids that were found; missing ids are simply absent
    pub found: HashMap<String, Value>,
}

/// Response body for GET /subscriptions
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionsResponse {
    pub current_scope: Option<String>,
    pub active: Vec<ActiveSubscription>,
}

/// Response body for scope cancellation and scope changes.
#[derive(Debug, Clone, Serialize)]
pub struct CancelledResponse {
    pub cancelled: usize,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
