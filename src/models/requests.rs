//! Request DTOs for the diagnostics API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Request body for PUT /cache/:namespace/:id
///
/// # Fields
/// - `value`: Any JSON payload, typically an upstream API response
/// - `ttl`: Optional TTL in seconds (uses default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub value: Value,
    #[serde(default)]
    pub ttl: Option<u64>,
}

/// Request body for POST /batch/:namespace/get
#[derive(Debug, Clone, Deserialize)]
pub struct BatchGetRequest {
    pub ids: Vec<String>,
}

impl BatchGetRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_ids(self.ids.iter())
    }
}

/// Request body for PUT /batch/:namespace
///
/// `entries` keeps the JSON object's key order, which is the order entries
/// are stored in and therefore their LRU order.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchSetRequest {
    pub entries: Map<String, Value>,
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl BatchSetRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_ids(self.entries.keys())
    }
}

fn validate_ids<'a>(mut ids: impl Iterator<Item = &'a String>) -> Option<String> {
    if ids.any(|id| is_blank(id)) {
        Some("Ids cannot be empty".to_string())
    } else {
        None
    }
}

/// Validates the path segments addressing a single cache entry.
///
/// Returns an error message if either is empty or whitespace, None if valid.
pub fn validate_key(namespace: &str, id: &str) -> Option<String> {
    if is_blank(namespace) {
        Some("Namespace cannot be empty".to_string())
    } else if is_blank(id) {
        Some("Id cannot be empty".to_string())
    } else {
        None
    }
}

/// Validates a namespace path segment.
pub fn validate_namespace(namespace: &str) -> Option<String> {
    is_blank(namespace).then(|| "Namespace cannot be empty".to_string())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
