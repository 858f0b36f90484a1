//! Request and Response models for the diagnostics API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{BatchGetRequest, BatchSetRequest, SetRequest};
pub use responses::{
    BatchGetResponse, CancelledResponse, ErrorResponse, GetResponse, HealthResponse,
    MessageResponse, RemovedResponse, SubscriptionsResponse,
};
