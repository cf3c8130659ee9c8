//! HTTP route handlers for the inference service.

pub mod credit_risk;
pub mod model;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
