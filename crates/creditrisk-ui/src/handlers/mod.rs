//! HTTP route handlers for the form UI.

pub mod form;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
