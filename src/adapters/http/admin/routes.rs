//! Axum router configuration for the admin publish endpoint.

use axum::{routing::any, Router};

use crate::adapters::state::RelayState;

use super::handlers::publish_message;

/// Create the admin router.
///
/// # Routes
/// - `POST {path}` - Publish a message to a zone
/// - `OPTIONS {path}` - CORS preflight
///
/// Other methods reach the same handler and are answered with 405.
pub fn admin_router(path: &str) -> Router<RelayState> {
    Router::new().route(path, any(publish_message))
}
