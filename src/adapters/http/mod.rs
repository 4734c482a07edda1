//! HTTP adapters - admin publish and health endpoints, plus the composed relay router.

pub mod admin;
pub mod health;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::adapters::state::RelayState;
use crate::adapters::websocket::websocket_router;
use crate::config::RelayConfig;

pub use admin::{admin_router, publish_message, PublishRequest};
pub use health::{health, health_router, HealthResponse};

/// Builds the full relay router: subscriber upgrades, admin publishing and health.
pub fn relay_router(state: RelayState, config: &RelayConfig) -> Router {
    Router::new()
        .merge(websocket_router(&config.ws_path))
        .merge(admin_router(&config.publish_path))
        .merge(health_router(&config.health_path))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
