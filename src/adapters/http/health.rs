//! Liveness endpoint with registry counters.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::adapters::state::RelayState;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub zones: usize,
    pub identities: usize,
    pub connections: usize,
}

/// GET /health
pub async fn health(State(state): State<RelayState>) -> Json<HealthResponse> {
    let stats = state.registry.stats().await;
    Json(HealthResponse {
        status: "ok",
        zones: stats.zones,
        identities: stats.identities,
        connections: stats.connections,
    })
}

pub fn health_router(path: &str) -> Router<RelayState> {
    Router::new().route(path, get(health))
}
