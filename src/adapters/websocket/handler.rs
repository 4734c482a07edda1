//! WebSocket upgrade handler for zone subscriptions.
//!
//! Handles the HTTP → WebSocket upgrade and hands the socket to the
//! session runner:
//! 1. Read `zones` and `uuid` from the query string
//! 2. Upgrade to WebSocket
//! 3. Split the socket into its outbound and inbound halves
//! 4. Run the session until the peer goes away

use std::sync::Arc;

use axum::{
    extract::{ws::WebSocket, Query, State, WebSocketUpgrade},
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::adapters::state::RelayState;
use crate::application::SessionRequest;
use crate::domain::parse_zones;

use super::connection::split_socket;

/// Query parameters accepted on the upgrade request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectQuery {
    /// Comma-separated zone names.
    pub zones: Option<String>,
    /// Identity from an earlier connection.
    pub uuid: Option<String>,
}

impl ConnectQuery {
    pub fn into_session_request(self) -> SessionRequest {
        SessionRequest {
            zones: parse_zones(self.zones.as_deref()),
            requested_identity: self.uuid,
        }
    }
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws?zones=lobby,trade&uuid=...`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<ConnectQuery>,
    State(state): State<RelayState>,
) -> Response {
    let request = query.into_session_request();
    ws.on_upgrade(move |socket| handle_socket(socket, request, state))
}

/// Runs for the lifetime of one upgraded connection.
async fn handle_socket(socket: WebSocket, request: SessionRequest, state: RelayState) {
    let connection_id = state.registry.allocate_connection_id();
    let (connection, inbound) = split_socket(connection_id, socket);

    tracing::debug!(connection_id = %connection_id, "WebSocket connection established");

    let summary = state
        .sessions
        .run(request, Arc::new(connection), inbound)
        .await;

    tracing::debug!(
        connection_id = %summary.connection_id,
        identity = %summary.identity,
        state = %summary.final_state,
        "WebSocket session finished"
    );
}

/// Router for the WebSocket endpoint mounted at `path`.
pub fn websocket_router(path: &str) -> Router<RelayState> {
    Router::new().route(path, get(ws_handler))
}
