//! Per-connection session loop.
//!
//! ```text
//! Connecting ──► Registered ──► (receiving)* ──► Closing ──► Closed
//!     │                                                        ▲
//!     └──────────── identity handshake failed ─────────────────┘
//! ```
//!
//! A reconnect is a brand-new session on a brand-new connection; nothing
//! carries over from a closed session except the identity string.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{ConnectionId, Identity, IdentityAssigner, Inbound, Payload, ZoneSet};
use crate::ports::{Connection, InboundStream};

use super::registry::ZoneRegistry;

/// Session states, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Registered,
    Closing,
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Connecting => "connecting",
            SessionState::Registered => "registered",
            SessionState::Closing => "closing",
            SessionState::Closed => "closed",
        };
        write!(f, "{}", s)
    }
}

/// What the client asked for when it connected.
#[derive(Debug, Clone)]
pub struct SessionRequest {
    pub requested_identity: Option<String>,
    pub zones: ZoneSet,
}

/// How a finished session went.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub identity: Identity,
    pub connection_id: ConnectionId,
    /// False when the session ended before joining any zone.
    pub registered: bool,
    pub messages_received: u64,
    pub final_state: SessionState,
}

/// Runs connection sessions against a shared registry.
#[derive(Clone)]
pub struct SessionRunner {
    registry: Arc<ZoneRegistry>,
    assigner: IdentityAssigner,
}

impl SessionRunner {
    pub fn new(registry: Arc<ZoneRegistry>, assigner: IdentityAssigner) -> Self {
        Self { registry, assigner }
    }

    /// Drives one connection from accept to close.
    ///
    /// Returns once the peer has gone and the connection is deregistered.
    pub async fn run<I>(
        &self,
        request: SessionRequest,
        connection: Arc<dyn Connection>,
        mut inbound: I,
    ) -> SessionSummary
    where
        I: InboundStream,
    {
        let connection_id = connection.id();
        let mut state = SessionState::Connecting;

        let resolved = self.assigner.resolve(request.requested_identity.as_deref());
        let identity = resolved.identity;

        if resolved.is_new {
            info!(connection_id = %connection_id, identity = %identity, "Generated new identity for client");
            // Must be the first outbound frame, so it goes out before join.
            if let Err(e) = connection.send(Payload::from(identity.as_str())).await {
                warn!(connection_id = %connection_id, "Failed to send identity to client: {}", e);
                connection.close().await;
                return SessionSummary {
                    identity,
                    connection_id,
                    registered: false,
                    messages_received: 0,
                    final_state: SessionState::Closed,
                };
            }
        } else {
            info!(connection_id = %connection_id, identity = %identity, "Client connected with existing identity");
        }

        let outcome = self
            .registry
            .join(&identity, Arc::clone(&connection), &request.zones)
            .await;
        if let Some(displaced) = outcome.displaced {
            info!(
                identity = %identity,
                displaced = %displaced,
                connection_id = %connection_id,
                pruned_zones = ?outcome.pruned_zones,
                "Identity reconnected, previous connection evicted from its zones"
            );
        }
        state = transition(connection_id, state, SessionState::Registered);
        debug!(
            connection_id = %connection_id,
            zones = ?request.zones,
            "Added connection to zones"
        );

        let mut messages_received = 0u64;
        loop {
            match inbound.receive().await {
                Ok(Inbound::Message(payload)) if payload.is_empty() => {
                    messages_received += 1;
                    debug!(connection_id = %connection_id, "Received empty message from client");
                }
                Ok(Inbound::Message(payload)) => {
                    messages_received += 1;
                    debug!(
                        connection_id = %connection_id,
                        bytes = payload.len(),
                        "Received message from client: {}",
                        payload
                    );
                }
                Ok(Inbound::Closed) => {
                    debug!(connection_id = %connection_id, "Peer closed connection");
                    break;
                }
                Err(e) if e.is_fatal() => {
                    warn!(connection_id = %connection_id, "Receive failed: {}", e);
                    break;
                }
                Err(e) => {
                    // No retry budget: keep polling until the stream reports closure.
                    debug!(connection_id = %connection_id, "Receive error, continuing: {}", e);
                }
            }
        }

        state = transition(connection_id, state, SessionState::Closing);
        self.registry
            .leave(&identity, connection_id, &request.zones)
            .await;
        connection.close().await;
        state = transition(connection_id, state, SessionState::Closed);

        info!(
            connection_id = %connection_id,
            identity = %identity,
            messages_received,
            "Client disconnected and removed from zones"
        );

        SessionSummary {
            identity,
            connection_id,
            registered: true,
            messages_received,
            final_state: state,
        }
    }

    pub fn registry(&self) -> &Arc<ZoneRegistry> {
        &self.registry
    }
}

fn transition(connection_id: ConnectionId, from: SessionState, to: SessionState) -> SessionState {
    debug!(connection_id = %connection_id, "Session {} -> {}", from, to);
    to
}
