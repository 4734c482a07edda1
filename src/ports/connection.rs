//! Connection ports - the two halves of a client stream.
//!
//! A client stream is split on accept:
//!
//! - the outbound half ([`Connection`]) is shared by the registry and every
//!   delivery task, so it is `Send + Sync` and serializes its own writes;
//! - the inbound half ([`InboundStream`]) is owned by the connection's
//!   lifecycle loop and is the only place that reads.
//!
//! The WebSocket adapter implements both; tests use in-memory fakes.

use async_trait::async_trait;

use crate::domain::{ConnectionId, Inbound, Payload, ReceiveError, SendError};

/// Outbound half of a client connection.
///
/// Implementations must serialize concurrent `send` calls so that frames
/// from different publishes never interleave on the wire.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Registry handle for this connection.
    fn id(&self) -> ConnectionId;

    /// Deliver one payload.
    ///
    /// Errors are scoped to this connection and must not be escalated.
    async fn send(&self, payload: Payload) -> Result<(), SendError>;

    /// Close the outbound stream. Safe to call more than once.
    async fn close(&self);
}

/// Inbound half of a client connection.
#[async_trait]
pub trait InboundStream: Send {
    /// Wait for the next inbound event.
    ///
    /// Orderly closure is `Ok(Inbound::Closed)`, not an error.
    async fn receive(&mut self) -> Result<Inbound, ReceiveError>;
}
