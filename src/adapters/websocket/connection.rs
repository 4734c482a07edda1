//! WebSocket implementations of the connection ports.
//!
//! An upgraded socket is split once: the sink half becomes a
//! [`WsConnection`] shared with the registry, the stream half becomes a
//! [`WsInbound`] owned by the session loop.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, Inbound, Payload, ReceiveError, SendError};
use crate::ports::{Connection, InboundStream};

/// Splits an upgraded socket into its outbound and inbound halves.
pub fn split_socket(id: ConnectionId, socket: WebSocket) -> (WsConnection, WsInbound) {
    let (sink, stream) = socket.split();
    (
        WsConnection {
            id,
            sink: Mutex::new(sink),
            closed: AtomicBool::new(false),
        },
        WsInbound { stream },
    )
}

/// Outbound half of a WebSocket. Payloads go out as text frames.
pub struct WsConnection {
    id: ConnectionId,
    /// Held for the duration of one frame write.
    sink: Mutex<SplitSink<WebSocket, Message>>,
    closed: AtomicBool,
}

#[async_trait]
impl Connection for WsConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    async fn send(&self, payload: Payload) -> Result<(), SendError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(SendError::Closed);
        }
        let mut sink = self.sink.lock().await;
        sink.send(Message::Text(payload.as_str().to_owned()))
            .await
            .map_err(|e| SendError::Transport(e.to_string()))
    }

    async fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        let mut sink = self.sink.lock().await;
        if let Err(e) = sink.close().await {
            tracing::trace!(connection_id = %self.id, "Close after peer went away: {}", e);
        }
    }
}

/// Inbound half of a WebSocket.
pub struct WsInbound {
    stream: SplitStream<WebSocket>,
}

#[async_trait]
impl InboundStream for WsInbound {
    async fn receive(&mut self) -> Result<Inbound, ReceiveError> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Inbound::Message(text.into())),
                Some(Ok(Message::Binary(bytes))) => {
                    let text = String::from_utf8_lossy(&bytes).into_owned();
                    return Ok(Inbound::Message(text.into()));
                }
                // Control frames are answered by axum itself.
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => continue,
                Some(Ok(Message::Close(_))) | None => return Ok(Inbound::Closed),
                // The stream yields None after an error, so the next call
                // reports closure.
                Some(Err(e)) => return Err(ReceiveError::Transient(e.to_string())),
            }
        }
    }
}
