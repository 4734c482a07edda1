//! In-memory connection fakes shared by the application tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::{ConnectionId, Inbound, Payload, ReceiveError, SendError};
use crate::ports::{Connection, InboundStream};

/// Connection that records every payload and forwards it to a channel.
pub struct RecordingConnection {
    id: ConnectionId,
    sent: Mutex<Vec<Payload>>,
    closed: AtomicBool,
    notify: Option<mpsc::UnboundedSender<(ConnectionId, Payload)>>,
}

impl RecordingConnection {
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            sent: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
            notify: None,
        }
    }

    pub fn with_channel(id: ConnectionId) -> (Self, mpsc::UnboundedReceiver<(ConnectionId, Payload)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut conn = Self::new(id);
        conn.notify = Some(tx);
        (conn, rx)
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.as_str().to_string())
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connection for RecordingConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    async fn send(&self, payload: Payload) -> Result<(), SendError> {
        if self.is_closed() {
            return Err(SendError::Closed);
        }
        self.sent.lock().unwrap().push(payload.clone());
        if let Some(tx) = &self.notify {
            let _ = tx.send((self.id, payload));
        }
        Ok(())
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Connection whose every send fails.
pub struct FailingConnection {
    id: ConnectionId,
    attempts: AtomicUsize,
    panic_on_send: bool,
}

impl FailingConnection {
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            attempts: AtomicUsize::new(0),
            panic_on_send: false,
        }
    }

    pub fn panicking(id: ConnectionId) -> Self {
        Self {
            panic_on_send: true,
            ..Self::new(id)
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connection for FailingConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    async fn send(&self, _payload: Payload) -> Result<(), SendError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.panic_on_send {
            panic!("recipient blew up");
        }
        Err(SendError::Transport("broken pipe".into()))
    }

    async fn close(&self) {}
}

/// Inbound stream that replays a fixed script, then reports closure.
pub struct ScriptedInbound {
    script: VecDeque<Result<Inbound, ReceiveError>>,
}

impl ScriptedInbound {
    pub fn new(script: Vec<Result<Inbound, ReceiveError>>) -> Self {
        Self {
            script: script.into(),
        }
    }

    pub fn closed() -> Self {
        Self::new(vec![])
    }
}

#[async_trait]
impl InboundStream for ScriptedInbound {
    async fn receive(&mut self) -> Result<Inbound, ReceiveError> {
        self.script.pop_front().unwrap_or(Ok(Inbound::Closed))
    }
}

/// Inbound stream driven by a channel; dropping the sender closes it.
pub struct ChannelInbound {
    rx: mpsc::UnboundedReceiver<Inbound>,
}

impl ChannelInbound {
    pub fn new() -> (mpsc::UnboundedSender<Inbound>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }
}

#[async_trait]
impl InboundStream for ChannelInbound {
    async fn receive(&mut self) -> Result<Inbound, ReceiveError> {
        Ok(self.rx.recv().await.unwrap_or(Inbound::Closed))
    }
}
