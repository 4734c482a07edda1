//! Connection handles and the values that travel over a connection.

use std::fmt;
use std::sync::Arc;

/// Handle for one accepted connection.
///
/// Allocated from a monotonically increasing counter, so a reconnect under
/// the same identity always gets a different handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Immutable text payload shared by every delivery task of a publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(Arc<str>);

impl Payload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a receive on the inbound half produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Application data from the peer. Observed, never routed.
    Message(Payload),
    /// The peer closed the stream in an orderly way.
    Closed,
}
