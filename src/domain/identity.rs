//! Client identities and the assigner that issues them.
//!
//! An identity is the token a client presents on reconnect to resume as the
//! same logical client. The server never validates client-supplied
//! identities; it only guarantees that freshly issued ones are unique.

use std::fmt;
use uuid::Uuid;

/// Opaque client identity that survives reconnects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Wraps a client-supplied identity as given.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh random identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Result of resolving the identity for a new connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub identity: Identity,
    /// True when the identity was generated for this connection and still
    /// has to be handed to the client.
    pub is_new: bool,
}

/// Issues identities for connecting clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityAssigner;

impl IdentityAssigner {
    pub fn new() -> Self {
        Self
    }

    /// Accepts `requested` unchanged, or generates a new identity when it is
    /// absent or empty.
    pub fn resolve(&self, requested: Option<&str>) -> ResolvedIdentity {
        match requested {
            Some(value) if !value.is_empty() => ResolvedIdentity {
                identity: Identity::new(value),
                is_new: false,
            },
            _ => ResolvedIdentity {
                identity: Identity::generate(),
                is_new: true,
            },
        }
    }
}
