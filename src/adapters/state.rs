//! Shared state handed to every axum handler.

use std::sync::Arc;

use crate::application::{BroadcastEngine, SessionRunner, ZoneRegistry};
use crate::domain::IdentityAssigner;

/// Handles to the relay core, cloned into each request.
///
/// Built once at startup around a single [`ZoneRegistry`].
#[derive(Clone)]
pub struct RelayState {
    pub registry: Arc<ZoneRegistry>,
    pub broadcaster: BroadcastEngine,
    pub sessions: SessionRunner,
}

impl RelayState {
    /// Wires the broadcast engine and session runner to `registry`.
    pub fn new(registry: Arc<ZoneRegistry>) -> Self {
        Self {
            broadcaster: BroadcastEngine::new(Arc::clone(&registry)),
            sessions: SessionRunner::new(Arc::clone(&registry), IdentityAssigner::new()),
            registry,
        }
    }
}

impl Default for RelayState {
    fn default() -> Self {
        Self::new(Arc::new(ZoneRegistry::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_state_shares_one_registry() {
        let registry = Arc::new(ZoneRegistry::new());
        let state = RelayState::new(registry.clone());

        assert!(Arc::ptr_eq(&state.registry, &registry));
        assert!(Arc::ptr_eq(state.broadcaster.registry(), &registry));
        assert!(Arc::ptr_eq(state.sessions.registry(), &registry));
    }
}
