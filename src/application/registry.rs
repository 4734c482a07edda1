//! Zone membership registry.
//!
//! Tracks which connections belong to which zones and which connection
//! currently speaks for each identity.
//!
//! # Layout
//!
//! ```text
//! zones:       "lobby" ─► { conn-1, conn-4 }     identities: U1 ─► conn-1
//!              "trade" ─► { conn-1 }                         U2 ─► conn-4
//!
//! connections: conn-1 ─► (U1, {lobby, trade})
//!              conn-4 ─► (U2, {lobby})
//! ```
//!
//! The `connections` reverse index lets a reconnect evict the previous
//! connection from its zones without scanning every zone.
//!
//! # Invariants
//!
//! - Every identity maps to a connection that has not been deregistered.
//! - A reconnecting identity's previous connection leaves all zones before
//!   the new connection is added anywhere.
//! - A zone exists only while it has at least one member.
//! - Every mutation and every snapshot happens under one lock, and no I/O
//!   is performed while it is held.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ConnectionId, Identity, ZoneName, ZoneSet};
use crate::ports::Connection;

/// Registry counters for monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Zones with at least one member.
    pub zones: usize,
    /// Identities with a registered connection.
    pub identities: usize,
    /// Registered connections.
    pub connections: usize,
}

/// What a `join` changed besides adding the new connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinOutcome {
    /// Connection previously registered for the same identity, now removed
    /// from every zone.
    pub displaced: Option<ConnectionId>,
    /// Zones that disappeared because the displaced connection was their
    /// last member.
    pub pruned_zones: Vec<ZoneName>,
}

struct Registration {
    identity: Identity,
    zones: HashSet<ZoneName>,
}

#[derive(Default)]
struct RegistryState {
    zones: HashMap<ZoneName, BTreeMap<ConnectionId, Arc<dyn Connection>>>,
    identities: HashMap<Identity, ConnectionId>,
    connections: HashMap<ConnectionId, Registration>,
}

impl RegistryState {
    /// Removes `connection_id` from `zone`, dropping the zone when it
    /// becomes empty. Returns true if the zone was dropped.
    fn remove_member(&mut self, zone: &ZoneName, connection_id: ConnectionId) -> bool {
        let Some(members) = self.zones.get_mut(zone) else {
            return false;
        };
        if members.remove(&connection_id).is_none() {
            return false;
        }
        if members.is_empty() {
            self.zones.remove(zone);
            return true;
        }
        false
    }

    /// Removes a connection from every zone it joined and releases its
    /// identity if the identity still points at it.
    fn evict(&mut self, connection_id: ConnectionId) -> Vec<ZoneName> {
        let Some(registration) = self.connections.remove(&connection_id) else {
            return Vec::new();
        };
        if self.identities.get(&registration.identity) == Some(&connection_id) {
            self.identities.remove(&registration.identity);
        }
        let mut pruned = Vec::new();
        for zone in registration.zones {
            if self.remove_member(&zone, connection_id) {
                pruned.push(zone);
            }
        }
        pruned
    }
}

/// Process-wide membership store.
///
/// Construct one per process and share it by `Arc`.
pub struct ZoneRegistry {
    state: Mutex<RegistryState>,
    next_connection_id: AtomicU64,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
            next_connection_id: AtomicU64::new(1),
        }
    }

    /// Hands out the handle for a newly accepted connection.
    pub fn allocate_connection_id(&self) -> ConnectionId {
        ConnectionId::from_raw(self.next_connection_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Registers `connection` for `identity` in every zone of `zones`.
    ///
    /// Any connection already registered for `identity` is first removed
    /// from all of its zones. The displaced connection itself is left open;
    /// it simply stops receiving broadcasts.
    pub async fn join(
        &self,
        identity: &Identity,
        connection: Arc<dyn Connection>,
        zones: &ZoneSet,
    ) -> JoinOutcome {
        let connection_id = connection.id();
        let mut state = self.state.lock().await;

        let mut outcome = JoinOutcome::default();
        if let Some(previous) = state.identities.get(identity).copied() {
            outcome.pruned_zones = state.evict(previous);
            outcome.displaced = Some(previous);
        }
        // A connection joins once per session; re-joining the same handle
        // replaces its previous zone set.
        if outcome.displaced != Some(connection_id) {
            outcome.pruned_zones.extend(state.evict(connection_id));
        }

        state.identities.insert(identity.clone(), connection_id);
        for zone in zones {
            state
                .zones
                .entry(zone.clone())
                .or_default()
                .insert(connection_id, Arc::clone(&connection));
        }
        state.connections.insert(
            connection_id,
            Registration {
                identity: identity.clone(),
                zones: zones.iter().cloned().collect(),
            },
        );

        outcome
    }

    /// Removes `connection_id` from `zones` and releases `identity` if it
    /// still points at this connection.
    ///
    /// Returns the zones that were dropped because they became empty.
    pub async fn leave(
        &self,
        identity: &Identity,
        connection_id: ConnectionId,
        zones: &ZoneSet,
    ) -> Vec<ZoneName> {
        let mut state = self.state.lock().await;

        let mut pruned = Vec::new();
        for zone in zones {
            if state.remove_member(zone, connection_id) {
                pruned.push(zone.clone());
            }
        }

        // A displaced connection has no reverse entry left to update.
        let drained = match state.connections.get_mut(&connection_id) {
            Some(registration) => {
                registration.zones.retain(|z| !zones.contains(z));
                registration.zones.is_empty()
            }
            None => false,
        };
        if drained {
            state.connections.remove(&connection_id);
        }

        if state.identities.get(identity) == Some(&connection_id) {
            state.identities.remove(identity);
            // Zones the caller did not list must not keep a released
            // connection around.
            pruned.extend(state.evict(connection_id));
        }

        pruned
    }

    /// Point-in-time copy of a zone's members.
    ///
    /// Empty if the zone does not exist. The lock is released before the
    /// copy is returned, so callers may do slow I/O with it.
    pub async fn snapshot_members(&self, zone: &ZoneName) -> Vec<Arc<dyn Connection>> {
        let state = self.state.lock().await;
        state
            .zones
            .get(zone)
            .map(|members| members.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Handles of a zone's current members, in allocation order.
    pub async fn member_ids(&self, zone: &ZoneName) -> Vec<ConnectionId> {
        let state = self.state.lock().await;
        state
            .zones
            .get(zone)
            .map(|members| members.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Zones a connection is currently a member of.
    pub async fn zones_of(&self, connection_id: ConnectionId) -> ZoneSet {
        let state = self.state.lock().await;
        state
            .connections
            .get(&connection_id)
            .map(|r| r.zones.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Connection currently registered for an identity.
    pub async fn connection_for(&self, identity: &Identity) -> Option<ConnectionId> {
        self.state.lock().await.identities.get(identity).copied()
    }

    /// Names of all zones that currently have members.
    pub async fn zone_names(&self) -> Vec<ZoneName> {
        let state = self.state.lock().await;
        let mut names: Vec<ZoneName> = state.zones.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn stats(&self) -> RegistryStats {
        let state = self.state.lock().await;
        RegistryStats {
            zones: state.zones.len(),
            identities: state.identities.len(),
            connections: state.connections.len(),
        }
    }
}

impl Default for ZoneRegistry {
    fn default() -> Self {
        Self::new()
    }
}
