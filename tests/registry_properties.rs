//! Property tests for the zone registry under arbitrary join/leave sequences.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use proptest::prelude::*;

use zonecast::application::ZoneRegistry;
use zonecast::domain::{ConnectionId, Identity, Payload, SendError, ZoneName, ZoneSet};
use zonecast::ports::Connection;

struct NullConnection {
    id: ConnectionId,
}

#[async_trait]
impl Connection for NullConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    async fn send(&self, _payload: Payload) -> Result<(), SendError> {
        Ok(())
    }

    async fn close(&self) {}
}

const ZONES: [&str; 4] = ["", "lobby", "trade", "market"];
const IDENTITIES: [&str; 3] = ["u1", "u2", "u3"];

#[derive(Debug, Clone)]
enum Op {
    /// Identity index and zone bitmask.
    Join(usize, u8),
    /// Index into the sessions opened so far.
    Leave(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..IDENTITIES.len(), 1u8..16).prop_map(|(i, mask)| Op::Join(i, mask)),
        (0..32usize).prop_map(Op::Leave),
    ]
}

fn zones_from_mask(mask: u8) -> ZoneSet {
    ZONES
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, z)| ZoneName::from(*z))
        .collect()
}

struct Session {
    identity: Identity,
    id: ConnectionId,
    zones: ZoneSet,
    open: bool,
}

async fn check_invariants(registry: &ZoneRegistry, sessions: &[Session]) -> Result<(), TestCaseError> {
    // Latest open session per identity is the only one that may be a member.
    let mut current: HashMap<&Identity, &Session> = HashMap::new();
    for session in sessions.iter().filter(|s| s.open) {
        current.insert(&session.identity, session);
    }

    for (identity, session) in &current {
        prop_assert_eq!(registry.connection_for(identity).await, Some(session.id));
        prop_assert_eq!(&registry.zones_of(session.id).await, &session.zones);
    }

    let live: HashSet<ConnectionId> = current.values().map(|s| s.id).collect();
    for zone in registry.zone_names().await {
        let members = registry.member_ids(&zone).await;
        prop_assert!(!members.is_empty(), "empty zone {} retained", zone);
        for id in members {
            prop_assert!(live.contains(&id), "stale member {} in {}", id, zone);
        }
    }

    let stats = registry.stats().await;
    prop_assert_eq!(stats.identities, current.len());
    prop_assert_eq!(stats.connections, current.len());
    Ok(())
}

async fn run_ops(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let registry = ZoneRegistry::new();
    let mut sessions: Vec<Session> = Vec::new();

    for op in ops {
        match op {
            Op::Join(i, mask) => {
                let identity = Identity::from(IDENTITIES[i]);
                let id = registry.allocate_connection_id();
                let zones = zones_from_mask(mask);
                registry
                    .join(&identity, Arc::new(NullConnection { id }), &zones)
                    .await;
                // The displaced session stays open but is no longer registered.
                for s in sessions.iter_mut().filter(|s| s.identity == identity) {
                    s.open = false;
                }
                sessions.push(Session {
                    identity,
                    id,
                    zones,
                    open: true,
                });
            }
            Op::Leave(n) => {
                if sessions.is_empty() {
                    continue;
                }
                let idx = n % sessions.len();
                let session = &mut sessions[idx];
                registry
                    .leave(&session.identity, session.id, &session.zones)
                    .await;
                session.open = false;
            }
        }
        check_invariants(&registry, &sessions).await?;
    }

    Ok(())
}

proptest! {
    #[test]
    fn registry_keeps_one_connection_per_identity(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(run_ops(ops))?;
    }
}
