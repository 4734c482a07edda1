//! Fan-out of published payloads to zone members.
//!
//! A publish takes a membership snapshot from the registry, then spawns one
//! task per recipient. Each task owns a clone of the payload and a handle
//! to its recipient, so a failing recipient
//! cannot hold up its siblings or the publisher.
//!
//! ```text
//! publish("lobby", "hi")
//!     │
//!     ├── snapshot_members("lobby") ──► [conn-1, conn-4, conn-9]
//!     │
//!     ├── spawn ─► conn-1.send("hi")   ok
//!     ├── spawn ─► conn-4.send("hi")   err: logged, dropped
//!     └── spawn ─► conn-9.send("hi")   ok
//!     │
//!     └── return DispatchSummary { recipients: 3 }   (does not wait)
//! ```

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{Payload, ZoneName};

use super::registry::ZoneRegistry;

/// What a publish dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSummary {
    pub zone: ZoneName,
    /// Delivery tasks spawned, one per member in the snapshot.
    pub recipients: usize,
}

/// Publishes payloads to every current member of a zone.
#[derive(Clone)]
pub struct BroadcastEngine {
    registry: Arc<ZoneRegistry>,
}

impl BroadcastEngine {
    pub fn new(registry: Arc<ZoneRegistry>) -> Self {
        Self { registry }
    }

    /// Dispatches `payload` to the members of `zone` and returns without
    /// waiting for delivery.
    ///
    /// A zone with no members (or that never existed) is a no-op.
    pub async fn publish(&self, zone: &ZoneName, payload: Payload) -> DispatchSummary {
        let members = self.registry.snapshot_members(zone).await;

        if members.is_empty() {
            debug!(zone = %zone, "No connections in zone, nothing to send");
            return DispatchSummary {
                zone: zone.clone(),
                recipients: 0,
            };
        }

        debug!(zone = %zone, recipients = members.len(), bytes = payload.len(), "Dispatching message");

        let recipients = members.len();
        for member in members {
            let payload = payload.clone();
            let zone = zone.clone();
            tokio::spawn(async move {
                let connection_id = member.id();
                match member.send(payload).await {
                    Ok(()) => {
                        debug!(zone = %zone, connection_id = %connection_id, "Message delivered");
                    }
                    Err(e) => {
                        warn!(
                            zone = %zone,
                            connection_id = %connection_id,
                            "Failed to deliver message: {}",
                            e
                        );
                    }
                }
            });
        }

        DispatchSummary {
            zone: zone.clone(),
            recipients,
        }
    }

    pub fn registry(&self) -> &Arc<ZoneRegistry> {
        &self.registry
    }
}
