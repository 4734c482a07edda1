//! Application layer - the relay core.
//!
//! - `registry` - Zone membership and identity ownership
//! - `broadcast` - Snapshot-then-spawn fan-out of published payloads
//! - `lifecycle` - Per-connection session loop

pub mod broadcast;
pub mod lifecycle;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_support;

pub use broadcast::{BroadcastEngine, DispatchSummary};
pub use lifecycle::{SessionRequest, SessionRunner, SessionState, SessionSummary};
pub use registry::{JoinOutcome, RegistryStats, ZoneRegistry};
