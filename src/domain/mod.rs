//! Domain layer: the values the relay moves around.
//!
//! # Module Organization
//!
//! - `identity` - Client identities and the assigner that issues them
//! - `zone` - Zone names and `zones` parameter parsing
//! - `connection` - Connection handles, payloads, inbound events
//! - `errors` - Per-connection send/receive errors

pub mod connection;
pub mod errors;
pub mod identity;
pub mod zone;

pub use connection::{ConnectionId, Inbound, Payload};
pub use errors::{ReceiveError, SendError};
pub use identity::{Identity, IdentityAssigner, ResolvedIdentity};
pub use zone::{parse_zones, ZoneName, ZoneSet};
