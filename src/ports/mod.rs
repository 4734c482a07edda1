//! Ports - Interfaces between the relay core and the transport.
//!
//! The registry, broadcast engine and lifecycle loop only ever see these
//! traits; the WebSocket adapter implements them.
//!
//! - `Connection` - Shared outbound half with serialized writes
//! - `InboundStream` - Exclusive inbound half read by the lifecycle loop

mod connection;

pub use connection::{Connection, InboundStream};
