//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the relay core to the outside world:
//! - `websocket` - subscriber sockets backing the `Connection` port
//! - `http` - admin publish endpoint, health check and router composition
//! - `state` - shared handler state

pub mod http;
pub mod state;
pub mod websocket;

pub use http::relay_router;
pub use state::RelayState;
