//! WebSocket adapter for zone subscribers.
//!
//! # Architecture
//!
//! ```text
//! GET /ws?zones=lobby,trade&uuid=U1
//!          │ upgrade
//!          ▼
//! ┌──────────────────────┐   split    ┌──────────────┐   shared with registry
//! │      WebSocket       │ ─────────► │ WsConnection │ ◄─── broadcast tasks
//! └──────────────────────┘            ├──────────────┤
//!                                     │  WsInbound   │ ◄─── session loop
//!                                     └──────────────┘
//! ```
//!
//! # Components
//!
//! - [`connection`] - Port implementations over an axum WebSocket
//! - [`handler`] - Axum upgrade handler and router

pub mod connection;
pub mod handler;

pub use connection::{split_socket, WsConnection, WsInbound};
pub use handler::{websocket_router, ws_handler, ConnectQuery};
