//! Zonecast - zone-based WebSocket fan-out relay
//!
//! Subscribers connect over WebSocket naming the zones they want to hear from.
//! An admin endpoint publishes text messages to a zone and the relay delivers
//! them to every connection currently registered there.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
