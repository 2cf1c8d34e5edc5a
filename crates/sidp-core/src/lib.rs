//! The secure inter-device protocol's connection engine.
//!
//! This crate owns the four-phase connection lifecycle (Init → Auth →
//! Negotiate → Data), the layered packet chains that frame every message on
//! the wire, and the thin packet API a host application drives directly.
//! Wire shapes live in `sidp-proto`, codec backends in `sidp-codec`, and
//! SRP-6a math in `sidp-srp`; this crate wires all three together behind a
//! synchronous `Read + Write` stream.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod chain;
mod config;
mod connection;
mod environment;
mod error;
mod io;
mod packet;
mod packet_api;
mod sequence;

pub use config::{ConnectionConfig, ConnectionConfigBuilder};
pub use connection::Connection;
pub use environment::{Environment, SystemEnvironment};
pub use error::{AuthError, SidpError, SidpResult, StateError, TransportError};
pub use packet::{Packet, PacketOptions};
pub use packet_api::{pkt_raw_recv, pkt_raw_send, pkt_recv, pkt_send};
pub use sequence::{
    auth_host, auth_host_with_lookup, auth_user, data_recv, data_send, init_host, init_user,
    negotiate_host, negotiate_user,
};
