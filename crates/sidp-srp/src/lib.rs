//! SRP-6a (Secure Remote Password) key exchange for the protocol's
//! Authentication sequence.
//!
//! This crate has no notion of packets, connections, or wire framing — it
//! is pure number-theoretic math plus the SHA-1 transcript hashing SRP-6a
//! specifies, over the fixed 2048-bit group in [`group`]. `sidp-core`'s
//! Authentication sequence marshals [`client::SrpClient`]/
//! [`server::SrpServer`] output into the wire-format `SrpRecord` from
//! `sidp-proto` and drives the four-packet exchange described in the
//! protocol's Authentication sequence design.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod group;
mod math;

pub mod client;
pub mod error;
pub mod server;
pub mod verifier;

pub use client::SrpClient;
pub use error::SrpError;
pub use group::{G, N};
pub use server::SrpServer;
pub use verifier::compute_verifier;
