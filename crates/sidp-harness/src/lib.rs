//! Test-only building blocks for driving full handshakes: a blocking
//! in-memory duplex stream and a deterministic clock/RNG [`Environment`]
//! implementation.
//!
//! Neither piece is specific to any one sequence — they exist so
//! integration tests can run `init_user`/`init_host`,
//! `negotiate_user`/`negotiate_host`, `auth_user`/`auth_host`, and
//! `data_send`/`data_recv` across two real threads with reproducible
//! randomness, the way a host application's own test suite would.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod duplex;
mod environment;

pub use duplex::{DuplexStream, duplex_pair};
pub use environment::DeterministicEnvironment;
pub use sidp_core::Environment;
