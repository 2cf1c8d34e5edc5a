//! The four connection-lifecycle sequences: Init, Negotiate, Auth, Data
//! (`SPEC_FULL.md` §4.8–§4.11).
//!
//! Each sequence is a pair of free functions, one per role (`_user`/`_host`
//! or `_send`/`_recv`), built on the packet chains in [`crate::chain`].
//! None of them retain any state beyond what they write back into the
//! [`crate::connection::Connection`] they're given.

mod auth;
mod data;
mod init;
mod negotiate;

pub use auth::{auth_host, auth_host_with_lookup, auth_user};
pub use data::{data_recv, data_send};
pub use init::{init_host, init_user};
pub use negotiate::{negotiate_host, negotiate_user};
