//! Outgoing/incoming packet chains (`SPEC_FULL.md` §4.6, §4.7).
//!
//! These compose the Description/Session/Encryption/Compression layers
//! around one packet; [`crate::sequence`] and [`crate::packet_api`] are the
//! only callers.

mod bounds;
mod incoming;
mod outgoing;

pub(crate) use bounds::check_receive_bounds;
pub(crate) use incoming::dispatch_in;
pub(crate) use outgoing::dispatch_out;
