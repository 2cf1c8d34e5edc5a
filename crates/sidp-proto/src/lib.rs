//! Wire types for the secure inter-device protocol.
//!
//! This crate holds everything that must be byte-for-byte identical between
//! a Rust peer and any other conforming peer: the fixed-size headers, the
//! cleartext sequence records, the algorithm-tag registry, and the
//! bit-position registries for the support/negotiate/status bitmaps. It has
//! no I/O, no codec implementations (see `sidp-codec`), and no SRP math (see
//! `sidp-srp`) — only the shapes both sides agree on.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod bitflags;
pub mod constants;
pub mod errors;
pub mod header;
pub mod records;
pub mod support;
pub mod types;

pub use bitflags::Flags32;
pub use errors::{FramingError, ResourceError};
pub use header::{DescriptionHeader, SessionHeader};
pub use records::{InitRecord, NegotiationRecord, SrpRecord};
pub use support::{AlgorithmFamily, StatusFlags, SupportBit, SupportFlags};
pub use types::{CipherKind, CompressKind, ConnType, MsgType, SessionKind};
