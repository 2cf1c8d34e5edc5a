//! Session/Compression/Encryption layer codec implementations.
//!
//! `sidp-proto` defines the tagged enums (`SessionKind`, `CompressKind`,
//! `CipherKind`) and the wire shapes both peers must agree on; this crate
//! supplies the actual transforms behind each tag, dispatched through the
//! small traits in [`session`], [`compress`] and [`cipher`] rather than the
//! reference's function-pointer vtables (see `SPEC_FULL.md` §9).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cipher;
pub mod compress;
pub mod error;
pub mod session;

pub use cipher::{Cipher, resolve_cipher};
pub use compress::{Compressor, resolve_compressor};
pub use error::CodecError;
pub use session::SessionLayer;
