//! Logical packet and per-call codec options (`SPEC_FULL.md` §3).
//!
//! Unlike the wire headers in `sidp-proto`, these are stack-scoped,
//! in-memory shapes: a [`Packet`] is what a chain hands back to its caller,
//! and [`PacketOptions`] is what a caller hands to a chain to pick codecs.

use sidp_proto::{CipherKind, CompressKind, MsgType, SessionKind};

/// A decoded (or about-to-be-encoded) application-level packet.
#[derive(Debug, Clone)]
pub struct Packet {
    /// Source device id.
    pub sdev: u32,
    /// Destination device id.
    pub ddev: u32,
    /// Session id.
    pub session_id: u32,
    /// The message payload.
    pub msg: Vec<u8>,
}

/// Per-call codec selection and key material, ephemeral to one send/receive.
#[derive(Debug, Clone)]
pub struct PacketOptions {
    /// Session-layer encapsulation to use.
    pub session_type: SessionKind,
    /// Encryption-layer cipher to use (ignored for non-`DATA` messages).
    pub cipher_type: CipherKind,
    /// Compression-layer compressor to use (ignored for non-`DATA`
    /// messages).
    pub compress_type: CompressKind,
    /// What kind of message this call is sending or expects to receive.
    pub msg_type: MsgType,
    /// Key material for the encryption layer (ignored for non-`DATA`
    /// messages).
    pub key: Vec<u8>,
}

impl PacketOptions {
    /// Options for a cleartext control message (`AUTH`/`NEGOTIATE`/`INIT`):
    /// compression and encryption are never consulted for these, so their
    /// tags are nominal.
    #[must_use]
    pub fn control(msg_type: MsgType) -> Self {
        Self {
            session_type: SessionKind::Default,
            cipher_type: CipherKind::Aes256,
            compress_type: CompressKind::Fastlz,
            msg_type,
            key: Vec::new(),
        }
    }

    /// Options for a `DATA` message under the negotiated algorithms.
    #[must_use]
    pub fn data(cipher_type: CipherKind, compress_type: CompressKind, key: Vec<u8>) -> Self {
        Self {
            session_type: SessionKind::Default,
            cipher_type,
            compress_type,
            msg_type: MsgType::Data,
            key,
        }
    }
}
