//! Algorithm-tag and message-type enums carried on the wire as `u16`s.

use crate::errors::FramingError;

/// Message kind, carried in the DL header's `msg_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum MsgType {
    /// Application data, routed through compression and encryption.
    Data = 1,
    /// One of the four SRP-6a authentication packets.
    Auth = 2,
    /// Support-flags exchange.
    Negotiate = 3,
    /// Device-id/session-id exchange.
    Init = 4,
}

impl MsgType {
    /// Decode from a wire `u16`.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::UnknownMsgType`] for any value outside the
    /// registry.
    pub const fn from_wire(value: u16) -> Result<Self, FramingError> {
        match value {
            1 => Ok(Self::Data),
            2 => Ok(Self::Auth),
            3 => Ok(Self::Negotiate),
            4 => Ok(Self::Init),
            other => Err(FramingError::UnknownMsgType(other)),
        }
    }

    /// Encode to the wire `u16`.
    #[must_use]
    pub const fn to_wire(self) -> u16 {
        self as u16
    }
}

/// Session-layer encapsulation tag, carried in the DL header's `session_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum SessionKind {
    /// The only registered encapsulation.
    Default = 1,
}

impl SessionKind {
    /// Decode from a wire `u16`.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::UnknownAlgorithmTag`] for any value outside
    /// the registry.
    pub const fn from_wire(value: u16) -> Result<Self, FramingError> {
        match value {
            1 => Ok(Self::Default),
            other => Err(FramingError::UnknownAlgorithmTag(other)),
        }
    }

    /// Encode to the wire `u16`.
    #[must_use]
    pub const fn to_wire(self) -> u16 {
        self as u16
    }
}

/// Encryption-layer cipher tag, carried in the DL header's `cipher_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum CipherKind {
    /// AES-256-GCM.
    Aes256 = 1,
    /// XSalsa20-Poly1305.
    XSalsa20 = 2,
    /// ChaCha20-Poly1305, AVX-tagged variant.
    ChaChaAvx = 3,
    /// ChaCha20-Poly1305, AVX2-tagged variant.
    ChaChaAvx2 = 4,
}

impl CipherKind {
    /// Decode from a wire `u16`.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::UnknownAlgorithmTag`] for any value outside
    /// the registry.
    pub const fn from_wire(value: u16) -> Result<Self, FramingError> {
        match value {
            1 => Ok(Self::Aes256),
            2 => Ok(Self::XSalsa20),
            3 => Ok(Self::ChaChaAvx),
            4 => Ok(Self::ChaChaAvx2),
            other => Err(FramingError::UnknownAlgorithmTag(other)),
        }
    }

    /// Encode to the wire `u16`.
    #[must_use]
    pub const fn to_wire(self) -> u16 {
        self as u16
    }
}

/// Compression-layer compressor tag, carried in the DL header's
/// `compress_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum CompressKind {
    /// LZO-tagged backend.
    Lzo = 1,
    /// zlib-tagged backend.
    Zlib = 2,
    /// FastLZ-tagged backend.
    Fastlz = 3,
}

impl CompressKind {
    /// Decode from a wire `u16`.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::UnknownAlgorithmTag`] for any value outside
    /// the registry.
    pub const fn from_wire(value: u16) -> Result<Self, FramingError> {
        match value {
            1 => Ok(Self::Lzo),
            2 => Ok(Self::Zlib),
            3 => Ok(Self::Fastlz),
            other => Err(FramingError::UnknownAlgorithmTag(other)),
        }
    }

    /// Encode to the wire `u16`.
    #[must_use]
    pub const fn to_wire(self) -> u16 {
        self as u16
    }
}

/// Connection type, carried in the Init record's `conn_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ConnType {
    /// No type; only valid on a freshly-created or closed connection.
    None = 0,
    /// Plain point-to-point connection; Init swaps device ids.
    Normal = 1,
    /// Routed connection; Init expects device ids to match in place.
    Routing = 2,
    /// Long-lived connection; Init swaps device ids like Normal.
    Persistent = 3,
}

impl ConnType {
    /// Decode from a wire `u16`.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::UnknownAlgorithmTag`] for any value outside
    /// the registry (the reference treats an invalid `conn_type` the same
    /// way it treats any other malformed tag).
    pub const fn from_wire(value: u16) -> Result<Self, FramingError> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Normal),
            2 => Ok(Self::Routing),
            3 => Ok(Self::Persistent),
            other => Err(FramingError::UnknownAlgorithmTag(other)),
        }
    }

    /// Encode to the wire `u16`.
    #[must_use]
    pub const fn to_wire(self) -> u16 {
        self as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msg_type_round_trips() {
        for value in [1u16, 2, 3, 4] {
            let kind = MsgType::from_wire(value).expect("known tag");
            assert_eq!(kind.to_wire(), value);
        }
    }

    #[test]
    fn unknown_msg_type_is_framing_error() {
        assert_eq!(MsgType::from_wire(99), Err(FramingError::UnknownMsgType(99)));
    }

    #[test]
    fn cipher_priority_order_values() {
        // §4.9: XSalsa20 > ChaCha-AVX > ChaCha-AVX2 > AES-256.
        // These are just distinct registry tags; priority is encoded
        // separately in the negotiation module, not by numeric tag order.
        assert_ne!(CipherKind::XSalsa20.to_wire(), CipherKind::Aes256.to_wire());
    }
}
