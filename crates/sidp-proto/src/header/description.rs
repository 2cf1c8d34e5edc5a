//! The outermost, always-cleartext Description Layer header.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{
    errors::FramingError,
    types::{CipherKind, CompressKind, MsgType, SessionKind},
};

/// Fixed 20-byte Description Layer header (big-endian network byte order).
///
/// `def_size` and `inf_size` are declared as 32-bit wire fields, but per the
/// reference's documented wire quirk (see `SPEC_FULL.md` §9), only the low
/// 16 bits ever carry a value — the high 16 bits are always zero on the
/// wire. This reimplementation preserves that convention exactly rather than
/// widening the field, since doing so would break interop with any peer
/// still speaking the original wire format.
#[repr(C, packed)]
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct DescriptionHeader {
    def_size: [u8; 4],
    inf_size: [u8; 4],
    session_type: [u8; 2],
    cipher_type: [u8; 2],
    compress_type: [u8; 2],
    msg_type: [u8; 2],
    reserved: [u8; 4],
}

impl DescriptionHeader {
    /// Size of the serialized header.
    pub const SIZE: usize = 20;

    /// Build a new header from its logical fields.
    #[must_use]
    pub fn new(
        def_size: u16,
        inf_size: u16,
        session_type: SessionKind,
        cipher_type: CipherKind,
        compress_type: CompressKind,
        msg_type: MsgType,
    ) -> Self {
        Self {
            def_size: wire_u16_in_u32(def_size),
            inf_size: wire_u16_in_u32(inf_size),
            session_type: session_type.to_wire().to_be_bytes(),
            cipher_type: cipher_type.to_wire().to_be_bytes(),
            compress_type: compress_type.to_wire().to_be_bytes(),
            msg_type: msg_type.to_wire().to_be_bytes(),
            reserved: [0; 4],
        }
    }

    /// Parse a header from the front of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::TooShort`] if `bytes` is shorter than
    /// [`Self::SIZE`].
    pub fn parse(bytes: &[u8]) -> Result<Self, FramingError> {
        let (header, _rest) = Self::ref_from_prefix(bytes)
            .map_err(|_| FramingError::TooShort { expected: Self::SIZE, actual: bytes.len() })?;
        Ok(*header)
    }

    /// Serialize to a byte vector.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out.copy_from_slice(self.as_bytes());
        out
    }

    /// `def_size`: post-processing length of the frame body, excluding this
    /// header (the low 16 bits of the wire field).
    #[must_use]
    pub fn def_size(&self) -> u16 {
        wire_u16_from_u32(self.def_size)
    }

    /// `inf_size`: original (pre-compression) message length.
    #[must_use]
    pub fn inf_size(&self) -> u16 {
        wire_u16_from_u32(self.inf_size)
    }

    /// Decoded `session_type` tag.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::UnknownAlgorithmTag`] for an unregistered tag.
    pub fn session_type(&self) -> Result<SessionKind, FramingError> {
        SessionKind::from_wire(u16::from_be_bytes(self.session_type))
    }

    /// Decoded `cipher_type` tag.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::UnknownAlgorithmTag`] for an unregistered tag.
    pub fn cipher_type(&self) -> Result<CipherKind, FramingError> {
        CipherKind::from_wire(u16::from_be_bytes(self.cipher_type))
    }

    /// Decoded `compress_type` tag.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::UnknownAlgorithmTag`] for an unregistered tag.
    pub fn compress_type(&self) -> Result<CompressKind, FramingError> {
        CompressKind::from_wire(u16::from_be_bytes(self.compress_type))
    }

    /// Decoded `msg_type` tag.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::UnknownMsgType`] for an unregistered tag.
    pub fn msg_type(&self) -> Result<MsgType, FramingError> {
        MsgType::from_wire(u16::from_be_bytes(self.msg_type))
    }
}

/// Encode `value` into the low 16 bits of a big-endian 4-byte wire field.
const fn wire_u16_in_u32(value: u16) -> [u8; 4] {
    let be = value.to_be_bytes();
    [0, 0, be[0], be[1]]
}

/// Decode the low 16 bits of a big-endian 4-byte wire field.
const fn wire_u16_from_u32(bytes: [u8; 4]) -> u16 {
    u16::from_be_bytes([bytes[2], bytes[3]])
}

impl std::fmt::Debug for DescriptionHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptionHeader")
            .field("def_size", &self.def_size())
            .field("inf_size", &self.inf_size())
            .field("session_type", &u16::from_be_bytes(self.session_type))
            .field("cipher_type", &u16::from_be_bytes(self.cipher_type))
            .field("compress_type", &u16::from_be_bytes(self.compress_type))
            .field("msg_type", &u16::from_be_bytes(self.msg_type))
            .finish()
    }
}

impl PartialEq for DescriptionHeader {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for DescriptionHeader {}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn size_is_twenty_bytes() {
        assert_eq!(std::mem::size_of::<DescriptionHeader>(), DescriptionHeader::SIZE);
    }

    #[test]
    fn def_size_high_bits_always_zero_on_wire() {
        let header = DescriptionHeader::new(
            u16::MAX,
            1,
            SessionKind::Default,
            CipherKind::Aes256,
            CompressKind::Zlib,
            MsgType::Data,
        );
        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..2], &[0, 0], "upper 16 bits of def_size must be zero on the wire");
    }

    #[test]
    fn round_trips_through_wire_bytes() {
        let header = DescriptionHeader::new(
            1234,
            5678,
            SessionKind::Default,
            CipherKind::XSalsa20,
            CompressKind::Fastlz,
            MsgType::Data,
        );
        let bytes = header.to_bytes();
        let parsed = DescriptionHeader::parse(&bytes).expect("valid header");
        assert_eq!(parsed.def_size(), 1234);
        assert_eq!(parsed.inf_size(), 5678);
        assert_eq!(parsed.cipher_type().unwrap(), CipherKind::XSalsa20);
        assert_eq!(parsed.compress_type().unwrap(), CompressKind::Fastlz);
    }

    #[test]
    fn rejects_short_buffer() {
        let buf = [0u8; 10];
        assert_eq!(
            DescriptionHeader::parse(&buf),
            Err(FramingError::TooShort { expected: 20, actual: 10 })
        );
    }

    #[test]
    fn rejects_unknown_msg_type() {
        let mut bytes = DescriptionHeader::new(
            0,
            0,
            SessionKind::Default,
            CipherKind::Aes256,
            CompressKind::Zlib,
            MsgType::Data,
        )
        .to_bytes();
        bytes[16..18].copy_from_slice(&99u16.to_be_bytes());
        let parsed = DescriptionHeader::parse(&bytes).expect("still parses structurally");
        assert_eq!(parsed.msg_type(), Err(FramingError::UnknownMsgType(99)));
    }

    proptest! {
        #[test]
        fn def_inf_size_round_trip(def in any::<u16>(), inf in any::<u16>()) {
            let header = DescriptionHeader::new(
                def, inf, SessionKind::Default, CipherKind::Aes256, CompressKind::Zlib, MsgType::Data,
            );
            let parsed = DescriptionHeader::parse(&header.to_bytes()).unwrap();
            prop_assert_eq!(parsed.def_size(), def);
            prop_assert_eq!(parsed.inf_size(), inf);
        }
    }

    #[test]
    fn wire_bytes_match_known_layout() {
        let header = DescriptionHeader::new(
            1234,
            5678,
            SessionKind::Default,
            CipherKind::Aes256,
            CompressKind::Zlib,
            MsgType::Data,
        );
        insta::assert_debug_snapshot!(header.to_bytes());
    }
}
