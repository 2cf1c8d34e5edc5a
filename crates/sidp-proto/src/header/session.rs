//! The Session Layer's 16-byte default encapsulation header.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::errors::FramingError;

/// Fixed 16-byte session header (big-endian network byte order).
///
/// Wrapped around every payload by the session-layer codec under tag
/// `SessionKind::Default` (see `sidp-codec`). Source/destination device ids
/// and the session id round-trip exactly; `reserved` is always zero on
/// output and ignored on input.
#[repr(C, packed)]
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct SessionHeader {
    sdev: [u8; 4],
    ddev: [u8; 4],
    session_id: [u8; 4],
    reserved: [u8; 4],
}

impl SessionHeader {
    /// Size of the serialized header.
    pub const SIZE: usize = 16;

    /// Build a new header.
    #[must_use]
    pub const fn new(sdev: u32, ddev: u32, session_id: u32) -> Self {
        Self {
            sdev: sdev.to_be_bytes(),
            ddev: ddev.to_be_bytes(),
            session_id: session_id.to_be_bytes(),
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

    /// Serialize to a fixed-size byte array.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out.copy_from_slice(self.as_bytes());
        out
    }

    /// Source device id.
    #[must_use]
    pub fn sdev(&self) -> u32 {
        u32::from_be_bytes(self.sdev)
    }

    /// Destination device id.
    #[must_use]
    pub fn ddev(&self) -> u32 {
        u32::from_be_bytes(self.ddev)
    }

    /// Session id.
    #[must_use]
    pub fn session_id(&self) -> u32 {
        u32::from_be_bytes(self.session_id)
    }
}

impl std::fmt::Debug for SessionHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHeader")
            .field("sdev", &self.sdev())
            .field("ddev", &self.ddev())
            .field("session_id", &self.session_id())
            .finish()
    }
}

impl PartialEq for SessionHeader {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for SessionHeader {}
