//! Cleartext payload records carried by the Init/Negotiate/Auth sequences.
//!
//! Unlike the DL/SL headers, these records travel as the session-layer's
//! plaintext body (see the wire diagram in `SPEC_FULL.md` §6) — they are
//! never compressed or encrypted, since only `DATA` messages go through
//! those layers.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{errors::FramingError, types::ConnType};

/// Init sequence record: `sdev, ddev, sid, conn_type`, all big-endian.
#[repr(C, packed)]
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct InitRecord {
    sdev: [u8; 4],
    ddev: [u8; 4],
    sid: [u8; 4],
    conn_type: [u8; 2],
}

impl InitRecord {
    /// Size of the serialized record.
    pub const SIZE: usize = 14;

    /// Build a new record.
    #[must_use]
    pub const fn new(sdev: u32, ddev: u32, sid: u32, conn_type: ConnType) -> Self {
        Self {
            sdev: sdev.to_be_bytes(),
            ddev: ddev.to_be_bytes(),
            sid: sid.to_be_bytes(),
            conn_type: conn_type.to_wire().to_be_bytes(),
        }
    }

    /// Parse from the front of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::TooShort`] if `bytes` is shorter than
    /// [`Self::SIZE`].
    pub fn parse(bytes: &[u8]) -> Result<Self, FramingError> {
        let (record, _rest) = Self::ref_from_prefix(bytes)
            .map_err(|_| FramingError::TooShort { expected: Self::SIZE, actual: bytes.len() })?;
        Ok(*record)
    }

    /// Serialize to bytes.
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
    pub fn sid(&self) -> u32 {
        u32::from_be_bytes(self.sid)
    }

    /// Decoded connection type.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::UnknownAlgorithmTag`] for an unregistered tag.
    pub fn conn_type(&self) -> Result<ConnType, FramingError> {
        ConnType::from_wire(u16::from_be_bytes(self.conn_type))
    }
}

/// Negotiation sequence record: a single big-endian `flags` bitmap.
#[repr(C, packed)]
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct NegotiationRecord {
    flags: [u8; 4],
}

impl NegotiationRecord {
    /// Size of the serialized record.
    pub const SIZE: usize = 4;

    /// Build a new record.
    #[must_use]
    pub const fn new(flags: u32) -> Self {
        Self { flags: flags.to_be_bytes() }
    }

    /// Parse from the front of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::TooShort`] if `bytes` is shorter than
    /// [`Self::SIZE`].
    pub fn parse(bytes: &[u8]) -> Result<Self, FramingError> {
        let (record, _rest) = Self::ref_from_prefix(bytes)
            .map_err(|_| FramingError::TooShort { expected: Self::SIZE, actual: bytes.len() })?;
        Ok(*record)
    }

    /// Serialize to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out.copy_from_slice(self.as_bytes());
        out
    }

    /// The raw flags bitmap.
    #[must_use]
    pub fn flags(&self) -> u32 {
        u32::from_be_bytes(self.flags)
    }
}

/// SRP exchange record: fixed-capacity slots for every SRP-6a message field.
///
/// Sized to carry the longest message in the four-packet exchange (§4.10).
/// Unused trailing bytes in each slot are zero; the `len_*` fields tell the
/// reader how many leading bytes of each slot are significant.
#[repr(C, packed)]
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct SrpRecord {
    username: [u8; 128],
    a_pub: [u8; 512],
    salt: [u8; 16],
    b_pub: [u8; 512],
    m: [u8; 32],
    hamk: [u8; 32],
    len_a: [u8; 2],
    len_salt: [u8; 2],
    len_b: [u8; 2],
    len_m: [u8; 2],
    len_hamk: [u8; 2],
}

impl SrpRecord {
    /// Size of the serialized record.
    pub const SIZE: usize = 128 + 512 + 16 + 512 + 32 + 32 + 2 * 5;

    /// Username slot capacity.
    pub const USERNAME_CAP: usize = 128;
    /// `A`/`B` public-value slot capacity.
    pub const PUBLIC_VALUE_CAP: usize = 512;
    /// Salt slot capacity.
    pub const SALT_CAP: usize = 16;
    /// `M`/`HAMK` digest slot capacity.
    pub const DIGEST_CAP: usize = 32;

    /// An all-zero record with no fields populated.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            username: [0; 128],
            a_pub: [0; 512],
            salt: [0; 16],
            b_pub: [0; 512],
            m: [0; 32],
            hamk: [0; 32],
            len_a: [0; 2],
            len_salt: [0; 2],
            len_b: [0; 2],
            len_m: [0; 2],
            len_hamk: [0; 2],
        }
    }

    /// Parse from the front of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::TooShort`] if `bytes` is shorter than
    /// [`Self::SIZE`].
    pub fn parse(bytes: &[u8]) -> Result<Self, FramingError> {
        let (record, _rest) = Self::ref_from_prefix(bytes)
            .map_err(|_| FramingError::TooShort { expected: Self::SIZE, actual: bytes.len() })?;
        Ok(*record)
    }

    /// Serialize to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out.copy_from_slice(self.as_bytes());
        out
    }

    /// Username, truncated to [`Self::USERNAME_CAP`] and zero-padded.
    ///
    /// Callers are expected to validate `username.len() <= USERNAME_CAP`
    /// themselves (the connection layer enforces this via
    /// `ResourceError::UsernameTooLarge` before reaching here); this setter
    /// truncates silently rather than panicking.
    pub fn set_username(&mut self, username: &[u8]) {
        set_slot(&mut self.username, username);
    }

    /// The username slot, trimmed of trailing zero padding.
    #[must_use]
    pub fn username(&self) -> &[u8] {
        trim_trailing_zeros(&self.username)
    }

    /// Set `A` and its length field.
    pub fn set_a(&mut self, value: &[u8]) {
        set_slot(&mut self.a_pub, value);
        self.len_a = (value.len() as u16).to_be_bytes();
    }

    /// `A`, sliced to its declared length.
    #[must_use]
    pub fn a(&self) -> &[u8] {
        &self.a_pub[..self.len_a().min(Self::PUBLIC_VALUE_CAP)]
    }

    /// Declared length of `A`.
    #[must_use]
    pub fn len_a(&self) -> usize {
        u16::from_be_bytes(self.len_a) as usize
    }

    /// Set `s` (salt) and its length field.
    pub fn set_salt(&mut self, value: &[u8]) {
        set_slot(&mut self.salt, value);
        self.len_salt = (value.len() as u16).to_be_bytes();
    }

    /// `s`, sliced to its declared length.
    #[must_use]
    pub fn salt(&self) -> &[u8] {
        &self.salt[..self.len_salt().min(Self::SALT_CAP)]
    }

    /// Declared length of `s`.
    #[must_use]
    pub fn len_salt(&self) -> usize {
        u16::from_be_bytes(self.len_salt) as usize
    }

    /// Set `B` and its length field.
    pub fn set_b(&mut self, value: &[u8]) {
        set_slot(&mut self.b_pub, value);
        self.len_b = (value.len() as u16).to_be_bytes();
    }

    /// `B`, sliced to its declared length.
    #[must_use]
    pub fn b(&self) -> &[u8] {
        &self.b_pub[..self.len_b().min(Self::PUBLIC_VALUE_CAP)]
    }

    /// Declared length of `B`.
    #[must_use]
    pub fn len_b(&self) -> usize {
        u16::from_be_bytes(self.len_b) as usize
    }

    /// Set `M` and its length field.
    pub fn set_m(&mut self, value: &[u8]) {
        set_slot(&mut self.m, value);
        self.len_m = (value.len() as u16).to_be_bytes();
    }

    /// `M`, sliced to its declared length.
    #[must_use]
    pub fn m(&self) -> &[u8] {
        &self.m[..self.len_m().min(Self::DIGEST_CAP)]
    }

    /// Declared length of `M`.
    #[must_use]
    pub fn len_m(&self) -> usize {
        u16::from_be_bytes(self.len_m) as usize
    }

    /// Set `HAMK` and its length field.
    pub fn set_hamk(&mut self, value: &[u8]) {
        set_slot(&mut self.hamk, value);
        self.len_hamk = (value.len() as u16).to_be_bytes();
    }

    /// `HAMK`, sliced to its declared length.
    #[must_use]
    pub fn hamk(&self) -> &[u8] {
        &self.hamk[..self.len_hamk().min(Self::DIGEST_CAP)]
    }

    /// Declared length of `HAMK`.
    #[must_use]
    pub fn len_hamk(&self) -> usize {
        u16::from_be_bytes(self.len_hamk) as usize
    }
}

/// Copy `value` into the front of `slot`, zeroing the rest. Truncates if
/// `value` is longer than the slot.
fn set_slot<const N: usize>(slot: &mut [u8; N], value: &[u8]) {
    *slot = [0; N];
    let copy_len = value.len().min(N);
    slot[..copy_len].copy_from_slice(&value[..copy_len]);
}

fn trim_trailing_zeros(slot: &[u8]) -> &[u8] {
    let end = slot.iter().rposition(|&b| b != 0).map_or(0, |pos| pos + 1);
    &slot[..end]
}
