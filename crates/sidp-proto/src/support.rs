//! Support/negotiate/status bitmaps.
//!
//! `SupportFlags` and the negotiate bitmap share the same bit-position
//! registry (§6 of the protocol's design notes); `StatusFlags` is a
//! separate, smaller registry for phase-completion bits.

use crate::bitflags::Flags32;

/// Bit position within a [`SupportFlags`] (or negotiate) bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SupportBit {
    /// AES-256 cipher offered/negotiated.
    CipherAes256 = 0,
    /// XSalsa20 cipher offered/negotiated.
    CipherXSalsa20 = 1,
    /// ChaCha-AVX cipher offered/negotiated.
    CipherChaChaAvx = 2,
    /// ChaCha-AVX2 cipher offered/negotiated.
    CipherChaChaAvx2 = 3,
    /// LZO compressor offered/negotiated.
    CompressLzo = 4,
    /// zlib compressor offered/negotiated.
    CompressZlib = 5,
    /// FastLZ compressor offered/negotiated.
    CompressFastlz = 6,
    /// Default session encapsulation offered/negotiated.
    EncapDefault = 7,
}

/// The three algorithm families negotiation picks exactly one winner from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmFamily {
    /// Encryption-layer cipher.
    Cipher,
    /// Compression-layer compressor.
    Compressor,
    /// Session-layer encapsulator.
    Encapsulator,
}

/// Bitmap of algorithms offered (support) or agreed (negotiate) by one side.
///
/// Both roles use the same bit-position registry: a `support` bitmap lists
/// everything a side is willing to use, a `negotiate` bitmap (after §4.9
/// runs) has at most one bit set per [`AlgorithmFamily`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SupportFlags(Flags32);

impl SupportFlags {
    /// The empty bitmap.
    pub const EMPTY: Self = Self(Flags32::EMPTY);

    /// Build from a raw wire-order `u32`.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(Flags32::from_bits(bits))
    }

    /// The raw `u32` value, as carried on the wire.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0.bits()
    }

    /// Offer (set) the given bit.
    pub const fn offer(&mut self, bit: SupportBit) {
        self.0.set_bit(bit as u32);
    }

    /// Whether `bit` is set.
    #[must_use]
    pub const fn supports(self, bit: SupportBit) -> bool {
        self.0.test_bit(bit as u32)
    }

    /// Bitwise intersection: what both sides offer.
    #[must_use]
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0.intersect(other.0))
    }

    /// Whether this bitmap has exactly one bit set within `family`.
    #[must_use]
    pub fn has_single_winner(self, family: AlgorithmFamily) -> bool {
        family_bits(family).iter().filter(|&&bit| self.supports(bit)).count() == 1
    }
}

impl From<u32> for SupportFlags {
    fn from(bits: u32) -> Self {
        Self::from_bits(bits)
    }
}

impl From<SupportFlags> for u32 {
    fn from(flags: SupportFlags) -> Self {
        flags.bits()
    }
}

fn family_bits(family: AlgorithmFamily) -> &'static [SupportBit] {
    use SupportBit::{
        CipherAes256, CipherChaChaAvx, CipherChaChaAvx2, CipherXSalsa20, CompressFastlz,
        CompressLzo, CompressZlib, EncapDefault,
    };

    match family {
        AlgorithmFamily::Cipher => {
            &[CipherAes256, CipherXSalsa20, CipherChaChaAvx, CipherChaChaAvx2]
        },
        AlgorithmFamily::Compressor => &[CompressLzo, CompressZlib, CompressFastlz],
        AlgorithmFamily::Encapsulator => &[EncapDefault],
    }
}

/// Phase-completion bits, monotonically OR-ed into a connection's status.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusFlags(Flags32);

impl StatusFlags {
    /// No phase has completed yet.
    pub const NONE: Self = Self(Flags32::EMPTY);
    /// The Init sequence has completed.
    pub const INITIATED: Self = Self(Flags32::from_bits(1 << 0));
    /// The Authentication sequence has completed.
    pub const AUTHENTICATED: Self = Self(Flags32::from_bits(1 << 1));
    /// The Negotiation sequence has completed.
    pub const NEGOTIATED: Self = Self(Flags32::from_bits(1 << 2));

    /// Combine two status bitmaps.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(Flags32::from_bits(self.0.bits() | other.0.bits()))
    }

    /// Whether every bit set in `required` is also set in `self`.
    #[must_use]
    pub const fn contains(self, required: Self) -> bool {
        (self.0.bits() & required.0.bits()) == required.0.bits()
    }

    /// The raw bitmap.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0.bits()
    }
}

impl std::ops::BitOr for StatusFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for StatusFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offer_and_supports_round_trip() {
        let mut flags = SupportFlags::EMPTY;
        flags.offer(SupportBit::CipherXSalsa20);
        assert!(flags.supports(SupportBit::CipherXSalsa20));
        assert!(!flags.supports(SupportBit::CipherAes256));
    }

    #[test]
    fn intersection_matches_scenario_3() {
        let mut user = SupportFlags::EMPTY;
        user.offer(SupportBit::CompressLzo);
        user.offer(SupportBit::CompressFastlz);
        user.offer(SupportBit::CipherXSalsa20);
        user.offer(SupportBit::CipherAes256);
        user.offer(SupportBit::EncapDefault);

        let mut host = SupportFlags::EMPTY;
        host.offer(SupportBit::CompressFastlz);
        host.offer(SupportBit::CipherAes256);
        host.offer(SupportBit::EncapDefault);

        let intersection = user.intersect(host);
        assert!(intersection.supports(SupportBit::CompressFastlz));
        assert!(intersection.supports(SupportBit::CipherAes256));
        assert!(intersection.supports(SupportBit::EncapDefault));
        assert!(!intersection.supports(SupportBit::CompressLzo));
        assert!(!intersection.supports(SupportBit::CipherXSalsa20));
    }

    #[test]
    fn empty_intersection_matches_scenario_4() {
        let mut user = SupportFlags::EMPTY;
        user.offer(SupportBit::CipherXSalsa20);

        let mut host = SupportFlags::EMPTY;
        host.offer(SupportBit::CipherAes256);

        let intersection = user.intersect(host);
        assert!(!intersection.has_single_winner(AlgorithmFamily::Cipher));
    }

    #[test]
    fn status_contains_requires_all_bits() {
        let status = StatusFlags::INITIATED | StatusFlags::AUTHENTICATED;
        assert!(status.contains(StatusFlags::INITIATED));
        assert!(!status.contains(StatusFlags::NEGOTIATED));
        assert!(!status.contains(StatusFlags::INITIATED | StatusFlags::NEGOTIATED));
    }
}
