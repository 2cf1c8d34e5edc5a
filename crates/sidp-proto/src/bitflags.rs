//! 32-bit flags-field bit operations.
//!
//! A thin newtype over `u32` mirroring the reference's `set_bit`/`clear_bit`/
//! `toggle_bit`/`test_bit` helpers. Kept separate from the higher-level
//! [`crate::support::SupportFlags`]/[`crate::support::StatusFlags`] newtypes so
//! the bit-position arithmetic has exactly one implementation.

/// A 32-bit field addressed by bit position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flags32(u32);

impl Flags32 {
    /// The empty flags field.
    pub const EMPTY: Self = Self(0);

    /// Wrap a raw `u32` value.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw `u32` value.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Set the `n`th bit.
    pub const fn set_bit(&mut self, n: u32) {
        self.0 |= 1 << n;
    }

    /// Clear the `n`th bit.
    pub const fn clear_bit(&mut self, n: u32) {
        self.0 &= !(1 << n);
    }

    /// Toggle the `n`th bit.
    pub const fn toggle_bit(&mut self, n: u32) {
        self.0 ^= 1 << n;
    }

    /// Test whether the `n`th bit is set.
    #[must_use]
    pub const fn test_bit(self, n: u32) -> bool {
        (self.0 & (1 << n)) != 0
    }

    /// Bitwise intersection with `other`.
    #[must_use]
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Whether no bits are set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Flags32 {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<Flags32> for u32 {
    fn from(flags: Flags32) -> Self {
        flags.0
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn set_then_test() {
        let mut f = Flags32::EMPTY;
        f.set_bit(3);
        assert!(f.test_bit(3));
        assert!(!f.test_bit(4));
    }

    #[test]
    fn clear_unsets_only_target_bit() {
        let mut f = Flags32::from_bits(0b1111);
        f.clear_bit(1);
        assert_eq!(f.bits(), 0b1101);
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut f = Flags32::from_bits(0b1010);
        f.toggle_bit(0);
        f.toggle_bit(0);
        assert_eq!(f.bits(), 0b1010);
    }

    #[test]
    fn intersect_keeps_common_bits_only() {
        let a = Flags32::from_bits(0b1100);
        let b = Flags32::from_bits(0b1010);
        assert_eq!(a.intersect(b).bits(), 0b1000);
    }

    proptest! {
        #[test]
        fn set_bit_is_idempotent(bits in any::<u32>(), n in 0u32..32) {
            let mut f = Flags32::from_bits(bits);
            f.set_bit(n);
            let once = f.bits();
            f.set_bit(n);
            prop_assert_eq!(f.bits(), once);
        }

        #[test]
        fn set_then_clear_restores_original_when_bit_was_unset(bits in any::<u32>(), n in 0u32..32) {
            let mut f = Flags32::from_bits(bits);
            let was_set = f.test_bit(n);
            f.set_bit(n);
            f.clear_bit(n);
            if !was_set {
                prop_assert_eq!(f.bits(), bits);
            }
        }
    }
}
