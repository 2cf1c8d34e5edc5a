//! Wire-format size limits.
//!
//! These bounds come straight from the reference implementation and are
//! load-bearing for interop: a peer that accepts a larger frame than this
//! is not speaking the same protocol.

/// Maximum size of a full wire frame, DL header included.
pub const PKT_MAX_LEN: usize = 65_535;

/// Upper bound reserved for the DL + SL headers plus any layer padding.
pub const PKT_HDRS_MAX_LEN: usize = 1_024;

/// Upper bound on what a single codec layer may add on top of its input.
pub const PKT_LAYER_MAX_PAD_LEN: usize = 128;

/// Largest application message that can be sent in one call.
///
/// `PKT_MAX_LEN - PKT_HDRS_MAX_LEN - PKT_LAYER_MAX_PAD_LEN`
pub const PKT_MSG_MAX_LEN: usize = PKT_MAX_LEN - PKT_HDRS_MAX_LEN - PKT_LAYER_MAX_PAD_LEN;

/// Maximum length of a stored username.
pub const USERNAME_MAX_LEN: usize = 128;

/// Maximum length of stored key material.
pub const KEY_MAX_LEN: usize = 32;
