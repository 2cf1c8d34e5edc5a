//! Wire-framing and resource-limit errors.
//!
//! These two enums are the bottom of the error taxonomy (§7 of the design
//! notes): every other crate's error type wraps or converts from these
//! rather than duplicating "unknown tag"/"too large" variants.

use thiserror::Error;

/// Header fields outside allowed ranges, length mismatches, unknown tags.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramingError {
    /// Buffer shorter than a fixed-size header requires.
    #[error("buffer too short: expected at least {expected} bytes, got {actual}")]
    TooShort {
        /// Minimum required length.
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },

    /// `def_size`/`inf_size`/payload lengths disagree.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// A DL header tag (`session_type`/`cipher_type`/`compress_type`) isn't
    /// in the algorithm registry.
    #[error("unknown algorithm tag: {0:#06x}")]
    UnknownAlgorithmTag(u16),

    /// A DL header `msg_type` isn't in the registry.
    #[error("unknown message type: {0:#06x}")]
    UnknownMsgType(u16),

    /// A message exceeds `PKT_MSG_MAX_LEN` or a frame exceeds `PKT_MAX_LEN`.
    #[error("oversized message: {actual} exceeds maximum of {max}")]
    OversizedMessage {
        /// Offending length.
        actual: usize,
        /// Maximum allowed length.
        max: usize,
    },
}

/// Heap-allocation or fixed-capacity-field overflow.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceError {
    /// Key material exceeds `KEY_MAX_LEN`.
    #[error("key material too large: {actual} exceeds maximum of {max}")]
    KeyTooLarge {
        /// Offending length.
        actual: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// Username exceeds `USERNAME_MAX_LEN`.
    #[error("username too large: {actual} exceeds maximum of {max}")]
    UsernameTooLarge {
        /// Offending length.
        actual: usize,
        /// Maximum allowed length.
        max: usize,
    },
}
