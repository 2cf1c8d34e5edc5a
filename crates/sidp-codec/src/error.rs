//! Compression/encryption backend failures.

use thiserror::Error;

/// A compression or encryption backend rejected its input, or a decoded
/// length disagreed with what the Description Layer header promised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The compressor reported a failure while compressing.
    #[error("compression failed: {0}")]
    Compress(String),

    /// The compressor reported a failure while decompressing.
    #[error("decompression failed: {0}")]
    Decompress(String),

    /// The cipher reported a failure while encrypting.
    #[error("encryption failed: {0}")]
    Encrypt(String),

    /// The cipher reported a MAC mismatch or other failure while decrypting.
    #[error("decryption failed: {0}")]
    Decrypt(String),

    /// A decoded length did not match what the caller expected (e.g. the
    /// Description Layer's `inf_size`).
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },
}
