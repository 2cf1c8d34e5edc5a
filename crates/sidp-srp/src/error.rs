//! Errors from the SRP-6a key-exchange math.
//!
//! These are converted into `sidp-core`'s `AuthError` at the Authentication
//! sequence boundary (§4.10); this crate has no notion of packets or
//! connections, only the math.

use thiserror::Error;

/// A step of the SRP-6a exchange rejected its input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SrpError {
    /// A peer's public value (`A` or `B`) was `0 mod N`, or the derived
    /// scrambling parameter `u` was zero. Both are the SRP-6a safety checks
    /// that guard against a peer choosing a degenerate public value to force
    /// a predictable shared secret.
    #[error("SRP-6a safety check failed: degenerate public value or zero scrambling parameter")]
    SafetyCheckFailed,

    /// The peer's proof of the shared secret (`M`) did not match what this
    /// side computed independently.
    #[error("SRP-6a verification failed: proof mismatch")]
    VerificationFailed,
}
