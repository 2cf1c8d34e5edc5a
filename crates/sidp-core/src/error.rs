//! The top-level error taxonomy (`SPEC_FULL.md` §7).
//!
//! Every sequence and chain function returns `Result<T, SidpError>` (or a
//! tighter per-layer error for calls internal to one layer); `SidpError`
//! is the `From`-convertible union every caller-facing API surfaces.

use sidp_codec::CodecError;
use sidp_proto::{AlgorithmFamily, FramingError, ResourceError, StatusFlags};
use sidp_srp::SrpError;
use thiserror::Error;

/// The underlying byte-stream read/write failed or short-returned.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The stream's `read`/`write` call returned an I/O error.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fewer bytes were available than the call required, with no error
    /// reported (an EOF-short-read, per `SPEC_FULL.md` §4.1).
    #[error("unexpected EOF: expected {expected} bytes, got {actual}")]
    UnexpectedEof {
        /// Bytes the caller required.
        expected: usize,
        /// Bytes actually transferred before the stream ended.
        actual: usize,
    },
}

/// A sequence was invoked with a precondition unmet, or could not agree on
/// shared state with its peer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// A sequence requires status bits this connection does not have set.
    #[error("missing status: required {required:?}, have {actual:?}")]
    MissingStatus {
        /// Bits the sequence requires.
        required: StatusFlags,
        /// Bits actually set.
        actual: StatusFlags,
    },

    /// The Init sequence's device-id reciprocity check failed.
    #[error("device id mismatch during init")]
    DeviceIdMismatch,

    /// The Init sequence received a `conn_type` it does not handle.
    #[error("invalid connection type: {0:#06x}")]
    InvalidConnType(u16),

    /// Negotiation's intersection left zero bits set in one algorithm
    /// family.
    #[error("no common algorithm agreed for {0:?}")]
    NoCommonAlgorithm(AlgorithmFamily),
}

/// SRP-6a rejected a peer's input or proof.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Propagated from [`sidp_srp::SrpError`].
    #[error(transparent)]
    Srp(#[from] SrpError),

    /// The host's password-lookup callback had no entry for the claimed
    /// username.
    #[error("unknown user")]
    UnknownUser,
}

/// The union of every error kind a `sidp-core` call can return.
#[derive(Error, Debug)]
pub enum SidpError {
    /// See [`TransportError`].
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// See [`sidp_proto::FramingError`].
    #[error(transparent)]
    Framing(#[from] FramingError),

    /// See [`sidp_codec::CodecError`].
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// See [`StateError`].
    #[error(transparent)]
    State(#[from] StateError),

    /// See [`AuthError`].
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// See [`sidp_proto::ResourceError`].
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl From<std::io::Error> for SidpError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(TransportError::Io(err))
    }
}

impl From<SrpError> for SidpError {
    fn from(err: SrpError) -> Self {
        Self::Auth(AuthError::Srp(err))
    }
}

/// Shorthand for `Result<T, SidpError>`.
pub type SidpResult<T> = Result<T, SidpError>;
