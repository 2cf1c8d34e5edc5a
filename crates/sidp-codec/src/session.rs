//! Session Layer (`SL`) encapsulation.
//!
//! Only one encapsulation is registered (`SessionKind::Default`), but the
//! chains dispatch through this trait rather than calling
//! [`SessionHeader`] directly so a second encapsulation could be added
//! without touching `sidp-core`.

use sidp_proto::{FramingError, SessionHeader};

/// Wraps/unwraps the session-layer header around a payload.
pub trait SessionLayer {
    /// Bytes added on top of the payload by [`Self::encap`].
    fn encap_output_len(&self, payload_len: usize) -> usize;

    /// Bytes remaining after [`Self::decap`] strips its header.
    fn decap_output_len(&self, frame_len: usize) -> usize;

    /// Prepend the session header to `payload`, returning the full frame.
    fn encap(&self, sdev: u32, ddev: u32, session_id: u32, payload: &[u8]) -> Vec<u8>;

    /// Split a frame into its session header and trailing payload.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::TooShort`] if `frame` is shorter than the
    /// header size.
    fn decap(&self, frame: &[u8]) -> Result<(SessionHeader, &[u8]), FramingError>;
}

/// The sole registered encapsulation, `SL_ENCAP_TYPE_DEFAULT` (tag 1).
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSessionLayer;

impl SessionLayer for DefaultSessionLayer {
    fn encap_output_len(&self, payload_len: usize) -> usize {
        payload_len + SessionHeader::SIZE
    }

    fn decap_output_len(&self, frame_len: usize) -> usize {
        frame_len.saturating_sub(SessionHeader::SIZE)
    }

    fn encap(&self, sdev: u32, ddev: u32, session_id: u32, payload: &[u8]) -> Vec<u8> {
        let header = SessionHeader::new(sdev, ddev, session_id);
        let mut out = Vec::with_capacity(SessionHeader::SIZE + payload.len());
        out.extend_from_slice(&header.to_bytes());
        out.extend_from_slice(payload);
        out
    }

    fn decap(&self, frame: &[u8]) -> Result<(SessionHeader, &[u8]), FramingError> {
        let header = SessionHeader::parse(frame)?;
        Ok((header, &frame[SessionHeader::SIZE..]))
    }
}
