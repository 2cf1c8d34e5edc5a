//! The `def_size`/`inf_size` bounds check shared by the framed incoming
//! chain and the raw receive path (`SPEC_FULL.md` §4.7, §9 "Raw vs framed
//! receive").

use sidp_proto::{
    FramingError,
    constants::{PKT_HDRS_MAX_LEN, PKT_MAX_LEN, PKT_MSG_MAX_LEN},
};

/// Reject `inf_size`/`def_size` combinations that are out of range before
/// any body bytes are read off the wire.
///
/// # Errors
///
/// Returns [`FramingError::OversizedMessage`] if `inf_size` exceeds
/// [`PKT_MSG_MAX_LEN`] or `def_size + PKT_HDRS_MAX_LEN` exceeds
/// [`PKT_MAX_LEN`].
pub(crate) fn check_receive_bounds(inf_size: usize, def_size: usize) -> Result<(), FramingError> {
    if inf_size > PKT_MSG_MAX_LEN {
        return Err(FramingError::OversizedMessage { actual: inf_size, max: PKT_MSG_MAX_LEN });
    }
    if def_size + PKT_HDRS_MAX_LEN > PKT_MAX_LEN {
        return Err(FramingError::OversizedMessage {
            actual: def_size + PKT_HDRS_MAX_LEN,
            max: PKT_MAX_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_maximum_message_size() {
        assert!(check_receive_bounds(PKT_MSG_MAX_LEN, 16).is_ok());
    }

    #[test]
    fn rejects_one_byte_over_the_maximum_message_size() {
        assert_eq!(
            check_receive_bounds(PKT_MSG_MAX_LEN + 1, 16),
            Err(FramingError::OversizedMessage { actual: PKT_MSG_MAX_LEN + 1, max: PKT_MSG_MAX_LEN })
        );
    }

    #[test]
    fn rejects_def_size_that_would_overflow_the_frame() {
        let def_size = PKT_MAX_LEN - PKT_HDRS_MAX_LEN + 1;
        assert!(check_receive_bounds(0, def_size).is_err());
    }
}
