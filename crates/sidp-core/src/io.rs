//! Loop-until-complete reads/writes over a reliable byte stream
//! (`SPEC_FULL.md` §4.1).
//!
//! Free functions rather than `Connection` methods, so the packet chains
//! can thread a connection's stream and its statistics fields through
//! independently without fighting the borrow checker over `&mut self`.

use std::{
    io::{ErrorKind, Read, Write},
    time::Instant,
};

use crate::{environment::Environment, error::TransportError};

/// Read exactly `buf.len()` bytes, looping until complete.
///
/// Every completed partial read advances `bytes_read` and `last_read_at`,
/// even on a call that ultimately fails — matching the reference's
/// "every completed partial transfer updates the counter" guarantee.
///
/// # Errors
///
/// Returns [`TransportError::Io`] if the stream reports an error, or
/// [`TransportError::UnexpectedEof`] if it returns `Ok(0)` before `buf` is
/// full.
pub(crate) fn read_exact_tracked<S: Read, E: Environment>(
    stream: &mut S,
    buf: &mut [u8],
    bytes_read: &mut u64,
    last_read_at: &mut Option<Instant>,
    env: &E,
) -> Result<(), TransportError> {
    let mut total = 0;
    while total < buf.len() {
        match stream.read(&mut buf[total..]) {
            Ok(0) => {
                return Err(TransportError::UnexpectedEof { expected: buf.len(), actual: total });
            },
            Ok(n) => {
                total += n;
                *bytes_read += n as u64;
                *last_read_at = Some(env.now());
            },
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(TransportError::Io(e)),
        }
    }
    Ok(())
}

/// Write exactly `buf.len()` bytes, looping until complete.
///
/// # Errors
///
/// Returns [`TransportError::Io`] if the stream reports an error, or
/// [`TransportError::UnexpectedEof`] if it writes `Ok(0)` before `buf` is
/// exhausted.
pub(crate) fn write_exact_tracked<S: Write, E: Environment>(
    stream: &mut S,
    buf: &[u8],
    bytes_written: &mut u64,
    last_write_at: &mut Option<Instant>,
    env: &E,
) -> Result<(), TransportError> {
    let mut total = 0;
    while total < buf.len() {
        match stream.write(&buf[total..]) {
            Ok(0) => {
                return Err(TransportError::UnexpectedEof { expected: buf.len(), actual: total });
            },
            Ok(n) => {
                total += n;
                *bytes_written += n as u64;
                *last_write_at = Some(env.now());
            },
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(TransportError::Io(e)),
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::environment::SystemEnvironment;

    #[test]
    fn read_exact_tracked_updates_counters() {
        let mut cursor = Cursor::new(vec![1u8, 2, 3, 4]);
        let mut buf = [0u8; 4];
        let mut bytes_read = 0;
        let mut last_read_at = None;
        let env = SystemEnvironment;

        read_exact_tracked(&mut cursor, &mut buf, &mut bytes_read, &mut last_read_at, &env)
            .expect("full read");

        assert_eq!(buf, [1, 2, 3, 4]);
        assert_eq!(bytes_read, 4);
        assert!(last_read_at.is_some());
    }

    #[test]
    fn read_exact_tracked_fails_on_short_stream() {
        let mut cursor = Cursor::new(vec![1u8, 2]);
        let mut buf = [0u8; 4];
        let mut bytes_read = 0;
        let mut last_read_at = None;
        let env = SystemEnvironment;

        let err =
            read_exact_tracked(&mut cursor, &mut buf, &mut bytes_read, &mut last_read_at, &env)
                .unwrap_err();

        assert!(matches!(err, TransportError::UnexpectedEof { expected: 4, actual: 2 }));
        assert_eq!(bytes_read, 2, "partial transfer before the failure must still be counted");
    }

    #[test]
    fn write_exact_tracked_updates_counters() {
        let mut out = Vec::new();
        let mut bytes_written = 0;
        let mut last_write_at = None;
        let env = SystemEnvironment;

        write_exact_tracked(&mut out, b"hello", &mut bytes_written, &mut last_write_at, &env)
            .expect("full write");

        assert_eq!(out, b"hello");
        assert_eq!(bytes_written, 5);
        assert!(last_write_at.is_some());
    }
}
