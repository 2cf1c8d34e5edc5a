//! The `Connection` object and its lifecycle (`SPEC_FULL.md` §3, §4.14).

use std::time::Instant;

use sidp_proto::{
    ConnType, ResourceError, StatusFlags, SupportFlags,
    constants::{KEY_MAX_LEN, USERNAME_MAX_LEN},
};

use crate::{config::ConnectionConfig, environment::Environment};

/// Process-local state for one endpoint of one connection.
///
/// `S` is the underlying reliable stream (`Read + Write`); `E` supplies the
/// clock and randomness so statistics and SRP ephemeral secrets are
/// reproducible in tests (`sidp-harness::DeterministicEnvironment`) without
/// being threaded through every call signature by hand.
///
/// Mutated only by the sequence functions in [`crate::sequence`] and the
/// chains in [`crate::chain`], which set status bits in strictly
/// increasing order (`SPEC_FULL.md` §4.13); nothing resurrects a closed
/// connection; `close` consumes `self`.
pub struct Connection<S, E> {
    pub(crate) stream: S,
    pub(crate) env: E,

    pub(crate) local_device: u32,
    pub(crate) peer_device: u32,
    pub(crate) session_id: u32,
    pub(crate) conn_type: ConnType,

    pub(crate) user: Vec<u8>,
    pub(crate) key: Vec<u8>,

    pub(crate) support: SupportFlags,
    pub(crate) negotiate: SupportFlags,
    pub(crate) status: StatusFlags,

    pub(crate) bytes_read: u64,
    pub(crate) bytes_written: u64,
    pub(crate) last_read_at: Option<Instant>,
    pub(crate) last_write_at: Option<Instant>,
}

impl<S, E: Environment> Connection<S, E> {
    /// Create a new connection over `stream`, in the `CREATED` state (no
    /// status bits set).
    pub fn new(stream: S, env: E, config: ConnectionConfig) -> Self {
        Self {
            stream,
            env,
            local_device: config.local_device,
            peer_device: config.peer_device,
            session_id: config.session_id,
            conn_type: config.conn_type,
            user: Vec::new(),
            key: Vec::new(),
            support: config.support,
            negotiate: SupportFlags::EMPTY,
            status: StatusFlags::NONE,
            bytes_read: 0,
            bytes_written: 0,
            last_read_at: None,
            last_write_at: None,
        }
    }

    /// Store raw key material (capped at [`KEY_MAX_LEN`] bytes).
    ///
    /// Not a KDF (`SPEC_FULL.md` §9): the bytes given here are stored
    /// verbatim. A cipher that needs a fixed-size key derives it from this
    /// via `Cipher::create_key` at encrypt/decrypt time.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::KeyTooLarge`] if `key.len() > KEY_MAX_LEN`.
    pub fn set_key(&mut self, key: &[u8]) -> Result<(), ResourceError> {
        if key.len() > KEY_MAX_LEN {
            return Err(ResourceError::KeyTooLarge { max: KEY_MAX_LEN, actual: key.len() });
        }
        self.key = key.to_vec();
        Ok(())
    }

    /// Store the username used by the Authentication sequence (capped at
    /// [`USERNAME_MAX_LEN`] bytes).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UsernameTooLarge`] if
    /// `username.len() > USERNAME_MAX_LEN`.
    pub fn set_user(&mut self, username: &[u8]) -> Result<(), ResourceError> {
        if username.len() > USERNAME_MAX_LEN {
            return Err(ResourceError::UsernameTooLarge {
                max: USERNAME_MAX_LEN,
                actual: username.len(),
            });
        }
        self.user = username.to_vec();
        Ok(())
    }

    /// Replace the algorithms this side offers during negotiation.
    pub fn set_support(&mut self, support: SupportFlags) {
        self.support = support;
    }

    /// Replace the algorithms this side offers, from a raw bitmap.
    pub fn set_support_flags(&mut self, flags: u32) {
        self.support = SupportFlags::from_bits(flags);
    }

    /// Whether the Init sequence has completed.
    #[must_use]
    pub fn is_initiated(&self) -> bool {
        self.status.contains(StatusFlags::INITIATED)
    }

    /// Whether the Authentication sequence has completed.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status.contains(StatusFlags::AUTHENTICATED)
    }

    /// Whether the Negotiation sequence has completed.
    #[must_use]
    pub fn is_negotiated(&self) -> bool {
        self.status.contains(StatusFlags::NEGOTIATED)
    }

    /// The full phase-completion bitmap.
    #[must_use]
    pub fn status_flags(&self) -> StatusFlags {
        self.status
    }

    /// The algorithm bitmap chosen during negotiation.
    #[must_use]
    pub fn negotiate_flags(&self) -> SupportFlags {
        self.negotiate
    }

    /// Total bytes read from the stream so far.
    #[must_use]
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Total bytes written to the stream so far.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Timestamp of the last completed partial read, if any.
    #[must_use]
    pub fn last_read_at(&self) -> Option<Instant> {
        self.last_read_at
    }

    /// Timestamp of the last completed partial write, if any.
    #[must_use]
    pub fn last_write_at(&self) -> Option<Instant> {
        self.last_write_at
    }

    /// The local device id.
    #[must_use]
    pub fn local_device(&self) -> u32 {
        self.local_device
    }

    /// The peer device id (populated/validated by the Init sequence).
    #[must_use]
    pub fn peer_device(&self) -> u32 {
        self.peer_device
    }

    /// The session id.
    #[must_use]
    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    /// The connection type.
    #[must_use]
    pub fn conn_type(&self) -> ConnType {
        self.conn_type
    }

    /// Consume the connection, releasing the underlying stream.
    ///
    /// `close` takes `self` by value, so a second close is not
    /// representable: the reference's runtime "idempotent no-op" guarantee
    /// becomes a compile-time one here (a deliberate strengthening, see
    /// `DESIGN.md`).
    pub fn close(self) -> S {
        self.stream
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use sidp_proto::SupportBit;

    use super::*;
    use crate::environment::SystemEnvironment;

    fn config() -> ConnectionConfig {
        ConnectionConfig::builder(10, ConnType::Normal).peer_device(20).session_id(1234).build()
    }

    #[test]
    fn new_connection_has_no_status_bits() {
        let conn = Connection::new(Vec::<u8>::new(), SystemEnvironment, config());
        assert!(!conn.is_initiated());
        assert!(!conn.is_authenticated());
        assert!(!conn.is_negotiated());
        assert_eq!(conn.status_flags().bits(), 0);
    }

    #[test]
    fn set_key_enforces_the_cap() {
        let mut conn = Connection::new(Vec::<u8>::new(), SystemEnvironment, config());
        assert!(conn.set_key(&[0u8; KEY_MAX_LEN]).is_ok());
        assert_eq!(
            conn.set_key(&[0u8; KEY_MAX_LEN + 1]),
            Err(ResourceError::KeyTooLarge { max: KEY_MAX_LEN, actual: KEY_MAX_LEN + 1 })
        );
    }

    #[test]
    fn set_user_enforces_the_cap() {
        let mut conn = Connection::new(Vec::<u8>::new(), SystemEnvironment, config());
        assert!(conn.set_user(&[b'a'; USERNAME_MAX_LEN]).is_ok());
        assert_eq!(
            conn.set_user(&[b'a'; USERNAME_MAX_LEN + 1]),
            Err(ResourceError::UsernameTooLarge {
                max: USERNAME_MAX_LEN,
                actual: USERNAME_MAX_LEN + 1
            })
        );
    }

    #[test]
    fn set_support_replaces_the_bitmap() {
        let mut conn = Connection::new(Vec::<u8>::new(), SystemEnvironment, config());
        let mut support = SupportFlags::EMPTY;
        support.offer(SupportBit::CipherAes256);
        conn.set_support(support);
        assert!(conn.support.supports(SupportBit::CipherAes256));
    }

    #[test]
    fn close_releases_the_stream() {
        let conn = Connection::new(vec![1, 2, 3], SystemEnvironment, config());
        let stream = conn.close();
        assert_eq!(stream, vec![1, 2, 3]);
    }
}
