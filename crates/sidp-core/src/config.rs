//! `ConnectionConfig`: the application-assembled input to `Connection::new`.
//!
//! New in this reimplementation (`SPEC_FULL.md` §3, §9 ambient-stack
//! table): the reference configures a connection through a handful of
//! separate setter calls (`sidp_init`, `sidp_set_support`, ...); this
//! collects the same inputs into one value built with a small builder, in
//! the teacher's `ConnectionConfig`-as-plain-struct style rather than a
//! trait-object builder.

use sidp_proto::{ConnType, SupportFlags};

/// Inputs needed to construct a [`crate::connection::Connection`].
///
/// Byte-stream timeouts are deliberately not modeled here (`SPEC_FULL.md`
/// §5 Non-goals): a host application wanting timeouts wraps its own
/// `Read + Write` stream before constructing a connection.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub(crate) local_device: u32,
    pub(crate) peer_device: u32,
    pub(crate) session_id: u32,
    pub(crate) conn_type: ConnType,
    pub(crate) support: SupportFlags,
}

impl ConnectionConfig {
    /// Start building a config for a connection of `conn_type` rooted at
    /// `local_device`.
    #[must_use]
    pub fn builder(local_device: u32, conn_type: ConnType) -> ConnectionConfigBuilder {
        ConnectionConfigBuilder {
            local_device,
            peer_device: 0,
            session_id: 0,
            conn_type,
            support: SupportFlags::EMPTY,
        }
    }
}

/// Builder for [`ConnectionConfig`].
#[derive(Debug, Clone)]
pub struct ConnectionConfigBuilder {
    local_device: u32,
    peer_device: u32,
    session_id: u32,
    conn_type: ConnType,
    support: SupportFlags,
}

impl ConnectionConfigBuilder {
    /// Set the peer device id this side expects (ignored by `ROUTING`
    /// connections, which copy both ids from the Init exchange instead).
    #[must_use]
    pub const fn peer_device(mut self, peer_device: u32) -> Self {
        self.peer_device = peer_device;
        self
    }

    /// Set the session id.
    #[must_use]
    pub const fn session_id(mut self, session_id: u32) -> Self {
        self.session_id = session_id;
        self
    }

    /// Set the algorithms this side is willing to negotiate.
    #[must_use]
    pub const fn support(mut self, support: SupportFlags) -> Self {
        self.support = support;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> ConnectionConfig {
        ConnectionConfig {
            local_device: self.local_device,
            peer_device: self.peer_device,
            session_id: self.session_id,
            conn_type: self.conn_type,
            support: self.support,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use sidp_proto::SupportBit;

    use super::*;

    #[test]
    fn builder_produces_the_configured_values() {
        let mut support = SupportFlags::EMPTY;
        support.offer(SupportBit::CipherAes256);

        let config = ConnectionConfig::builder(10, ConnType::Normal)
            .peer_device(20)
            .session_id(1234)
            .support(support)
            .build();

        assert_eq!(config.local_device, 10);
        assert_eq!(config.peer_device, 20);
        assert_eq!(config.session_id, 1234);
        assert_eq!(config.conn_type, ConnType::Normal);
        assert!(config.support.supports(SupportBit::CipherAes256));
    }
}
