//! Packet API: thin, sequence-agnostic send/receive of one frame
//! (`SPEC_FULL.md` §4.12).
//!
//! `pkt_send`/`pkt_recv` run the full layered chain; `pkt_raw_send`/
//! `pkt_raw_recv` only move the Description Layer header plus `def_size`
//! opaque bytes, for a host application that wants to forward a frame
//! between two connections without ever decoding it. Both modes share the
//! same `def_size`/`inf_size` bounds check.

use std::io::{Read, Write};

use sidp_proto::{DescriptionHeader, FramingError};
use tracing::instrument;

use crate::{
    chain::{check_receive_bounds, dispatch_in, dispatch_out},
    connection::Connection,
    environment::Environment,
    error::SidpError,
    io::{read_exact_tracked, write_exact_tracked},
    packet::{Packet, PacketOptions},
};

/// Encode and send one packet through the full outgoing chain.
///
/// # Errors
///
/// See [`crate::chain::dispatch_out`] (re-exported here as the framed send
/// path).
#[instrument(level = "debug", skip(conn, packet, options))]
pub fn pkt_send<S: Read + Write, E: Environment>(
    conn: &mut Connection<S, E>,
    packet: &Packet,
    options: &PacketOptions,
) -> Result<usize, SidpError> {
    dispatch_out(conn, packet, options)
}

/// Receive and decode one packet through the full incoming chain.
///
/// # Errors
///
/// See [`crate::chain::dispatch_in`].
#[instrument(level = "debug", skip(conn))]
pub fn pkt_recv<S: Read + Write, E: Environment>(
    conn: &mut Connection<S, E>,
) -> Result<(Packet, PacketOptions), SidpError> {
    dispatch_in(conn)
}

/// Write a pre-built Description Layer header followed by `frame` verbatim,
/// without running the session/encryption/compression layers.
///
/// `frame` is exactly what goes on the wire after the header — the caller
/// is responsible for it already being a valid encapsulated body (as
/// produced by some other connection's outgoing chain, in the opaque
/// forwarding case this mode exists for).
///
/// # Errors
///
/// Returns a [`sidp_proto::FramingError`] if `frame.len()` does not match
/// `header.def_size()`, or if the header's sizes exceed the same bounds a
/// receiver would enforce. Also propagates a transport failure.
#[instrument(level = "debug", skip(conn, frame))]
pub fn pkt_raw_send<S: Read + Write, E: Environment>(
    conn: &mut Connection<S, E>,
    header: &DescriptionHeader,
    frame: &[u8],
) -> Result<usize, SidpError> {
    let def_size = usize::from(header.def_size());
    let inf_size = usize::from(header.inf_size());
    check_receive_bounds(inf_size, def_size)?;
    if frame.len() != def_size {
        return Err(FramingError::LengthMismatch { expected: def_size, actual: frame.len() }.into());
    }

    write_exact_tracked(&mut conn.stream, &header.to_bytes(), &mut conn.bytes_written, &mut conn.last_write_at, &conn.env)?;
    write_exact_tracked(&mut conn.stream, frame, &mut conn.bytes_written, &mut conn.last_write_at, &conn.env)?;
    Ok(frame.len())
}

/// Read one Description Layer header and `def_size` opaque bytes, without
/// running any layer beneath it.
///
/// # Errors
///
/// Returns a [`sidp_proto::FramingError`] if the header is malformed or its
/// sizes exceed bounds. Also propagates a transport failure.
#[instrument(level = "debug", skip(conn))]
pub fn pkt_raw_recv<S: Read + Write, E: Environment>(
    conn: &mut Connection<S, E>,
) -> Result<(DescriptionHeader, Vec<u8>), SidpError> {
    let mut header_bytes = [0u8; DescriptionHeader::SIZE];
    read_exact_tracked(&mut conn.stream, &mut header_bytes, &mut conn.bytes_read, &mut conn.last_read_at, &conn.env)?;
    let header = DescriptionHeader::parse(&header_bytes)?;

    let def_size = usize::from(header.def_size());
    let inf_size = usize::from(header.inf_size());
    check_receive_bounds(inf_size, def_size)?;

    let mut frame = vec![0u8; def_size];
    read_exact_tracked(&mut conn.stream, &mut frame, &mut conn.bytes_read, &mut conn.last_read_at, &conn.env)?;
    Ok((header, frame))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use sidp_proto::{CipherKind, CompressKind, MsgType, SessionKind};

    use super::*;
    use crate::{config::ConnectionConfig, environment::SystemEnvironment};

    fn conn(stream: Vec<u8>) -> Connection<Vec<u8>, SystemEnvironment> {
        Connection::new(
            stream,
            SystemEnvironment,
            ConnectionConfig::builder(1, sidp_proto::ConnType::Normal).peer_device(2).session_id(7).build(),
        )
    }

    #[test]
    fn pkt_send_and_recv_round_trip_a_control_message() {
        let mut sender = conn(Vec::new());
        let packet = Packet { sdev: 1, ddev: 2, session_id: 7, msg: b"negotiate me".to_vec() };
        pkt_send(&mut sender, &packet, &PacketOptions::control(MsgType::Negotiate)).expect("send ok");

        let mut receiver = conn(sender.stream.clone());
        let (decoded, options) = pkt_recv(&mut receiver).expect("recv ok");
        assert_eq!(decoded.msg, b"negotiate me");
        assert_eq!(options.msg_type, MsgType::Negotiate);
    }

    #[test]
    fn raw_round_trip_forwards_an_opaque_frame_without_decoding() {
        let mut sender = conn(Vec::new());
        let frame = b"already-encapsulated bytes".to_vec();
        let header = DescriptionHeader::new(
            u16::try_from(frame.len()).expect("small test frame"),
            u16::try_from(frame.len()).expect("small test frame"),
            SessionKind::Default,
            CipherKind::Aes256,
            CompressKind::Lzo,
            MsgType::Data,
        );
        pkt_raw_send(&mut sender, &header, &frame).expect("raw send ok");

        let mut receiver = conn(sender.stream.clone());
        let (decoded_header, decoded_frame) = pkt_raw_recv(&mut receiver).expect("raw recv ok");
        assert_eq!(decoded_header.def_size(), header.def_size());
        assert_eq!(decoded_frame, frame);
    }

    #[test]
    fn raw_send_rejects_a_frame_that_does_not_match_def_size() {
        let mut sender = conn(Vec::new());
        let header = DescriptionHeader::new(
            10,
            10,
            SessionKind::Default,
            CipherKind::Aes256,
            CompressKind::Lzo,
            MsgType::Data,
        );
        let err = pkt_raw_send(&mut sender, &header, b"too short").unwrap_err();
        assert!(matches!(err, SidpError::Framing(FramingError::LengthMismatch { .. })));
    }
}
