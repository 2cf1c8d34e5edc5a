//! The outgoing chain: Compression → Encryption → Session → Description,
//! applied in that order before one write to the stream (`SPEC_FULL.md`
//! §4.6).

use std::io::Write;

use sidp_codec::{SessionLayer, resolve_cipher, resolve_compressor, session::DefaultSessionLayer};
use sidp_proto::{
    DescriptionHeader, MsgType,
    constants::{PKT_MAX_LEN, PKT_MSG_MAX_LEN},
    errors::FramingError,
};

use crate::{
    connection::Connection,
    environment::Environment,
    error::SidpError,
    io::write_exact_tracked,
    packet::{Packet, PacketOptions},
};

/// Encode `packet` under `options`, write it to `conn`'s stream, and return
/// the number of plaintext message bytes sent.
///
/// `DATA` messages are compressed then encrypted; control messages
/// (`INIT`/`NEGOTIATE`/`AUTH`) skip both stages and travel as cleartext
/// wrapped only by the session layer, matching the reference's decision to
/// keep the handshake legible on the wire.
///
/// # Errors
///
/// Returns [`FramingError::OversizedMessage`] (via [`SidpError::Framing`])
/// if `packet.msg` or the finished frame would not fit; a codec error if
/// compression or encryption fails; or a transport error if the write
/// fails.
pub(crate) fn dispatch_out<S: Write, E: Environment>(
    conn: &mut Connection<S, E>,
    packet: &Packet,
    options: &PacketOptions,
) -> Result<usize, SidpError> {
    let msg_size = packet.msg.len();
    if msg_size > PKT_MSG_MAX_LEN {
        return Err(FramingError::OversizedMessage { actual: msg_size, max: PKT_MSG_MAX_LEN }.into());
    }

    let body = if options.msg_type == MsgType::Data {
        let compressor = resolve_compressor(options.compress_type);
        let compressed = compressor.compress(&packet.msg)?;

        let cipher = resolve_cipher(options.cipher_type);
        let key = cipher.create_key(&options.key);
        cipher.encrypt(&key, &compressed)?
    } else {
        packet.msg.clone()
    };

    let session = DefaultSessionLayer;
    let framed = session.encap(packet.sdev, packet.ddev, packet.session_id, &body);

    let frame_total = framed.len() + DescriptionHeader::SIZE;
    if frame_total > PKT_MAX_LEN {
        return Err(FramingError::OversizedMessage { actual: frame_total, max: PKT_MAX_LEN }.into());
    }

    // SAFETY-FREE NOTE: both casts below are exact because `frame_total <=
    // PKT_MAX_LEN` (65535) was just checked, so `framed.len() < 65535` and
    // `msg_size <= PKT_MSG_MAX_LEN < 65535`.
    #[allow(clippy::cast_possible_truncation)]
    let def_size = framed.len() as u16;
    #[allow(clippy::cast_possible_truncation)]
    let inf_size = msg_size as u16;

    let header = DescriptionHeader::new(
        def_size,
        inf_size,
        options.session_type,
        options.cipher_type,
        options.compress_type,
        options.msg_type,
    );

    let mut wire = Vec::with_capacity(frame_total);
    wire.extend_from_slice(&header.to_bytes());
    wire.extend_from_slice(&framed);

    write_exact_tracked(
        &mut conn.stream,
        &wire,
        &mut conn.bytes_written,
        &mut conn.last_write_at,
        &conn.env,
    )?;

    Ok(msg_size)
}
