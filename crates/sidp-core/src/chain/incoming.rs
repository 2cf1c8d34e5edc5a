//! The incoming chain: Description → Session → Encryption → Compression,
//! the mirror image of [`super::outgoing::dispatch_out`] (`SPEC_FULL.md`
//! §4.7).

use std::io::Read;

use sidp_codec::{SessionLayer, resolve_cipher, resolve_compressor, session::DefaultSessionLayer};
use sidp_proto::{DescriptionHeader, FramingError, MsgType};

use crate::{
    chain::bounds::check_receive_bounds,
    connection::Connection,
    environment::Environment,
    error::SidpError,
    io::read_exact_tracked,
    packet::{Packet, PacketOptions},
};

/// Read one frame off `conn`'s stream and decode it into a [`Packet`] plus
/// the [`PacketOptions`] it was sent under.
///
/// # Errors
///
/// Returns a framing error for a malformed header or an unregistered
/// algorithm tag, a codec error if decryption or decompression fails, or a
/// transport error if the read fails.
pub(crate) fn dispatch_in<S: Read, E: Environment>(
    conn: &mut Connection<S, E>,
) -> Result<(Packet, PacketOptions), SidpError> {
    let mut header_bytes = [0u8; DescriptionHeader::SIZE];
    read_exact_tracked(
        &mut conn.stream,
        &mut header_bytes,
        &mut conn.bytes_read,
        &mut conn.last_read_at,
        &conn.env,
    )?;
    let header = DescriptionHeader::parse(&header_bytes)?;

    let def_size = usize::from(header.def_size());
    let inf_size = usize::from(header.inf_size());
    check_receive_bounds(inf_size, def_size)?;

    let session_type = header.session_type()?;
    let cipher_type = header.cipher_type()?;
    let compress_type = header.compress_type()?;
    let msg_type = header.msg_type()?;

    let mut frame = vec![0u8; def_size];
    read_exact_tracked(
        &mut conn.stream,
        &mut frame,
        &mut conn.bytes_read,
        &mut conn.last_read_at,
        &conn.env,
    )?;

    let session = DefaultSessionLayer;
    let (session_header, body) = session.decap(&frame)?;

    let msg = if msg_type == MsgType::Data {
        let cipher = resolve_cipher(cipher_type);
        let key = cipher.create_key(&conn.key);
        let decrypted = cipher.decrypt(&key, body)?;

        let compressor = resolve_compressor(compress_type);
        compressor.decompress(&decrypted, inf_size)?
    } else {
        if body.len() != inf_size {
            return Err(FramingError::LengthMismatch { expected: inf_size, actual: body.len() }.into());
        }
        body.to_vec()
    };

    let packet = Packet {
        sdev: session_header.sdev(),
        ddev: session_header.ddev(),
        session_id: session_header.session_id(),
        msg,
    };
    let options = PacketOptions {
        session_type,
        cipher_type,
        compress_type,
        msg_type,
        key: conn.key.clone(),
    };

    Ok((packet, options))
}
