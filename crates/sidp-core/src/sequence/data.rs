//! Data sequence: send/receive one application message under the
//! negotiated cipher and compressor (`SPEC_FULL.md` §4.11).

use std::io::{Read, Write};

use sidp_proto::StatusFlags;
use tracing::instrument;

use crate::{
    chain::{dispatch_in, dispatch_out},
    connection::Connection,
    environment::Environment,
    error::{SidpError, StateError},
    packet::{Packet, PacketOptions},
    sequence::negotiate::{negotiated_cipher, negotiated_compressor, negotiated_session},
};

const READY: StatusFlags =
    StatusFlags::INITIATED.union(StatusFlags::AUTHENTICATED).union(StatusFlags::NEGOTIATED);

/// Send one application payload over `conn`, compressed and encrypted under
/// the algorithms [`crate::sequence::negotiate`] selected.
///
/// # Errors
///
/// Returns [`StateError::MissingStatus`] if `conn` has not completed Init,
/// Auth, and Negotiate. Also propagates any compression, encryption,
/// framing, or transport failure.
#[instrument(level = "debug", skip(conn, payload))]
pub fn data_send<S: Read + Write, E: Environment>(
    conn: &mut Connection<S, E>,
    payload: &[u8],
) -> Result<(), SidpError> {
    require_ready(conn)?;
    let options = negotiated_options(conn);
    let packet = Packet {
        sdev: conn.local_device,
        ddev: conn.peer_device,
        session_id: conn.session_id,
        msg: payload.to_vec(),
    };
    dispatch_out(conn, &packet, &options)?;
    Ok(())
}

/// Receive one application payload from `conn`, decrypted and decompressed.
///
/// # Errors
///
/// Same as [`data_send`], plus whatever [`dispatch_in`] returns for a
/// malformed frame or a failed decrypt/decompress.
#[instrument(level = "debug", skip(conn))]
pub fn data_recv<S: Read + Write, E: Environment>(conn: &mut Connection<S, E>) -> Result<Vec<u8>, SidpError> {
    require_ready(conn)?;
    let (packet, _) = dispatch_in(conn)?;
    Ok(packet.msg)
}

fn require_ready<S, E>(conn: &Connection<S, E>) -> Result<(), SidpError> {
    if conn.status_flags().contains(READY) {
        Ok(())
    } else {
        Err(StateError::MissingStatus { required: READY, actual: conn.status_flags() }.into())
    }
}

fn negotiated_options<S, E>(conn: &Connection<S, E>) -> PacketOptions {
    // `resolve_negotiation` never leaves a family without a winner on
    // success, and `NEGOTIATED` is only set after it succeeds, so these
    // three lookups can't actually miss once `require_ready` has passed.
    let cipher_type = negotiated_cipher(conn.negotiate).unwrap_or(sidp_proto::CipherKind::Aes256);
    let compress_type = negotiated_compressor(conn.negotiate).unwrap_or(sidp_proto::CompressKind::Fastlz);
    let session_type = negotiated_session(conn.negotiate).unwrap_or(sidp_proto::SessionKind::Default);
    PacketOptions {
        session_type,
        cipher_type,
        compress_type,
        msg_type: sidp_proto::MsgType::Data,
        key: conn.key.clone(),
    }
}
