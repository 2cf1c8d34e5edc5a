//! Negotiation sequence: support-flag exchange and per-family algorithm
//! selection by priority (`SPEC_FULL.md` §4.9).

use std::io::{Read, Write};

use sidp_proto::{
    AlgorithmFamily, CipherKind, CompressKind, MsgType, NegotiationRecord, SessionKind,
    StatusFlags, SupportBit, SupportFlags,
};
use tracing::instrument;

use crate::{
    chain::{dispatch_in, dispatch_out},
    connection::Connection,
    environment::Environment,
    error::{SidpError, StateError},
    packet::{Packet, PacketOptions},
};

/// Priority ladder per family (§4.9): highest-priority bit first. Kept as
/// an explicit ordered slice, not a `match`, so the documented order can't
/// silently drift from the arm order of some other construct.
const COMPRESSOR_PRIORITY: &[SupportBit] =
    &[SupportBit::CompressLzo, SupportBit::CompressFastlz, SupportBit::CompressZlib];
const CIPHER_PRIORITY: &[SupportBit] = &[
    SupportBit::CipherXSalsa20,
    SupportBit::CipherChaChaAvx,
    SupportBit::CipherChaChaAvx2,
    SupportBit::CipherAes256,
];
const ENCAPSULATOR_PRIORITY: &[SupportBit] = &[SupportBit::EncapDefault];

/// Precondition for both negotiation roles: Init and Auth must both have
/// completed (`SPEC_FULL.md` §4.9).
const REQUIRED: StatusFlags = StatusFlags::INITIATED.union(StatusFlags::AUTHENTICATED);

/// Send this side's support bitmap, intersect with the host's authoritative
/// reply, and select one algorithm per family.
///
/// # Errors
///
/// Returns [`StateError::MissingStatus`] if `conn` has not completed both
/// Init and Auth, or [`StateError::NoCommonAlgorithm`] if some family has
/// no common bit. Also propagates any transport or framing failure.
#[instrument(level = "debug", skip(conn))]
pub fn negotiate_user<S: Read + Write, E: Environment>(
    conn: &mut Connection<S, E>,
) -> Result<(), SidpError> {
    require_initiated_and_authenticated(conn)?;

    send_negotiation_record(conn, conn.support)?;
    let intersection = recv_negotiation_record(conn)?;

    let chosen = resolve_negotiation(intersection)?;
    conn.negotiate = chosen;
    conn.status |= StatusFlags::NEGOTIATED;
    Ok(())
}

/// Receive the user's support bitmap, intersect with this side's own, reply
/// with the intersection, and select one algorithm per family.
///
/// # Errors
///
/// Same as [`negotiate_user`].
#[instrument(level = "debug", skip(conn))]
pub fn negotiate_host<S: Read + Write, E: Environment>(
    conn: &mut Connection<S, E>,
) -> Result<(), SidpError> {
    require_initiated_and_authenticated(conn)?;

    let user_support = recv_negotiation_record(conn)?;
    let intersection = conn.support.intersect(user_support);
    send_negotiation_record(conn, intersection)?;

    let chosen = resolve_negotiation(intersection)?;
    conn.negotiate = chosen;
    conn.status |= StatusFlags::NEGOTIATED;
    Ok(())
}

fn require_initiated_and_authenticated<S, E>(conn: &Connection<S, E>) -> Result<(), SidpError> {
    if conn.status_flags().contains(REQUIRED) {
        Ok(())
    } else {
        Err(StateError::MissingStatus { required: REQUIRED, actual: conn.status_flags() }.into())
    }
}

/// Pick exactly one bit per algorithm family from `intersection`, by
/// priority, failing if any family is empty.
fn resolve_negotiation(intersection: SupportFlags) -> Result<SupportFlags, StateError> {
    let mut chosen = SupportFlags::EMPTY;
    for (family, priority) in [
        (AlgorithmFamily::Compressor, COMPRESSOR_PRIORITY),
        (AlgorithmFamily::Cipher, CIPHER_PRIORITY),
        (AlgorithmFamily::Encapsulator, ENCAPSULATOR_PRIORITY),
    ] {
        let winner = priority
            .iter()
            .find(|&&bit| intersection.supports(bit))
            .ok_or(StateError::NoCommonAlgorithm(family))?;
        chosen.offer(*winner);
    }
    Ok(chosen)
}

/// The cipher tag for the single cipher bit set in a resolved negotiate
/// bitmap, or `None` if [`resolve_negotiation`] was not run (or somehow left
/// the family empty, which it never does on success).
#[must_use]
pub(crate) fn negotiated_cipher(negotiate: SupportFlags) -> Option<CipherKind> {
    if negotiate.supports(SupportBit::CipherXSalsa20) {
        Some(CipherKind::XSalsa20)
    } else if negotiate.supports(SupportBit::CipherChaChaAvx) {
        Some(CipherKind::ChaChaAvx)
    } else if negotiate.supports(SupportBit::CipherChaChaAvx2) {
        Some(CipherKind::ChaChaAvx2)
    } else if negotiate.supports(SupportBit::CipherAes256) {
        Some(CipherKind::Aes256)
    } else {
        None
    }
}

/// The compressor tag for the single compressor bit set in a resolved
/// negotiate bitmap.
#[must_use]
pub(crate) fn negotiated_compressor(negotiate: SupportFlags) -> Option<CompressKind> {
    if negotiate.supports(SupportBit::CompressLzo) {
        Some(CompressKind::Lzo)
    } else if negotiate.supports(SupportBit::CompressFastlz) {
        Some(CompressKind::Fastlz)
    } else if negotiate.supports(SupportBit::CompressZlib) {
        Some(CompressKind::Zlib)
    } else {
        None
    }
}

/// The session-encapsulation tag for the single encapsulator bit set in a
/// resolved negotiate bitmap.
#[must_use]
pub(crate) fn negotiated_session(negotiate: SupportFlags) -> Option<SessionKind> {
    if negotiate.supports(SupportBit::EncapDefault) { Some(SessionKind::Default) } else { None }
}

fn send_negotiation_record<S: Read + Write, E: Environment>(
    conn: &mut Connection<S, E>,
    flags: SupportFlags,
) -> Result<(), SidpError> {
    let record = NegotiationRecord::new(flags.bits());
    let packet = Packet {
        sdev: conn.local_device,
        ddev: conn.peer_device,
        session_id: conn.session_id,
        msg: record.to_bytes().to_vec(),
    };
    dispatch_out(conn, &packet, &PacketOptions::control(MsgType::Negotiate))?;
    Ok(())
}

fn recv_negotiation_record<S: Read + Write, E: Environment>(
    conn: &mut Connection<S, E>,
) -> Result<SupportFlags, SidpError> {
    let (packet, _) = dispatch_in(conn)?;
    let record = NegotiationRecord::parse(&packet.msg)?;
    Ok(SupportFlags::from_bits(record.flags()))
}
