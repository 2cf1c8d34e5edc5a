//! Password-verifier derivation, run once at account-creation time (not
//! part of the live four-packet exchange).

use num_bigint::BigUint;

use crate::{
    group::{G, N},
    math::compute_x,
};

/// Derive the SRP-6a password verifier `v = g^x mod N` for `username`,
/// `password` and a freshly generated `salt`.
///
/// The host stores `(username, salt, v)` and never sees `password` again
/// after this call; the live exchange in [`crate::client`]/[`crate::server`]
/// only ever sends `v`-derived proofs, never the password itself.
#[must_use]
pub fn compute_verifier(username: &[u8], password: &[u8], salt: &[u8]) -> BigUint {
    let x = compute_x(username, password, salt);
    G.modpow(&x, &N)
}
