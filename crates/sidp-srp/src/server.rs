//! The host (responder) side of the SRP-6a exchange.

use num_bigint::BigUint;

use crate::{
    error::SrpError,
    group::{G, N},
    math::{
        compute_hamk, compute_k, compute_m, compute_session_key, compute_u,
        is_degenerate_public_value,
    },
};

/// Holds the ephemeral private exponent `b` for one authentication attempt.
///
/// `b` must never be reused across attempts (see the note on
/// [`crate::client::SrpClient`] about why this isn't additionally
/// zeroize-wrapped).
pub struct SrpServer {
    b: BigUint,
    b_pub: BigUint,
}

impl SrpServer {
    /// Derive a fresh server instance from ephemeral random bytes and the
    /// stored verifier `v` for the username the client claimed in step 1.
    #[must_use]
    pub fn new(random: &[u8], verifier: &BigUint) -> Self {
        let b = BigUint::from_bytes_be(random) % &*N;
        let k = compute_k(&G);
        let b_pub = (&k * verifier + G.modpow(&b, &N)) % &*N;
        Self { b, b_pub }
    }

    /// The host's public value `B`, to send to the user in step 2.
    #[must_use]
    pub fn public_key(&self) -> &BigUint {
        &self.b_pub
    }

    /// Verify the user's proof `M` (step 3) and, if it matches, produce
    /// `(HAMK, K)` for step 4.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::SafetyCheckFailed`] if `A mod N == 0` or the
    /// scrambling parameter `u` is zero. Returns
    /// [`SrpError::VerificationFailed`] if the client's `M` does not match
    /// the host's own computation — the host never emits `HAMK` in that
    /// case, so an impostor without the password cannot convince the user
    /// side to continue either.
    pub fn verify_client(
        &self,
        username: &[u8],
        salt: &[u8],
        verifier: &BigUint,
        a_pub: &BigUint,
        m_client: &[u8; 20],
    ) -> Result<([u8; 20], [u8; 20]), SrpError> {
        let _ = (username, salt);

        if is_degenerate_public_value(a_pub) {
            return Err(SrpError::SafetyCheckFailed);
        }

        let u = compute_u(a_pub, &self.b_pub);
        if u == BigUint::from(0u32) {
            return Err(SrpError::SafetyCheckFailed);
        }

        let base = (a_pub * verifier.modpow(&u, &N)) % &*N;
        let shared_secret = base.modpow(&self.b, &N);
        let session_key = compute_session_key(&shared_secret);

        let expected_m = compute_m(a_pub, &self.b_pub, &session_key);
        if &expected_m != m_client {
            return Err(SrpError::VerificationFailed);
        }

        let hamk = compute_hamk(a_pub, &expected_m, &session_key);
        Ok((hamk, session_key))
    }
}
