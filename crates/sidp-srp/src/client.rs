//! The user (initiator) side of the SRP-6a exchange.

use num_bigint::BigUint;

use crate::{
    error::SrpError,
    group::{G, N},
    math::{
        compute_hamk, compute_k, compute_m, compute_session_key, compute_u, compute_x,
        is_degenerate_public_value,
    },
};

/// Holds the ephemeral private exponent `a` for one authentication attempt.
///
/// `a` must never be reused across attempts. `num-bigint`'s `BigUint` does
/// not implement `zeroize::Zeroize` (its backing digit storage isn't
/// exposed for in-place wiping), so unlike the fixed-size byte keys
/// elsewhere in this workspace this value is only cleared by ordinary drop,
/// not an explicit zeroing pass — see DESIGN.md.
pub struct SrpClient {
    a: BigUint,
    a_pub: BigUint,
}

impl SrpClient {
    /// Derive a fresh client instance from ephemeral random bytes.
    ///
    /// `random` should come from a cryptographically secure source in
    /// production (see `sidp-core`'s `Environment::random_bytes`); tests may
    /// supply fixed bytes for determinism.
    #[must_use]
    pub fn new(random: &[u8]) -> Self {
        let a = BigUint::from_bytes_be(random) % &*N;
        let a_pub = G.modpow(&a, &N);
        Self { a, a_pub }
    }

    /// The client's public value `A`, to send to the host in step 1.
    #[must_use]
    pub fn public_key(&self) -> &BigUint {
        &self.a_pub
    }

    /// Process the host's `(salt, B)` challenge (step 2) and produce this
    /// side's proof `M` (step 3) plus the derived session key `K`.
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::SafetyCheckFailed`] if `B mod N == 0` or the
    /// derived scrambling parameter `u` is zero — both indicate a
    /// degenerate, unsafe public value.
    pub fn process_challenge(
        &self,
        username: &[u8],
        password: &[u8],
        salt: &[u8],
        b_pub: &BigUint,
    ) -> Result<([u8; 20], [u8; 20]), SrpError> {
        if is_degenerate_public_value(b_pub) {
            return Err(SrpError::SafetyCheckFailed);
        }

        let u = compute_u(&self.a_pub, b_pub);
        if u == BigUint::from(0u32) {
            return Err(SrpError::SafetyCheckFailed);
        }

        let x = compute_x(username, password, salt);
        let k = compute_k(&G);
        let g_x = G.modpow(&x, &N);
        let k_gx = (&k * &g_x) % &*N;

        let base = if *b_pub >= k_gx { b_pub - &k_gx } else { &*N + b_pub - &k_gx };
        let exponent = &self.a + &u * &x;
        let shared_secret = base.modpow(&exponent, &N);

        let session_key = compute_session_key(&shared_secret);
        let m = compute_m(&self.a_pub, b_pub, &session_key);
        Ok((m, session_key))
    }

    /// Verify the host's final `HAMK` (step 4) against what this side
    /// expects, given the `(M, K)` produced by [`Self::process_challenge`].
    ///
    /// # Errors
    ///
    /// Returns [`SrpError::VerificationFailed`] if the host's `HAMK` does
    /// not match.
    pub fn verify_server(
        &self,
        b_pub: &BigUint,
        m: &[u8; 20],
        session_key: &[u8; 20],
        hamk: &[u8],
    ) -> Result<(), SrpError> {
        let expected = compute_hamk(&self.a_pub, m, session_key);
        if expected.as_slice() == hamk {
            Ok(())
        } else {
            let _ = b_pub;
            Err(SrpError::VerificationFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{server::SrpServer, verifier::compute_verifier};

    #[test]
    fn full_exchange_agrees_on_session_key() {
        let username = b"alice";
        let password = b"password123";
        let salt = b"0123456789abcdef";
        let verifier = compute_verifier(username, password, salt);

        let client = SrpClient::new(&[0xAA; 32]);
        let server = SrpServer::new(&[0xBB; 32], &verifier);

        let (m, client_key) = client
            .process_challenge(username, password, salt, server.public_key())
            .expect("valid challenge");

        let (hamk, server_key) = server
            .verify_client(username, salt, &verifier, client.public_key(), &m)
            .expect("matching proof");

        assert_eq!(client_key, server_key);
        client
            .verify_server(server.public_key(), &m, &client_key, &hamk)
            .expect("matching HAMK");
    }

    #[test]
    fn wrong_password_fails_server_verification() {
        let username = b"alice";
        let salt = b"0123456789abcdef";
        let verifier = compute_verifier(username, b"password123", salt);

        let client = SrpClient::new(&[0x11; 32]);
        let server = SrpServer::new(&[0x22; 32], &verifier);

        let (m, _) = client
            .process_challenge(username, b"wrong-password", salt, server.public_key())
            .expect("challenge math always succeeds locally");

        let result = server.verify_client(username, salt, &verifier, client.public_key(), &m);
        assert_eq!(result, Err(SrpError::VerificationFailed));
    }

    #[test]
    fn zero_public_value_is_rejected() {
        let username = b"alice";
        let password = b"password123";
        let salt = b"0123456789abcdef";
        let client = SrpClient::new(&[0xAA; 32]);

        let result = client.process_challenge(username, password, salt, &BigUint::from(0u32));
        assert_eq!(result, Err(SrpError::SafetyCheckFailed));
    }

    #[test]
    fn n_multiple_public_value_is_rejected() {
        let username = b"alice";
        let password = b"password123";
        let salt = b"0123456789abcdef";
        let client = SrpClient::new(&[0xAA; 32]);

        let result = client.process_challenge(username, password, salt, &N);
        assert_eq!(result, Err(SrpError::SafetyCheckFailed));
    }
}
