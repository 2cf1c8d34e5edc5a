//! Encryption Layer (`EL`) codecs.
//!
//! Every registered cipher is an AEAD: encrypt produces ciphertext plus a
//! nonce and tag, bounded by [`Cipher::encrypt_output_len`]; decrypt
//! reverses it and fails on any MAC mismatch.

mod aes256;
mod chacha;
mod xsalsa20;

use sidp_proto::CipherKind;

use crate::error::CodecError;

/// Fixed-capacity symmetric key material (`sidp-proto::constants::KEY_MAX_LEN`).
pub type Key = Vec<u8>;

/// Truncate-or-zero-pad `material` to exactly `n` bytes.
///
/// This is the raw, non-KDF derivation `SPEC_FULL.md` §9 documents: the
/// reference's `create_key` hooks take whatever bytes the application
/// handed `set_key` and adapt them to the backend's fixed key size without
/// any cryptographic strengthening.
pub(crate) fn derive_fixed_key(material: &[u8], n: usize) -> Vec<u8> {
    let mut key = vec![0u8; n];
    let copy_len = material.len().min(n);
    key[..copy_len].copy_from_slice(&material[..copy_len]);
    key
}

/// Encrypt/decrypt contract every registered [`CipherKind`] implements.
pub trait Cipher {
    /// Derive a backend-sized key from arbitrary user-supplied key
    /// material. Not a KDF — see `SPEC_FULL.md` §9: a raw truncate-or-pad.
    fn create_key(&self, material: &[u8]) -> Key;

    /// Upper bound on ciphertext length for a given plaintext length.
    fn encrypt_output_len(&self, plaintext_len: usize) -> usize;

    /// Upper bound on plaintext length for a given ciphertext length.
    fn decrypt_output_len(&self, ciphertext_len: usize) -> usize;

    /// Encrypt `plaintext` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encrypt`] if the backend rejects the key or
    /// input.
    fn encrypt(&self, key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Decrypt `ciphertext` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Decrypt`] if the MAC does not verify or the
    /// backend otherwise rejects the input.
    fn decrypt(&self, key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CodecError>;
}

/// Resolve the [`Cipher`] implementation registered under `kind`.
///
/// `ChaChaAvx` and `ChaChaAvx2` share one backend: both are
/// platform-conditional tags over the same `chacha20poly1305` AEAD, whose
/// own SIMD backend selection is itself platform-conditional (see
/// `DESIGN.md`), so there is no behavioral difference to encode here.
#[must_use]
pub fn resolve_cipher(kind: CipherKind) -> Box<dyn Cipher> {
    match kind {
        CipherKind::Aes256 => Box::new(aes256::Aes256),
        CipherKind::XSalsa20 => Box::new(xsalsa20::XSalsa20),
        CipherKind::ChaChaAvx | CipherKind::ChaChaAvx2 => Box::new(chacha::ChaCha),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn all_kinds() -> [CipherKind; 4] {
        [CipherKind::Aes256, CipherKind::XSalsa20, CipherKind::ChaChaAvx, CipherKind::ChaChaAvx2]
    }

    #[test]
    fn every_backend_round_trips_empty_plaintext() {
        for kind in all_kinds() {
            let c = resolve_cipher(kind);
            let key = c.create_key(b"correct horse battery staple");
            let ciphertext = c.encrypt(&key, b"").expect("encrypt empty");
            let plaintext = c.decrypt(&key, &ciphertext).expect("decrypt empty");
            assert!(plaintext.is_empty());
        }
    }

    #[test]
    fn tampered_ciphertext_fails_decryption() {
        for kind in all_kinds() {
            let c = resolve_cipher(kind);
            let key = c.create_key(b"some key material");
            let mut ciphertext = c.encrypt(&key, b"hello\0").expect("encrypt");
            let last = ciphertext.len() - 1;
            ciphertext[last] ^= 0xFF;
            assert!(c.decrypt(&key, &ciphertext).is_err(), "{kind:?} should reject tampering");
        }
    }

    #[test]
    fn wrong_key_fails_decryption() {
        for kind in all_kinds() {
            let c = resolve_cipher(kind);
            let key_a = c.create_key(b"key A material");
            let key_b = c.create_key(b"key B material");
            let ciphertext = c.encrypt(&key_a, b"hello\0").expect("encrypt");
            assert!(c.decrypt(&key_b, &ciphertext).is_err(), "{kind:?} should reject wrong key");
        }
    }

    proptest! {
        #[test]
        fn round_trip_holds_for_arbitrary_plaintext(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
            for kind in all_kinds() {
                let c = resolve_cipher(kind);
                let key = c.create_key(b"fixed test key material");
                let ciphertext = c.encrypt(&key, &data).unwrap();
                prop_assert!(ciphertext.len() <= c.encrypt_output_len(data.len()));
                let plaintext = c.decrypt(&key, &ciphertext).unwrap();
                prop_assert_eq!(plaintext, data);
            }
        }
    }
}
