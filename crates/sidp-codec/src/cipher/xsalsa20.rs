//! `CipherKind::XSalsa20`-tagged backend: `XSalsa20-Poly1305`.
//!
//! The reference links NaCl's `crypto_secretbox` (XSalsa20 + Poly1305, see
//! `original_source/deps/nacl`); `xsalsa20poly1305` is the same
//! construction as a pure-Rust RustCrypto crate.

use xsalsa20poly1305::{
    KeyInit, XSalsa20Poly1305,
    aead::{Aead, AeadCore, OsRng},
};

use crate::{
    cipher::{Cipher, Key, derive_fixed_key},
    error::CodecError,
};

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 24;
const TAG_LEN: usize = 16;

/// `XSalsa20-Poly1305`, registered tag 2.
pub struct XSalsa20;

impl Cipher for XSalsa20 {
    fn create_key(&self, material: &[u8]) -> Key {
        derive_fixed_key(material, KEY_LEN)
    }

    fn encrypt_output_len(&self, plaintext_len: usize) -> usize {
        plaintext_len + NONCE_LEN + TAG_LEN
    }

    fn decrypt_output_len(&self, ciphertext_len: usize) -> usize {
        ciphertext_len.saturating_sub(NONCE_LEN + TAG_LEN)
    }

    fn encrypt(&self, key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CodecError> {
        let key = derive_fixed_key(key, KEY_LEN);
        let cipher = XSalsa20Poly1305::new_from_slice(&key)
            .map_err(|e| CodecError::Encrypt(e.to_string()))?;
        let nonce = XSalsa20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext =
            cipher.encrypt(&nonce, plaintext).map_err(|e| CodecError::Encrypt(e.to_string()))?;

        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn decrypt(&self, key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CodecError> {
        if ciphertext.len() < NONCE_LEN {
            return Err(CodecError::Decrypt("ciphertext shorter than nonce".to_string()));
        }
        let (nonce_bytes, body) = ciphertext.split_at(NONCE_LEN);
        let key = derive_fixed_key(key, KEY_LEN);
        let cipher = XSalsa20Poly1305::new_from_slice(&key)
            .map_err(|e| CodecError::Decrypt(e.to_string()))?;
        let nonce = xsalsa20poly1305::XNonce::from_slice(nonce_bytes);
        cipher.decrypt(nonce, body).map_err(|e| CodecError::Decrypt(e.to_string()))
    }
}
