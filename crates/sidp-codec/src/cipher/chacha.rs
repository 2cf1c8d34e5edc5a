//! `CipherKind::ChaChaAvx`/`ChaChaAvx2`-tagged backend: `ChaCha20-Poly1305`.
//!
//! The reference ships two separate backends, `el_chacha_avx` and
//! `el_chacha_avx2`, selected at build time by the target's available SIMD
//! extensions (see `original_source/include/el_chacha_avx.h`). This
//! reimplementation uses one `chacha20poly1305` backend for both tags: the
//! crate already dispatches to the fastest available SIMD implementation
//! internally, so there is nothing left for two separate Rust types to
//! express (see `DESIGN.md`).

use chacha20poly1305::{
    ChaCha20Poly1305, KeyInit, Nonce,
    aead::{Aead, AeadCore, OsRng},
};

use crate::{
    cipher::{Cipher, Key, derive_fixed_key},
    error::CodecError,
};

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// `ChaCha20-Poly1305`, registered tags 3 and 4.
pub struct ChaCha;

impl Cipher for ChaCha {
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
        let cipher = ChaCha20Poly1305::new_from_slice(&key)
            .map_err(|e| CodecError::Encrypt(e.to_string()))?;
        let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
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
        let cipher = ChaCha20Poly1305::new_from_slice(&key)
            .map_err(|e| CodecError::Decrypt(e.to_string()))?;
        let nonce = Nonce::from_slice(nonce_bytes);
        cipher.decrypt(nonce, body).map_err(|e| CodecError::Decrypt(e.to_string()))
    }
}
