//! `CipherKind::Aes256`-tagged backend: AES-256-GCM.

use aes_gcm::{
    Aes256Gcm, Key as AesKey, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};

use crate::{
    cipher::{Cipher, Key, derive_fixed_key},
    error::CodecError,
};

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// AES-256-GCM, registered tag 1.
pub struct Aes256;

impl Cipher for Aes256 {
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
        let key = AesKey::<Aes256Gcm>::from_slice(&derive_fixed_key(key, KEY_LEN));
        let cipher = Aes256Gcm::new(key);
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
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
        let key = AesKey::<Aes256Gcm>::from_slice(&derive_fixed_key(key, KEY_LEN));
        let cipher = Aes256Gcm::new(key);
        let nonce = Nonce::from_slice(nonce_bytes);
        cipher.decrypt(nonce, body).map_err(|e| CodecError::Decrypt(e.to_string()))
    }
}
