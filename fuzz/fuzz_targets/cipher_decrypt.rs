//! Fuzz target for `Cipher::decrypt` across all registered tags.
//!
//! The first byte picks which backend to exercise; the rest of the input
//! is treated as ciphertext under a fixed key. Truncated nonces, corrupt
//! tags, and arbitrary garbage must all fail closed with `Err`, never a
//! panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sidp_codec::resolve_cipher;
use sidp_proto::CipherKind;

const FIXED_KEY: &[u8] = b"fuzz target key material, 32b!!";

fuzz_target!(|data: &[u8]| {
    let Some((&selector, ciphertext)) = data.split_first() else { return };

    let kind = match selector % 4 {
        0 => CipherKind::Aes256,
        1 => CipherKind::XSalsa20,
        2 => CipherKind::ChaChaAvx,
        _ => CipherKind::ChaChaAvx2,
    };

    let cipher = resolve_cipher(kind);
    let key = cipher.create_key(FIXED_KEY);
    let _ = cipher.decrypt(&key, ciphertext);
});
