//! Fuzz target for `Compressor::decompress` across all registered tags.
//!
//! The first byte picks which backend to exercise and seeds a claimed
//! `out_size`; the rest of the input is the flag-byte-plus-body a decoder
//! would read off the wire. No input should ever panic; a corrupt flag
//! byte, a backend failure, or an inflated-length mismatch must all
//! surface as `Err`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sidp_codec::resolve_compressor;
use sidp_proto::CompressKind;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else { return };
    let Some((&size_hi, rest)) = rest.split_first() else { return };
    let Some((&size_lo, body)) = rest.split_first() else { return };

    let kind = match selector % 3 {
        0 => CompressKind::Lzo,
        1 => CompressKind::Zlib,
        _ => CompressKind::Fastlz,
    };
    let out_size = usize::from(u16::from_be_bytes([size_hi, size_lo]));

    let compressor = resolve_compressor(kind);
    let _ = compressor.decompress(body, out_size);
});
