//! `CompressKind::Lzo`-tagged backend.
//!
//! The reference links against liblzo2, bundled as an optional build-time
//! dependency (see `SPEC_FULL.md` §4.3 and `original_source/src/layer/compression/lzo.c`).
//! This reimplementation substitutes `zstd`, the pack-grounded pure-Rust
//! dictionary compressor with the best ratio of the three backends
//! available here; see `DESIGN.md` for why this tag keeps the LZO name
//! despite the swapped algorithm (wire compatibility is with the *tag*, not
//! the bytes an LZO peer would produce).

use crate::{compress::RawCompressor, error::CodecError};

/// `zstd` at its default compression level, standing in for LZO.
pub struct Lzo;

impl RawCompressor for Lzo {
    fn output_len_bound(&self, input_len: usize) -> usize {
        // Reference oracle for LZO/FastLZ: n + n/16 + 64 + 4 (SPEC_FULL.md §4.3).
        input_len + input_len / 16 + 64 + 4
    }

    fn compress_into(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        zstd::encode_all(input, 0).map_err(|e| CodecError::Compress(e.to_string()))
    }

    fn decompress_into(&self, input: &[u8], out_size: usize) -> Result<Vec<u8>, CodecError> {
        let out = zstd::decode_all(input).map_err(|e| CodecError::Decompress(e.to_string()))?;
        if out.len() != out_size {
            return Err(CodecError::LengthMismatch { expected: out_size, actual: out.len() });
        }
        Ok(out)
    }
}
