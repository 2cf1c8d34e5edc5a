//! `CompressKind::Fastlz`-tagged backend.
//!
//! The reference bundles FastLZ directly (always available, no optional
//! build flag — see `original_source/src/layer/compression/fastlz.c`). This
//! reimplementation substitutes `lz4_flex`, a dependency-free pure-Rust
//! LZ4 implementation with comparable throughput and no unsafe FFI.

use crate::{compress::RawCompressor, error::CodecError};

/// `lz4_flex`'s raw block format, standing in for FastLZ.
pub struct Fastlz;

impl RawCompressor for Fastlz {
    fn output_len_bound(&self, input_len: usize) -> usize {
        // Same oracle as the LZO-tagged backend (SPEC_FULL.md §4.3).
        input_len + input_len / 16 + 64 + 4
    }

    fn compress_into(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(lz4_flex::block::compress(input))
    }

    fn decompress_into(&self, input: &[u8], out_size: usize) -> Result<Vec<u8>, CodecError> {
        let out = lz4_flex::block::decompress(input, out_size)
            .map_err(|e| CodecError::Decompress(e.to_string()))?;
        if out.len() != out_size {
            return Err(CodecError::LengthMismatch { expected: out_size, actual: out.len() });
        }
        Ok(out)
    }
}
