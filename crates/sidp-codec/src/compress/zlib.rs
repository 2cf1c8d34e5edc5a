//! `CompressKind::Zlib`-tagged backend.
//!
//! Bundled in the reference only when not built for a constrained target
//! (see `original_source/src/layer/compression/zlib.c`); always available
//! here.

use std::io::Write;

use flate2::{Compression, write::ZlibEncoder};

use crate::{compress::RawCompressor, error::CodecError};

/// `flate2`'s zlib encoder/decoder, matching the reference's backend choice.
pub struct Zlib;

impl RawCompressor for Zlib {
    fn output_len_bound(&self, input_len: usize) -> usize {
        // §9 open question: the reference's compress-output-length oracle for
        // zlib returns `n` verbatim, which undercounts for incompressible
        // input and is unsafe for a caller that pre-allocates a fixed buffer
        // from it. This reimplementation uses zlib's own documented worst
        // case instead and keeps the "discard if grown" fallback in
        // `compress::Compressor::compress` as the actual safety net.
        input_len + input_len / 1000 + 12
    }

    fn compress_into(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(input).map_err(|e| CodecError::Compress(e.to_string()))?;
        encoder.finish().map_err(|e| CodecError::Compress(e.to_string()))
    }

    fn decompress_into(&self, input: &[u8], out_size: usize) -> Result<Vec<u8>, CodecError> {
        use std::io::Read;
        let mut decoder = flate2::read::ZlibDecoder::new(input);
        let mut out = Vec::with_capacity(out_size);
        decoder.read_to_end(&mut out).map_err(|e| CodecError::Decompress(e.to_string()))?;
        if out.len() != out_size {
            return Err(CodecError::LengthMismatch { expected: out_size, actual: out.len() });
        }
        Ok(out)
    }
}
