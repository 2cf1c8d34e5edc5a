//! Compression Layer (`CL`) codecs.
//!
//! Every backend is wrapped the same way (see `SPEC_FULL.md` §4.3): one
//! flag byte up front records whether the backend's output was actually
//! kept, falling back to a verbatim copy when compression would have grown
//! the input. That wrapping lives here, once, so the three backend modules
//! only need to implement the raw compress/decompress transform.

mod fastlz;
mod lzo;
mod zlib;

use sidp_proto::CompressKind;

use crate::error::CodecError;

/// A raw (un-flagged) compression backend.
///
/// [`compress`]/[`decompress`] at the module level add the one-byte
/// "was-compressed?" framing around whatever this trait's implementor does.
trait RawCompressor {
    fn output_len_bound(&self, input_len: usize) -> usize;
    fn compress_into(&self, input: &[u8]) -> Result<Vec<u8>, CodecError>;
    fn decompress_into(&self, input: &[u8], out_size: usize) -> Result<Vec<u8>, CodecError>;
}

/// The flag-byte-wrapped compress/decompress contract the chains call.
pub trait Compressor {
    /// Upper bound on [`Self::compress`]'s output length for a given input
    /// length, including the one-byte "was-compressed?" flag.
    fn compress_output_len(&self, input_len: usize) -> usize;

    /// Compress `input`, falling back to a verbatim copy (flag byte 0) if
    /// compression would not shrink it.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Compress`] if the backend reports failure.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Decompress `input` (flag byte plus body) into exactly `out_size`
    /// bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Decompress`] if the backend reports failure,
    /// or [`CodecError::LengthMismatch`] if the decompressed length does
    /// not equal `out_size`.
    fn decompress(&self, input: &[u8], out_size: usize) -> Result<Vec<u8>, CodecError>;
}

impl<T: RawCompressor> Compressor for T {
    fn compress_output_len(&self, input_len: usize) -> usize {
        self.output_len_bound(input_len) + 1
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        let compressed = self.compress_into(input)?;
        let mut out = Vec::with_capacity(compressed.len().max(input.len()) + 1);
        if compressed.len() >= input.len() {
            out.push(0);
            out.extend_from_slice(input);
        } else {
            out.push(1);
            out.extend_from_slice(&compressed);
        }
        Ok(out)
    }

    fn decompress(&self, input: &[u8], out_size: usize) -> Result<Vec<u8>, CodecError> {
        let Some((&flag, body)) = input.split_first() else {
            return Err(CodecError::Decompress("empty input: missing flag byte".to_string()));
        };

        let out = match flag {
            0 => body.to_vec(),
            1 => self.decompress_into(body, out_size)?,
            other => return Err(CodecError::Decompress(format!("invalid CL flag byte {other}"))),
        };

        if out.len() == out_size {
            Ok(out)
        } else {
            Err(CodecError::LengthMismatch { expected: out_size, actual: out.len() })
        }
    }
}

/// Resolve the [`Compressor`] implementation registered under `kind`.
#[must_use]
pub fn resolve_compressor(kind: CompressKind) -> Box<dyn Compressor> {
    match kind {
        CompressKind::Lzo => Box::new(lzo::Lzo),
        CompressKind::Zlib => Box::new(zlib::Zlib),
        CompressKind::Fastlz => Box::new(fastlz::Fastlz),
    }
}
