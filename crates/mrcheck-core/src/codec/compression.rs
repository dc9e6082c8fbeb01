//! Whole-blob Brotli compression keyed by data-key suffix

use crate::errors::{ExError, ExErrorKind, VerifyError};
use std::borrow::Cow;
use std::io::{Cursor, Read};

/// Data keys ending with this suffix hold Brotli-compressed payloads
pub const COMPRESSION_SUFFIX: &str = ".br";

const BUFFER_SIZE: usize = 4096;

pub fn is_compressed_key(key: &str) -> bool {
    key.ends_with(COMPRESSION_SUFFIX)
}

/// Decompress `raw` if `key` carries the compression suffix
///
/// Uncompressed payloads are returned borrowed and unchanged.
///
/// # Errors
///
/// `CorruptPayload` when the compressed stream is invalid or truncated.
pub fn decompress<'a>(key: &str, raw: &'a [u8]) -> Result<Cow<'a, [u8]>, ExError> {
    if !is_compressed_key(key) {
        return Ok(Cow::Borrowed(raw));
    }

    let mut decoder = brotli::Decompressor::new(raw, BUFFER_SIZE);
    let mut out = Vec::with_capacity(raw.len().saturating_mul(4));
    decoder.read_to_end(&mut out).map_err(|e| {
        ExError::from(VerifyError::CorruptPayload {
            key: key.to_string(),
            reason: e.to_string(),
        })
    })?;
    Ok(Cow::Owned(out))
}

/// Brotli-compress a payload for storage under a suffixed key
///
/// # Errors
///
/// `Internal` if the encoder fails; writing to memory does not fail in
/// practice.
pub fn compress(raw: &[u8]) -> Result<Vec<u8>, ExError> {
    let params = brotli::enc::BrotliEncoderParams::default();
    let mut out = Vec::new();
    brotli::BrotliCompress(&mut Cursor::new(raw), &mut out, &params).map_err(|e| {
        ExError::new(ExErrorKind::Internal)
            .with_op("compress")
            .with_message(e.to_string())
    })?;
    Ok(out)
}
