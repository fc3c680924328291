//! Single-frame zstd compression
//!
//! Each chunk compresses to one zstd frame. The frame records its own
//! uncompressed length, so decompression needs no external size hint.

use cstor_core::{CstorError, CstorResult};

/// Compress one chunk's plaintext. A codec failure is unrecoverable for the
/// affected chunk; the caller must abort rather than store a bad payload.
pub fn compress(data: &[u8], level: i32) -> CstorResult<Vec<u8>> {
    zstd::encode_all(data, level).map_err(|e| CstorError::Compression(e.to_string()))
}

/// Decompress one chunk back to its plaintext.
pub fn decompress(data: &[u8]) -> CstorResult<Vec<u8>> {
    zstd::decode_all(data).map_err(|e| CstorError::Decompression(e.to_string()))
}
