//! Per-chunk seal/open pipeline
//!
//! `seal_chunk` and `open_chunk` are pure functions over bytes: no network,
//! no file handles. Callers that encrypt-then-store-later and callers that
//! encrypt-and-upload-immediately share this one implementation, with I/O
//! layered on top.

use cstor_chunks::{codec, hash};
use cstor_core::{CstorError, CstorResult};

use crate::cipher;
use crate::frame;

/// The product of sealing one plaintext chunk.
#[derive(Debug, Clone)]
pub struct SealedChunk {
    /// Hex SHA-256 of the ciphertext; the backend storage key
    pub content_id: String,
    /// Hex SHA-256 of the plaintext; decrypts the chunk. Never stored on
    /// the backend, only in the caller's manifest.
    pub chunk_key: String,
    /// Framed payload to store under `content_id`
    pub frame: Vec<u8>,
}

/// Hash, compress, encrypt, and frame one plaintext chunk.
///
/// The content id addresses the *ciphertext*, so storage corruption is
/// detectable without the key; the chunk key digests the *plaintext*, so
/// the same digest serves as encryption key and post-decode proof of
/// correctness.
pub fn seal_chunk(plaintext: &[u8], zstd_level: i32) -> CstorResult<SealedChunk> {
    let chunk_key = hash::digest_hex(plaintext);
    let compressed = codec::compress(plaintext, zstd_level)?;
    let ciphertext = cipher::encrypt(&compressed, &chunk_key)?;
    let content_id = hash::digest_hex(&ciphertext);
    let frame = frame::encode_frame(&ciphertext);
    Ok(SealedChunk {
        content_id,
        chunk_key,
        frame,
    })
}

/// Unframe, decrypt, decompress, and verify one stored chunk.
///
/// The recovered plaintext's digest must equal `chunk_key`. A mismatch
/// means the wrong key was supplied or the key/ciphertext pairing was
/// corrupted upstream; it is reported as `IntegrityMismatch`, distinct from
/// the transport-level `FrameChecksum` failure.
pub fn open_chunk(framed: &[u8], chunk_key: &str) -> CstorResult<Vec<u8>> {
    let ciphertext = frame::decode_frame(framed)?;
    let compressed = cipher::decrypt(ciphertext, chunk_key)?;
    let plaintext = codec::decompress(&compressed)?;

    let actual = hash::digest_hex(&plaintext);
    if actual != chunk_key {
        return Err(CstorError::IntegrityMismatch {
            expected: chunk_key.to_string(),
            actual,
        });
    }
    Ok(plaintext)
}
