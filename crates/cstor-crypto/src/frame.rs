//! CRC32-checked frame encapsulation
//!
//! Stored value layout, bit-exact:
//! ```text
//! offset 0, 8 bytes: format/version marker, ASCII "10000000"
//! offset 8, 8 bytes: CRC32 (IEEE) of the ciphertext, lowercase hex
//! offset 16, rest:   ciphertext bytes
//! ```
//!
//! The header is 16 bytes regardless of payload size. Decoding validates
//! length and checksum; the marker is written but not enforced on read,
//! matching deployed readers that skip the first 16 bytes unconditionally.
//! The checksum catches storage-layer corruption before any decryption is
//! attempted; it says nothing about content correctness, which the
//! pipeline's plaintext digest check covers.

use cstor_core::{CstorError, CstorResult};

/// Fixed ASCII format marker at the head of every frame
pub const FRAME_MARKER: &[u8; 8] = b"10000000";

/// Marker plus hex checksum
pub const FRAME_HEADER_LEN: usize = 16;

/// Wrap ciphertext in a checksummed frame.
pub fn encode_frame(ciphertext: &[u8]) -> Vec<u8> {
    let crc = crc32fast::hash(ciphertext);
    let mut framed = Vec::with_capacity(FRAME_HEADER_LEN + ciphertext.len());
    framed.extend_from_slice(FRAME_MARKER);
    framed.extend_from_slice(format!("{crc:08x}").as_bytes());
    framed.extend_from_slice(ciphertext);
    framed
}

/// Split a frame into header and ciphertext, verifying the checksum.
pub fn decode_frame(framed: &[u8]) -> CstorResult<&[u8]> {
    if framed.len() < FRAME_HEADER_LEN {
        return Err(CstorError::FrameTooShort { len: framed.len() });
    }
    let (header, body) = framed.split_at(FRAME_HEADER_LEN);

    let declared = String::from_utf8_lossy(&header[8..]).into_owned();
    let actual = format!("{:08x}", crc32fast::hash(body));
    if declared != actual {
        return Err(CstorError::FrameChecksum { declared, actual });
    }
    Ok(body)
}
