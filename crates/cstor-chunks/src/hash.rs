//! SHA-256 content hashing
//!
//! The digest does double duty: hashed over a chunk's plaintext it becomes
//! the chunk key; hashed over the ciphertext it becomes the content address
//! the backend stores the chunk under.

use sha2::{Digest, Sha256};

/// Digest length in bytes
pub const DIGEST_LEN: usize = 32;

/// Hex-encoded digest length (64 chars)
pub const DIGEST_HEX_LEN: usize = 64;

/// SHA-256 of a byte slice.
pub fn digest(data: &[u8]) -> [u8; DIGEST_LEN] {
    Sha256::digest(data).into()
}

/// SHA-256 of a byte slice as a lowercase hex string.
pub fn digest_hex(data: &[u8]) -> String {
    hex::encode(digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector() {
        // NIST test vector for SHA-256("abc")
        assert_eq!(
            digest_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn empty_input_vector() {
        assert_eq!(
            digest_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn deterministic() {
        let data = vec![0x42u8; 4096];
        assert_eq!(digest(&data), digest(&data));
    }

    #[test]
    fn distinct_inputs_distinct_digests() {
        assert_ne!(digest(b"chunk one"), digest(b"chunk two"));
    }

    #[test]
    fn hex_is_lowercase_and_fixed_width() {
        let hex = digest_hex(b"anything");
        assert_eq!(hex.len(), DIGEST_HEX_LEN);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
