//! Convergent AES-256-SIV chunk encryption
//!
//! Deterministic encryption (same plaintext + key = same ciphertext) is
//! required here: identical chunks must converge to identical content
//! addresses for deduplication. AES-SIV with a fixed zero nonce provides
//! exactly that, with authentication (SIV = Synthetic Initialization
//! Vector).
//!
//! The key material is the 64 ASCII characters of the hex-encoded plaintext
//! digest, used byte-for-byte as the AES-256-SIV key (two 32-byte
//! sub-keys). Hex characters carry 4 bits per byte, half of what raw digest
//! bytes would; existing stored data depends on this exact key material, so
//! it stays.

use aes_siv::{
    aead::{Aead, KeyInit},
    Aes256SivAead, Nonce,
};

use cstor_core::{CstorError, CstorResult};

/// Length of the hex digest string used as key material
pub const KEY_HEX_LEN: usize = 64;

/// An AES-SIV ciphertext is never shorter than the 16-byte SIV tag
pub const MIN_CIPHERTEXT_LEN: usize = 16;

fn cipher_for(key_hex: &str) -> Option<Aes256SivAead> {
    // AES-256-SIV wants a 64-byte key; the 64 hex chars fit exactly
    Aes256SivAead::new_from_slice(key_hex.as_bytes()).ok()
}

/// Encrypt one compressed chunk under its hex chunk key.
pub fn encrypt(plaintext: &[u8], key_hex: &str) -> CstorResult<Vec<u8>> {
    let cipher = cipher_for(key_hex).ok_or_else(|| {
        CstorError::Encryption(format!("key must be {KEY_HEX_LEN} hex chars"))
    })?;
    cipher
        .encrypt(&Nonce::default(), plaintext)
        .map_err(|e| CstorError::Encryption(e.to_string()))
}

/// Decrypt one chunk's ciphertext. Fails with `Decryption` when the
/// ciphertext is shorter than the SIV tag, was tampered with, or the key is
/// wrong. The key cannot be validated on its own, only by decryption
/// succeeding and the later plaintext digest check passing.
pub fn decrypt(ciphertext: &[u8], key_hex: &str) -> CstorResult<Vec<u8>> {
    if ciphertext.len() < MIN_CIPHERTEXT_LEN {
        return Err(CstorError::Decryption);
    }
    let cipher = cipher_for(key_hex).ok_or(CstorError::Decryption)?;
    cipher
        .decrypt(&Nonce::default(), ciphertext)
        .map_err(|_| CstorError::Decryption)
}
