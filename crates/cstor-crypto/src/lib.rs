//! cstor-crypto: convergent chunk encryption and framing
//!
//! Pipeline per chunk:
//! ```text
//! seal: plaintext → SHA-256 (chunk key) → zstd → AES-256-SIV
//!       → SHA-256 (content id) → CRC32 frame
//! open: frame check → decrypt → decompress → plaintext digest == chunk key
//! ```
//!
//! The key is derived from the plaintext itself, so identical chunks always
//! produce identical ciphertexts and identical content addresses, and the
//! backend deduplicates them for free. The cost is that anyone who can query
//! the backend learns content equality.

pub mod cipher;
pub mod frame;
pub mod pipeline;

pub use cipher::{decrypt, encrypt, KEY_HEX_LEN, MIN_CIPHERTEXT_LEN};
pub use frame::{decode_frame, encode_frame, FRAME_HEADER_LEN, FRAME_MARKER};
pub use pipeline::{open_chunk, seal_chunk, SealedChunk};
