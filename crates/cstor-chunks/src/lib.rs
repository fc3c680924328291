//! cstor-chunks: fixed-size chunking, SHA-256 content hashing, zstd codec
//!
//! # Overview
//! - `chunker`: sequential fixed-size chunk reader/writer over files
//! - `hash`: SHA-256 digests used as chunk keys and content addresses
//! - `codec`: single-frame zstd compression (self-describing on decode)

pub mod chunker;
pub mod codec;
pub mod hash;

// Convenience re-exports for the most common operations
pub use chunker::{chunk_count, ChunkReader, ChunkWriter};
pub use codec::{compress, decompress};
pub use hash::{digest, digest_hex, DIGEST_HEX_LEN, DIGEST_LEN};
