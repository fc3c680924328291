//! File manifests: the ordered chunk references needed to rebuild a file
//!
//! A manifest is the caller-persisted product of an upload. Each entry pairs
//! a content id (the backend storage key) with the chunk key that decrypts
//! it. The chunk key never reaches the backend; losing the manifest means
//! losing the ability to decrypt.

use serde::{Deserialize, Serialize};

/// One stored chunk: everything needed to fetch, decrypt, and verify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRef {
    /// Zero-based position within the source file
    pub index: u64,
    /// Hex SHA-256 of the stored ciphertext; the backend key
    pub content_id: String,
    /// Hex SHA-256 of the chunk plaintext; decrypts and verifies the chunk
    pub chunk_key: String,
    /// Plaintext size in bytes
    pub size: u64,
}

/// An ordered list of chunk references plus the original file length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest format version
    pub version: u32,
    /// Original file size in bytes
    pub total_size: u64,
    /// Chunk references in original position order
    pub chunks: Vec<ChunkRef>,
}

impl Manifest {
    pub const VERSION: u32 = 1;

    pub fn new(total_size: u64, chunks: Vec<ChunkRef>) -> Self {
        Self {
            version: Self::VERSION,
            total_size,
            chunks,
        }
    }

    /// Serialize to JSON bytes
    pub fn to_bytes(&self) -> anyhow::Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| anyhow::anyhow!("manifest serialization: {e}"))
    }

    /// Deserialize from JSON bytes
    pub fn from_bytes(data: &[u8]) -> anyhow::Result<Self> {
        serde_json::from_slice(data).map_err(|e| anyhow::anyhow!("manifest deserialization: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(index: u64) -> ChunkRef {
        ChunkRef {
            index,
            content_id: format!("content-{index}"),
            chunk_key: format!("key-{index}"),
            size: 512 * 1024,
        }
    }

    #[test]
    fn roundtrip_preserves_order() {
        let manifest = Manifest::new(1024 * 1024, vec![chunk(0), chunk(1), chunk(2)]);
        let bytes = manifest.to_bytes().unwrap();
        let back = Manifest::from_bytes(&bytes).unwrap();

        assert_eq!(back, manifest);
        assert_eq!(back.chunks[2].index, 2);
    }

    #[test]
    fn empty_manifest_is_representable() {
        let manifest = Manifest::new(0, vec![]);
        let back = Manifest::from_bytes(&manifest.to_bytes().unwrap()).unwrap();
        assert!(back.chunks.is_empty());
        assert_eq!(back.total_size, 0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Manifest::from_bytes(b"{ not json").is_err());
    }
}
