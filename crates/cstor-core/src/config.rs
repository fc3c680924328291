use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CstorError, CstorResult};

/// Default chunk size: 512 KiB
pub const DEFAULT_CHUNK_SIZE: usize = 512 * 1024;

/// Top-level configuration (loaded from chunkstor.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkstorConfig {
    pub chunking: ChunkingConfig,
    pub storage: StorageConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Chunk size in bytes (default: 512 KiB).
    ///
    /// Changing this changes every derived content address for re-chunked
    /// data. Existing manifests stay decodable: decode never re-chunks.
    pub chunk_size: usize,
    /// zstd compression level (default: 3)
    pub zstd_level: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// S3-compatible endpoint
    pub endpoint: String,
    /// S3 region (default: us-east-1)
    pub region: String,
    /// Bucket name
    pub bucket: String,
    /// Key prefix inside the bucket; chunks land under `<prefix>/chunks/`
    pub prefix: String,
    /// Enforce HTTPS for backend connections (warn/error on HTTP endpoints)
    pub enforce_tls: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Max in-flight chunks per file-level operation (default: 4)
    pub concurrency: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            zstd_level: 3,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9000".into(),
            region: "us-east-1".into(),
            bucket: "chunkstor".into(),
            prefix: String::new(),
            enforce_tls: false,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

impl ChunkstorConfig {
    /// Load configuration from a TOML file. Missing sections fall back to
    /// their defaults; nonsense values are rejected here rather than
    /// surfacing as panics mid-pipeline.
    pub fn load(path: &Path) -> CstorResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let cfg: Self = toml::from_str(&content)
            .map_err(|e| CstorError::Config(format!("parsing {}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check invariants deserialization cannot express.
    pub fn validate(&self) -> CstorResult<()> {
        if self.chunking.chunk_size == 0 {
            return Err(CstorError::Config("chunking.chunk_size must be nonzero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_chunk_size() {
        let cfg = ChunkstorConfig::default();
        assert_eq!(cfg.chunking.chunk_size, 512 * 1024);
        assert_eq!(cfg.chunking.zstd_level, 3);
        assert_eq!(cfg.sync.concurrency, 4);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: ChunkstorConfig = toml::from_str(
            r#"
            [chunking]
            chunk_size = 1024

            [storage]
            bucket = "mydata"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.chunking.chunk_size, 1024);
        assert_eq!(cfg.chunking.zstd_level, 3);
        assert_eq!(cfg.storage.bucket, "mydata");
        assert_eq!(cfg.storage.region, "us-east-1");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chunkstor.toml");
        std::fs::write(&path, "[sync]\nconcurrency = 16\n").unwrap();

        let cfg = ChunkstorConfig::load(&path).unwrap();
        assert_eq!(cfg.sync.concurrency, 16);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ChunkstorConfig::load(Path::new("/nonexistent/chunkstor.toml")).unwrap_err();
        assert!(matches!(err, CstorError::Io(_)));
    }

    #[test]
    fn zero_chunk_size_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chunkstor.toml");
        std::fs::write(&path, "[chunking]\nchunk_size = 0\n").unwrap();

        let err = ChunkstorConfig::load(&path).unwrap_err();
        assert!(matches!(err, CstorError::Config(_)));
    }

    #[test]
    fn bad_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chunkstor.toml");
        std::fs::write(&path, "not toml [[[").unwrap();

        let err = ChunkstorConfig::load(&path).unwrap_err();
        assert!(matches!(err, CstorError::Config(_)));
    }
}
