use thiserror::Error;

pub type CstorResult<T> = Result<T, CstorError>;

/// Error taxonomy for the chunk pipeline.
///
/// Frame errors indicate storage-layer corruption and are detected before
/// decryption is attempted; `IntegrityMismatch` indicates a wrong or
/// mis-paired chunk key and is only reachable after decrypt + decompress
/// succeed. The two must never be conflated: one points at the backend, the
/// other at the manifest.
#[derive(Debug, Error)]
pub enum CstorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input file is empty, nothing to do")]
    EmptyInput,

    #[error("compression failed: {0}")]
    Compression(String),

    #[error("decompression failed: {0}")]
    Decompression(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed: invalid key or malformed ciphertext")]
    Decryption,

    #[error("frame too short: {len} bytes (header alone is 16)")]
    FrameTooShort { len: usize },

    #[error("frame checksum mismatch: header declares {declared}, payload is {actual}")]
    FrameChecksum { declared: String, actual: String },

    #[error("integrity check failed: plaintext digest {actual} does not match chunk key {expected}")]
    IntegrityMismatch { expected: String, actual: String },

    #[error("object not found on the backend: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("config error: {0}")]
    Config(String),
}
