//! Content-addressed chunk store over an OpenDAL operator
//!
//! Keys are `<prefix>/chunks/<content_id>`; values are opaque framed blobs.
//! The store never interprets frames and never sees chunk keys.

use opendal::Operator;
use tracing::debug;

use cstor_core::{CstorError, CstorResult};

#[derive(Debug, Clone)]
pub struct ChunkStore {
    op: Operator,
    prefix: String,
}

impl ChunkStore {
    pub fn new(op: Operator, prefix: impl Into<String>) -> Self {
        Self {
            op,
            prefix: prefix.into(),
        }
    }

    fn key(&self, content_id: &str) -> String {
        if self.prefix.is_empty() {
            format!("chunks/{content_id}")
        } else {
            format!("{}/chunks/{content_id}", self.prefix)
        }
    }

    /// Fetch the framed payload stored under `content_id`.
    pub async fn get(&self, content_id: &str) -> CstorResult<Vec<u8>> {
        match self.op.read(&self.key(content_id)).await {
            Ok(buf) => Ok(buf.to_vec()),
            Err(e) if e.kind() == opendal::ErrorKind::NotFound => {
                Err(CstorError::NotFound(content_id.to_string()))
            }
            Err(e) => Err(CstorError::Storage(e.to_string())),
        }
    }

    /// Store `frame` under `content_id`. The keyspace is content-addressed:
    /// re-writing an existing key stores identical bytes, so a repeat put is
    /// harmless.
    pub async fn put(&self, content_id: &str, frame: Vec<u8>) -> CstorResult<()> {
        let len = frame.len();
        self.op
            .write(&self.key(content_id), frame)
            .await
            .map_err(|e| CstorError::Storage(e.to_string()))?;
        debug!(content_id, bytes = len, "stored chunk");
        Ok(())
    }

    /// Probe for `content_id` without fetching; drives upload dedup.
    pub async fn contains(&self, content_id: &str) -> CstorResult<bool> {
        self.op
            .exists(&self.key(content_id))
            .await
            .map_err(|e| CstorError::Storage(e.to_string()))
    }
}
