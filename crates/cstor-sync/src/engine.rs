//! File-level encode/decode orchestration
//!
//! Per-chunk seal/open is pure and stateless, so chunks run through the
//! pipeline concurrently, bounded by `concurrency`. `buffered` yields
//! results in input order, which keeps the manifest position-ordered on
//! upload and the output file strictly append-in-order on download. The
//! one piece of shared state, the writer's offset, is owned by the single
//! consumer of the stream.
//!
//! The first failing chunk aborts the whole operation. Chunks already
//! stored stay behind: the backend is content-addressed and idempotent, so
//! a re-run with the same manifest resumes cleanly.

use std::path::Path;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use futures::pin_mut;
use tracing::{debug, info};

use cstor_chunks::chunker::{ChunkReader, ChunkWriter};
use cstor_core::config::ChunkingConfig;
use cstor_core::manifest::{ChunkRef, Manifest};
use cstor_crypto::pipeline::{open_chunk, seal_chunk};
use cstor_storage::ChunkStore;

/// Outcome of uploading one file.
#[derive(Debug)]
pub struct UploadReport {
    /// The caller-persisted decode driver: ordered chunk references plus
    /// total length
    pub manifest: Manifest,
    /// Chunks in the file
    pub chunks: usize,
    /// Chunks skipped because the backend already had them
    pub chunks_skipped: usize,
    /// Original file size
    pub bytes_read: u64,
    /// Framed bytes actually written to the backend (skipped chunks excluded)
    pub bytes_uploaded: u64,
}

/// Outcome of downloading one file.
#[derive(Debug)]
pub struct DownloadReport {
    pub chunks: usize,
    pub bytes_written: u64,
}

struct SealedUpload {
    reference: ChunkRef,
    frame_len: u64,
    skipped: bool,
}

/// Chunk, seal, and store a file; returns the manifest needed to decode it.
///
/// Chunks are read sequentially off the source file; sealing and backend
/// puts run concurrently per chunk. Empty files are rejected with
/// `EmptyInput` before anything is stored.
pub async fn upload_file(
    store: &ChunkStore,
    path: &Path,
    chunking: &ChunkingConfig,
    concurrency: usize,
) -> Result<UploadReport> {
    let mut reader = ChunkReader::open(path, chunking.chunk_size)
        .with_context(|| format!("opening {}", path.display()))?;
    let total_len = reader.total_len();
    let expected = reader.chunk_count();
    debug!(path = %path.display(), bytes = total_len, chunks = expected, "upload start");

    let level = chunking.zstd_level;
    let results = stream::iter(reader.by_ref().enumerate().map(move |(index, chunk)| {
        async move {
            let plaintext = chunk.with_context(|| format!("reading chunk {index}"))?;
            let size = plaintext.len() as u64;
            let sealed = seal_chunk(&plaintext, level)
                .with_context(|| format!("sealing chunk {index}"))?;
            let frame_len = sealed.frame.len() as u64;
            let content_id = sealed.content_id;
            let chunk_key = sealed.chunk_key;

            let skipped = store
                .contains(&content_id)
                .await
                .with_context(|| format!("probing chunk {index} ({content_id})"))?;
            if skipped {
                debug!(index, content_id = %content_id, "dedup: chunk already stored");
            } else {
                store
                    .put(&content_id, sealed.frame)
                    .await
                    .with_context(|| format!("storing chunk {index} ({content_id})"))?;
            }

            Ok::<_, anyhow::Error>(SealedUpload {
                reference: ChunkRef {
                    index: index as u64,
                    content_id,
                    chunk_key,
                    size,
                },
                frame_len,
                skipped,
            })
        }
    }))
    .buffered(concurrency.max(1));
    pin_mut!(results);

    let mut chunks = Vec::with_capacity(expected as usize);
    let mut bytes_uploaded = 0u64;
    let mut chunks_skipped = 0usize;
    while let Some(next) = results.next().await {
        let sealed = next?;
        if sealed.skipped {
            chunks_skipped += 1;
        } else {
            bytes_uploaded += sealed.frame_len;
        }
        chunks.push(sealed.reference);
    }

    info!(
        path = %path.display(),
        bytes = total_len,
        chunks = chunks.len(),
        skipped = chunks_skipped,
        uploaded_bytes = bytes_uploaded,
        "upload complete"
    );

    Ok(UploadReport {
        chunks: chunks.len(),
        chunks_skipped,
        bytes_read: total_len,
        bytes_uploaded,
        manifest: Manifest::new(total_len, chunks),
    })
}

/// Fetch, open, and reassemble a file from its manifest.
///
/// Chunks are fetched and verified concurrently but written strictly in
/// position order, to a temp path that is renamed into place only once
/// every chunk has passed verification. An empty manifest yields a
/// zero-length file.
pub async fn download_file(
    store: &ChunkStore,
    manifest: &Manifest,
    path: &Path,
    concurrency: usize,
) -> Result<DownloadReport> {
    let tmp = tmp_path(path)?;
    let outcome = reassemble(store, manifest, path, &tmp, concurrency).await;
    if outcome.is_err() {
        // Nothing partial survives a failed download
        let _ = std::fs::remove_file(&tmp);
    }
    let bytes_written = outcome?;

    info!(
        path = %path.display(),
        chunks = manifest.chunks.len(),
        bytes = bytes_written,
        "download complete"
    );

    Ok(DownloadReport {
        chunks: manifest.chunks.len(),
        bytes_written,
    })
}

/// Sibling path with a `.cstor_tmp` suffix appended to the whole file name,
/// so `a.bin` and `a.txt` downloading into the same directory never share a
/// temp file.
fn tmp_path(path: &Path) -> Result<std::path::PathBuf> {
    let name = path
        .file_name()
        .with_context(|| format!("not a file path: {}", path.display()))?;
    let mut tmp_name = name.to_os_string();
    tmp_name.push(".cstor_tmp");
    Ok(path.with_file_name(tmp_name))
}

async fn reassemble(
    store: &ChunkStore,
    manifest: &Manifest,
    path: &Path,
    tmp: &Path,
    concurrency: usize,
) -> Result<u64> {
    let mut writer =
        ChunkWriter::create(tmp).with_context(|| format!("creating {}", tmp.display()))?;

    let results = stream::iter(manifest.chunks.iter().map(|reference| async move {
        let frame = store
            .get(&reference.content_id)
            .await
            .with_context(|| {
                format!("fetching chunk {} ({})", reference.index, reference.content_id)
            })?;
        let plaintext = open_chunk(&frame, &reference.chunk_key).with_context(|| {
            format!("opening chunk {} ({})", reference.index, reference.content_id)
        })?;
        Ok::<_, anyhow::Error>(plaintext)
    }))
    .buffered(concurrency.max(1));
    pin_mut!(results);

    while let Some(next) = results.next().await {
        let plaintext = next?;
        writer
            .write_chunk(&plaintext)
            .context("writing reassembled chunk")?;
    }

    let bytes_written = writer.written();
    writer.finish().context("flushing output file")?;
    anyhow::ensure!(
        bytes_written == manifest.total_size,
        "reassembled {bytes_written} bytes, manifest says {}",
        manifest.total_size
    );

    std::fs::rename(tmp, path)
        .with_context(|| format!("renaming into place: {}", path.display()))?;
    Ok(bytes_written)
}
