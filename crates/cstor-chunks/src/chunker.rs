//! Sequential fixed-size chunking over files
//!
//! A file splits into chunks of exactly `chunk_size` bytes; only the final
//! chunk may be shorter. Empty files are rejected before any chunking
//! happens. The writer is strictly append-only: chunks must be handed back
//! in their original order, it never seeks.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use cstor_core::{CstorError, CstorResult};

/// Number of chunks for a file of `total_len` bytes: plain ceiling
/// division, forced to 1 for files smaller than one chunk. `chunk_size`
/// must be nonzero; `ChunkReader::open` enforces that for callers.
pub fn chunk_count(total_len: u64, chunk_size: usize) -> u64 {
    total_len.div_ceil(chunk_size as u64).max(1)
}

/// Reads a file as an ordered sequence of fixed-size chunks.
#[derive(Debug)]
pub struct ChunkReader {
    reader: BufReader<File>,
    chunk_size: usize,
    total_len: u64,
    consumed: u64,
}

impl ChunkReader {
    /// Open `path` for chunked reading. A zero chunk size is rejected with
    /// `Config`; zero-length files are rejected with `EmptyInput` before
    /// any read is attempted. The file handle is released when the reader
    /// drops, whichever path got it there.
    pub fn open(path: &Path, chunk_size: usize) -> CstorResult<Self> {
        if chunk_size == 0 {
            return Err(CstorError::Config("chunk_size must be nonzero".into()));
        }
        let file = File::open(path)?;
        let total_len = file.metadata()?.len();
        if total_len == 0 {
            return Err(CstorError::EmptyInput);
        }
        Ok(Self {
            reader: BufReader::new(file),
            chunk_size,
            total_len,
            consumed: 0,
        })
    }

    /// Total file length in bytes.
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// Number of chunks this reader will yield.
    pub fn chunk_count(&self) -> u64 {
        chunk_count(self.total_len, self.chunk_size)
    }

    /// Read the next chunk. Every chunk is exactly `chunk_size` bytes except
    /// the last, which carries the remainder. Returns `None` once the file
    /// is fully consumed; a short read (file truncated underneath us)
    /// surfaces as an I/O error.
    pub fn next_chunk(&mut self) -> Option<CstorResult<Vec<u8>>> {
        let remaining = self.total_len - self.consumed;
        if remaining == 0 {
            return None;
        }
        let len = remaining.min(self.chunk_size as u64) as usize;
        let mut buf = vec![0u8; len];
        match self.reader.read_exact(&mut buf) {
            Ok(()) => {
                self.consumed += len as u64;
                Some(Ok(buf))
            }
            Err(e) => Some(Err(CstorError::Io(e))),
        }
    }
}

impl Iterator for ChunkReader {
    type Item = CstorResult<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_chunk()
    }
}

/// Writes chunks back to a file in strict arrival order.
#[derive(Debug)]
pub struct ChunkWriter {
    writer: BufWriter<File>,
    written: u64,
}

impl ChunkWriter {
    pub fn create(path: &Path) -> CstorResult<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Append one chunk at the current offset. Callers own the ordering:
    /// chunks written out of position order produce a scrambled file.
    pub fn write_chunk(&mut self, data: &[u8]) -> CstorResult<()> {
        self.writer.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Bytes written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush buffered data and release the file handle.
    pub fn finish(mut self) -> CstorResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(data: &[u8]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.bin");
        std::fs::write(&path, data).unwrap();
        (dir, path)
    }

    #[test]
    fn chunk_count_boundaries() {
        let size = 512 * 1024;
        assert_eq!(chunk_count(1, size), 1);
        assert_eq!(chunk_count(size as u64 - 1, size), 1);
        assert_eq!(chunk_count(size as u64, size), 1);
        assert_eq!(chunk_count(size as u64 + 1, size), 2);
        assert_eq!(chunk_count(700 * 1024, size), 2);
        assert_eq!(chunk_count(3 * size as u64, size), 3);
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let (_dir, path) = temp_file(b"data");
        let err = ChunkReader::open(&path, 0).unwrap_err();
        assert!(matches!(err, CstorError::Config(_)));
    }

    #[test]
    fn empty_file_is_rejected() {
        let (_dir, path) = temp_file(b"");
        let err = ChunkReader::open(&path, 1024).unwrap_err();
        assert!(matches!(err, CstorError::EmptyInput));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ChunkReader::open(Path::new("/nonexistent/input.bin"), 1024).unwrap_err();
        assert!(matches!(err, CstorError::Io(_)));
    }

    #[test]
    fn file_smaller_than_chunk_is_one_chunk() {
        let (_dir, path) = temp_file(b"tiny");
        let mut reader = ChunkReader::open(&path, 1024).unwrap();
        assert_eq!(reader.chunk_count(), 1);
        assert_eq!(reader.next_chunk().unwrap().unwrap(), b"tiny");
        assert!(reader.next_chunk().is_none());
    }

    #[test]
    fn exact_multiple_has_no_short_tail() {
        let data = vec![7u8; 2048];
        let (_dir, path) = temp_file(&data);
        let chunks: Vec<_> = ChunkReader::open(&path, 1024)
            .unwrap()
            .collect::<CstorResult<Vec<_>>>()
            .unwrap();
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() == 1024));
    }

    #[test]
    fn one_extra_byte_makes_one_extra_chunk() {
        let data = vec![7u8; 2049];
        let (_dir, path) = temp_file(&data);
        let chunks: Vec<_> = ChunkReader::open(&path, 1024)
            .unwrap()
            .collect::<CstorResult<Vec<_>>>()
            .unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 1024);
        assert_eq!(chunks[1].len(), 1024);
        assert_eq!(chunks[2].len(), 1);
    }

    #[test]
    fn chunks_reassemble_in_order() {
        let data: Vec<u8> = (0..5000u32).map(|i| (i % 256) as u8).collect();
        let (_dir, path) = temp_file(&data);
        let mut out = Vec::new();
        for chunk in ChunkReader::open(&path, 1024).unwrap() {
            out.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(out, data);
    }

    #[test]
    fn truncation_under_reader_is_io_error() {
        let data = vec![1u8; 4096];
        let (_dir, path) = temp_file(&data);
        let mut reader = ChunkReader::open(&path, 1024).unwrap();

        // Shrink the file behind the reader's back; the remaining reads
        // come up short.
        let file = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.set_len(512).unwrap();

        let result = reader.by_ref().collect::<CstorResult<Vec<_>>>();
        assert!(matches!(result.unwrap_err(), CstorError::Io(_)));
    }

    #[test]
    fn writer_appends_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.bin");

        let mut writer = ChunkWriter::create(&path).unwrap();
        writer.write_chunk(b"first-").unwrap();
        writer.write_chunk(b"second-").unwrap();
        writer.write_chunk(b"third").unwrap();
        assert_eq!(writer.written(), 18);
        writer.finish().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"first-second-third");
    }

    #[test]
    fn writer_create_failure_is_io_error() {
        let err = ChunkWriter::create(Path::new("/nonexistent/dir/out.bin")).unwrap_err();
        assert!(matches!(err, CstorError::Io(_)));
    }
}
