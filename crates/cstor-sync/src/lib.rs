//! cstor-sync: file-level upload/download engine
//!
//! Drives the per-chunk seal/open pipeline across a whole file: chunk →
//! seal → store on upload, fetch → open → ordered reassembly on download.

pub mod engine;

pub use engine::{download_file, upload_file, DownloadReport, UploadReport};
