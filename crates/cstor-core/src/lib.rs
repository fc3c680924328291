pub mod config;
pub mod error;
pub mod manifest;

pub use error::{CstorError, CstorResult};
pub use manifest::{ChunkRef, Manifest};
