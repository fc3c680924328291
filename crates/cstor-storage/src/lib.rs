//! cstor-storage: OpenDAL-backed chunk store client
//!
//! The backend contract is a key-value store: keys are hex content
//! addresses, values are opaque framed blobs. Retry policy lives here (an
//! OpenDAL layer), never in the pipeline.

pub mod operator;
pub mod store;

pub use operator::{build_operator, memory_operator, Credentials};
pub use store::ChunkStore;
