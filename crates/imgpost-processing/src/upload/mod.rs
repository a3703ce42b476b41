//! Upload pipeline: validate → name → transform → store.

pub mod pipeline;
pub mod types;

pub use pipeline::UploadPipeline;
pub use types::{StoredArtifact, UploadReceipt, UploadRequest, UploadStage};
