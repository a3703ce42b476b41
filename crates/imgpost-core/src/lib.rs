//! imgpost Core Library
//!
//! This crate provides the image kind abstraction, the upload error taxonomy,
//! and configuration shared across all imgpost components.

pub mod config;
pub mod error;
pub mod kind;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{ErrorKind, ErrorMetadata, LogLevel, UploadError, UploadResult};
pub use kind::ImageKind;
pub use storage_types::StorageBackend;
