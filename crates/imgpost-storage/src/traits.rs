//! Storage sink abstraction
//!
//! This module defines the `StorageSink` trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use imgpost_core::UploadError;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("Remote store unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for UploadError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::AlreadyExists(key) => UploadError::NameConflict(key),
            StorageError::Unavailable(msg) => UploadError::RemoteUnavailable(msg),
            other => UploadError::IoFailure(other.to_string()),
        }
    }
}

/// Storage sink abstraction
///
/// Persists processed image bytes under `{destination_path}/{name}`. The upload
/// pipeline generates both parts; a sink never sees raw client file names.
///
/// Implementations must be safe to share across concurrent requests writing
/// under distinct names, and a failed `store` must not leave a partial object
/// reachable at the destination.
#[async_trait]
pub trait StorageSink: Send + Sync {
    /// Store `payload` and return the location it is reachable at
    /// (filesystem path or remote URL).
    async fn store(&self, payload: Bytes, name: &str, destination_path: &str)
        -> StorageResult<String>;

    /// Read back a previously stored artifact.
    async fn fetch(&self, name: &str, destination_path: &str) -> StorageResult<Bytes>;

    /// Delete an artifact. Deleting a missing artifact is not an error.
    async fn delete(&self, name: &str, destination_path: &str) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
