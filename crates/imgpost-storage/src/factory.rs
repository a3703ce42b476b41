#[cfg(feature = "storage-local")]
use crate::LocalFilesystemSink;
#[cfg(feature = "storage-remote")]
use crate::RemoteBlobSink;
use crate::{StorageBackend, StorageError, StorageResult, StorageSink};
use imgpost_core::Config;
use std::sync::Arc;

/// Create a storage sink based on configuration
pub async fn create_sink(config: &Config) -> StorageResult<Arc<dyn StorageSink>> {
    match config.storage_backend {
        #[cfg(feature = "storage-remote")]
        StorageBackend::Remote => {
            let bucket = config
                .s3_bucket
                .clone()
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let store_identifier = config.remote_store_identifier().ok_or_else(|| {
                StorageError::ConfigError("BLOB_STORE_IDENTIFIER not configured".to_string())
            })?;

            let sink = RemoteBlobSink::s3(
                bucket,
                config.s3_region.clone(),
                config.s3_endpoint.clone(),
                store_identifier,
            )?;
            Ok(Arc::new(sink))
        }

        #[cfg(not(feature = "storage-remote"))]
        StorageBackend::Remote => Err(StorageError::ConfigError(
            "Remote storage backend not available (storage-remote feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let sink = LocalFilesystemSink::new(
                config.local_storage_path.clone(),
                config.local_storage_create_dirs,
            )
            .await?;
            Ok(Arc::new(sink))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
