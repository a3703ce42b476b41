use crate::keys::storage_key;
use crate::traits::{StorageError, StorageResult, StorageSink};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage sink
#[derive(Clone, Debug)]
pub struct LocalFilesystemSink {
    base_path: PathBuf,
    create_dirs: bool,
}

impl LocalFilesystemSink {
    /// Create a new LocalFilesystemSink instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for stored images (e.g., "/var/lib/imgpost")
    /// * `create_dirs` - Create the root and missing destination directories.
    ///   When false, a missing directory fails the write.
    pub async fn new(base_path: impl Into<PathBuf>, create_dirs: bool) -> StorageResult<Self> {
        let base_path = base_path.into();

        if create_dirs {
            fs::create_dir_all(&base_path).await.map_err(|e| {
                StorageError::ConfigError(format!(
                    "Failed to create storage directory {}: {}",
                    base_path.display(),
                    e
                ))
            })?;
        }

        Ok(LocalFilesystemSink {
            base_path,
            create_dirs,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert an artifact address to a filesystem path under the root
    fn artifact_path(&self, name: &str, destination_path: &str) -> StorageResult<PathBuf> {
        let key = storage_key(destination_path, name)?;
        Ok(key
            .split('/')
            .fold(self.base_path.clone(), |path, segment| path.join(segment)))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::WriteFailed(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    async fn write_file(path: &Path, payload: &[u8]) -> StorageResult<()> {
        let mut file = fs::File::create(path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(payload).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl StorageSink for LocalFilesystemSink {
    async fn store(
        &self,
        payload: Bytes,
        name: &str,
        destination_path: &str,
    ) -> StorageResult<String> {
        let path = self.artifact_path(name, destination_path)?;
        let size = payload.len();

        if self.create_dirs {
            self.ensure_parent_dir(&path).await?;
        }

        let start = std::time::Instant::now();

        if let Err(e) = Self::write_file(&path, &payload).await {
            // A file that was created but not fully written must not stay reachable.
            if let Err(cleanup_err) = fs::remove_file(&path).await {
                if cleanup_err.kind() != IoErrorKind::NotFound {
                    tracing::warn!(
                        error = %cleanup_err,
                        path = %path.display(),
                        "Failed to remove partially written file"
                    );
                }
            }
            tracing::error!(
                error = %e,
                path = %path.display(),
                size_bytes = size,
                "Local storage write failed"
            );
            return Err(e);
        }

        tracing::info!(
            path = %path.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(path.display().to_string())
    }

    async fn fetch(&self, name: &str, destination_path: &str) -> StorageResult<Bytes> {
        let path = self.artifact_path(name, destination_path)?;

        match fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                Err(StorageError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(StorageError::ReadFailed(format!(
                "Failed to read file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn delete(&self, name: &str, destination_path: &str) -> StorageResult<()> {
        let path = self.artifact_path(name, destination_path)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Local storage delete successful");
                Ok(())
            }
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IoError(e)),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
