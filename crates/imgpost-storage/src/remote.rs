use crate::keys::storage_key;
use crate::traits::{StorageError, StorageResult, StorageSink};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{
    ObjectStore, ObjectStoreExt, PutMode, PutOptions, PutPayload, Result as ObjectResult,
};
use std::sync::Arc;

/// Remote blob storage sink
///
/// Each artifact is uploaded as a single create-only object, so an upload either
/// becomes fully visible or not at all, and an existing object with the same
/// name is reported as a conflict rather than overwritten.
#[derive(Clone, Debug)]
pub struct RemoteBlobSink {
    store: Arc<dyn ObjectStore>,
    store_identifier: String,
}

impl RemoteBlobSink {
    /// Wrap an already configured object store.
    ///
    /// # Arguments
    /// * `store` - Object store holding the blobs
    /// * `store_identifier` - Host used in public addresses (e.g. "images.s3.eu-west-1.amazonaws.com")
    pub fn new(store: Arc<dyn ObjectStore>, store_identifier: impl Into<String>) -> Self {
        RemoteBlobSink {
            store,
            store_identifier: store_identifier.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a sink backed by S3 (or an S3-compatible provider)
    ///
    /// Credentials are resolved by the object store builder from the environment
    /// (`AWS_ACCESS_KEY_ID`, instance metadata, etc).
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `store_identifier` - Host used in public addresses
    pub fn s3(
        bucket: String,
        region: Option<String>,
        endpoint_url: Option<String>,
        store_identifier: String,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);

        if let Some(region) = region {
            builder = builder.with_region(region);
        }

        if let Some(endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder.with_endpoint(endpoint).with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::new(Arc::new(store), store_identifier))
    }

    /// Public address of an object: `https://{store_identifier}/{key}`
    pub fn generate_url(&self, key: &str) -> String {
        format!("https://{}/{}", self.store_identifier, key)
    }

    fn classify(err: ObjectStoreError, key: &str) -> StorageError {
        match err {
            ObjectStoreError::AlreadyExists { .. } | ObjectStoreError::Precondition { .. } => {
                StorageError::AlreadyExists(key.to_string())
            }
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(key.to_string()),
            other => StorageError::Unavailable(other.to_string()),
        }
    }
}

#[async_trait]
impl StorageSink for RemoteBlobSink {
    async fn store(
        &self,
        payload: Bytes,
        name: &str,
        destination_path: &str,
    ) -> StorageResult<String> {
        let key = storage_key(destination_path, name)?;
        let size = payload.len() as u64;
        let location = Path::from(key.clone());
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self
            .store
            .put_opts(
                &location,
                PutPayload::from(payload),
                PutOptions::from(PutMode::Create),
            )
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                store = %self.store_identifier,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Remote upload failed"
            );
            Self::classify(e, &key)
        })?;

        let url = self.generate_url(&key);

        tracing::info!(
            store = %self.store_identifier,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Remote upload successful"
        );

        Ok(url)
    }

    async fn fetch(&self, name: &str, destination_path: &str) -> StorageResult<Bytes> {
        let key = storage_key(destination_path, name)?;
        let location = Path::from(key.clone());

        let result: ObjectResult<_> = self.store.get(&location).await;
        let result = result.map_err(|e| Self::classify(e, &key))?;

        result
            .bytes()
            .await
            .map_err(|e| StorageError::ReadFailed(e.to_string()))
    }

    async fn delete(&self, name: &str, destination_path: &str) -> StorageResult<()> {
        let key = storage_key(destination_path, name)?;
        let location = Path::from(key.clone());

        match self.store.delete(&location).await {
            Ok(()) | Err(ObjectStoreError::NotFound { .. }) => Ok(()),
            Err(e) => Err(Self::classify(e, &key)),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Remote
    }
}
