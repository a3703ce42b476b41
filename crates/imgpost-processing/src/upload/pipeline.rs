//! Upload pipeline: validate → name → transform → store.
//!
//! Every invocation walks `Received → Validated → Named → Transformed →
//! Stored → Completed`, stopping at the first failing stage. A failed upload
//! never returns a name, and nothing is stored unless every earlier stage
//! succeeded.

use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use imgpost_core::{ImageKind, UploadError, UploadResult};
use imgpost_storage::StorageSink;

use super::types::{StoredArtifact, UploadReceipt, UploadRequest, UploadStage};
use crate::compression::OutputFormat;
use crate::image::ImageTransformer;
use crate::validator::UploadValidator;

pub struct UploadPipeline<K> {
    validator: UploadValidator,
    transformer: Arc<ImageTransformer<K>>,
    sink: Arc<dyn StorageSink>,
}

impl<K> Clone for UploadPipeline<K> {
    fn clone(&self) -> Self {
        Self {
            validator: self.validator.clone(),
            transformer: self.transformer.clone(),
            sink: self.sink.clone(),
        }
    }
}

impl<K: ImageKind> UploadPipeline<K> {
    pub fn new(
        validator: UploadValidator,
        transformer: Arc<ImageTransformer<K>>,
        sink: Arc<dyn StorageSink>,
    ) -> Self {
        Self {
            validator,
            transformer,
            sink,
        }
    }

    pub fn transformer(&self) -> &ImageTransformer<K> {
        &self.transformer
    }

    pub fn sink(&self) -> &Arc<dyn StorageSink> {
        &self.sink
    }

    /// Run one upload to completion.
    pub async fn upload(&self, request: UploadRequest<K>) -> UploadResult<UploadReceipt> {
        let kind = request.kind;
        let start = Instant::now();

        tracing::debug!(
            kind = ?kind,
            stage = %UploadStage::Received,
            size_bytes = request.len(),
            content_type = %request.content_type,
            "Upload received"
        );

        let result = self.run(request).await;
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

        match &result {
            Ok(receipt) => tracing::info!(
                kind = ?kind,
                stage = %UploadStage::Completed,
                file_name = %receipt.file_name,
                location = %receipt.location,
                duration_ms = duration_ms,
                "Upload completed"
            ),
            // The error itself is reported once, at the HTTP boundary.
            Err(e) => tracing::debug!(
                kind = ?kind,
                stage = %UploadStage::Failed(e.kind()),
                duration_ms = duration_ms,
                "Upload stopped"
            ),
        }

        result
    }

    async fn run(&self, request: UploadRequest<K>) -> UploadResult<UploadReceipt> {
        self.validator.validate(&request)?;

        let UploadRequest { data, kind, .. } = request;
        let source = data.ok_or(UploadError::Missing)?;
        tracing::debug!(kind = ?kind, stage = %UploadStage::Validated, "Upload validated");

        let generated_name = Self::generate_file_name(self.transformer.output_format());
        let destination_path = kind.destination_path();
        tracing::debug!(
            kind = ?kind,
            stage = %UploadStage::Named,
            file_name = %generated_name,
            destination_path = destination_path,
            "Upload named"
        );

        let transformer = self.transformer.clone();
        let transform_start = Instant::now();
        let processed = tokio::task::spawn_blocking(move || transformer.transform(&source, kind))
            .await
            .map_err(|e| UploadError::DecodeFailure(format!("Transformation task failed: {}", e)))??;
        tracing::debug!(
            kind = ?kind,
            stage = %UploadStage::Transformed,
            used_default = processed.used_default,
            size_bytes = processed.data.len(),
            duration_ms = transform_start.elapsed().as_secs_f64() * 1000.0,
            "Upload transformed"
        );

        let artifact = StoredArtifact {
            generated_name,
            destination_path,
            payload: processed.data,
        };
        let location = self
            .sink
            .store(
                artifact.payload,
                &artifact.generated_name,
                artifact.destination_path,
            )
            .await?;
        tracing::debug!(
            kind = ?kind,
            stage = %UploadStage::Stored,
            backend = %self.sink.backend_type(),
            "Upload stored"
        );

        Ok(UploadReceipt {
            file_name: artifact.generated_name,
            destination_path: artifact.destination_path.to_string(),
            location,
        })
    }

    /// `{uuid}.{ext}`; the extension follows the output format, never the upload.
    pub fn generate_file_name(format: OutputFormat) -> String {
        format!("{}.{}", Uuid::new_v4().simple(), format.extension())
    }
}
