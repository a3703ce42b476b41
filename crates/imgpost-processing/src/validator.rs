use crate::upload::UploadRequest;
use imgpost_core::{UploadError, UploadResult};

/// Upload input validator
///
/// Checks, in order: payload present, payload non-empty, size limit (when
/// configured), declared content type names an image. The first failing
/// check decides the error.
#[derive(Debug, Clone, Default)]
pub struct UploadValidator {
    max_file_size: Option<usize>,
}

impl UploadValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_file_size(max_file_size: usize) -> Self {
        Self {
            max_file_size: Some(max_file_size),
        }
    }

    pub fn validate<K>(&self, request: &UploadRequest<K>) -> UploadResult<()> {
        let data = request.data.as_ref().ok_or(UploadError::Missing)?;

        if data.is_empty() {
            return Err(UploadError::Empty);
        }

        if let Some(max) = self.max_file_size {
            if data.len() > max {
                return Err(UploadError::PayloadTooLarge {
                    size: data.len(),
                    max,
                });
            }
        }

        if !Self::is_image_content_type(&request.content_type) {
            return Err(UploadError::WrongType {
                content_type: request.content_type.clone(),
            });
        }

        Ok(())
    }

    /// Permissive class check: any declared type mentioning "image".
    pub fn is_image_content_type(content_type: &str) -> bool {
        content_type.to_ascii_lowercase().contains("image")
    }
}
