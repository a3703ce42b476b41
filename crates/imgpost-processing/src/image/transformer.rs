//! Image transformer - per-kind transformation registry
//!
//! An `ImageTransformer<K>` maps each image kind to the transformation that
//! produces its stored artifact. Kinds without a registration go through the
//! default transformation, so every decodable source yields an artifact.
//!
//! The registry is assembled once with [`ImageTransformerBuilder`] and is
//! read-only afterwards; share it through an `Arc`.

use crate::compression::{ImageCompressor, OutputFormat, QualityPreset};
use crate::image::transformations::Recompress;
use bytes::Bytes;
use image::{DynamicImage, ImageReader};
use imgpost_core::{ImageKind, UploadError, UploadResult};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;

/// Produces the stored artifact for one image kind.
///
/// The transformation receives the decoded source and must encode its result
/// into `output`, usually with [`ImageOutput::encode`].
pub trait Transformation: Send + Sync {
    fn apply(&self, image: DynamicImage, output: &mut ImageOutput) -> anyhow::Result<()>;

    /// Name used in logs
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Transformation for F
where
    F: Fn(DynamicImage, &mut ImageOutput) -> anyhow::Result<()> + Send + Sync,
{
    fn apply(&self, image: DynamicImage, output: &mut ImageOutput) -> anyhow::Result<()> {
        self(image, output)
    }
}

/// Destination buffer handed to a transformation.
pub struct ImageOutput {
    format: OutputFormat,
    quality: QualityPreset,
    buffer: Vec<u8>,
}

impl ImageOutput {
    pub fn new(format: OutputFormat, quality: QualityPreset) -> Self {
        Self {
            format,
            quality,
            buffer: Vec::new(),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn quality(&self) -> QualityPreset {
        self.quality
    }

    /// Encode `image` with the configured format and quality, replacing
    /// anything written so far.
    pub fn encode(&mut self, image: &DynamicImage) -> anyhow::Result<()> {
        self.buffer = ImageCompressor::compress(image, self.format, self.quality)?;
        Ok(())
    }

    /// Raw access for transformations that run their own encoder.
    pub fn writer(&mut self) -> &mut Vec<u8> {
        &mut self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.buffer)
    }
}

/// Result of a successful transformation
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub data: Bytes,
    pub format: OutputFormat,
    /// No transformation was registered for the kind.
    pub used_default: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Transformation already registered for kind {0}")]
    Duplicate(String),
}

/// Builder for [`ImageTransformer`]
pub struct ImageTransformerBuilder<K> {
    output_format: OutputFormat,
    quality: QualityPreset,
    transformations: HashMap<K, Box<dyn Transformation>>,
    default: Box<dyn Transformation>,
}

impl<K: ImageKind> ImageTransformerBuilder<K> {
    pub fn new(output_format: OutputFormat, quality: QualityPreset) -> Self {
        Self {
            output_format,
            quality,
            transformations: HashMap::new(),
            default: Box::new(Recompress),
        }
    }

    /// Register the transformation for `kind`. Each kind can be registered once.
    pub fn register<T>(mut self, kind: K, transformation: T) -> Result<Self, RegistrationError>
    where
        T: Transformation + 'static,
    {
        match self.transformations.entry(kind) {
            Entry::Occupied(_) => Err(RegistrationError::Duplicate(format!("{:?}", kind))),
            Entry::Vacant(slot) => {
                slot.insert(Box::new(transformation));
                Ok(self)
            }
        }
    }

    /// Replace the fallback used for unregistered kinds.
    pub fn with_default<T>(mut self, transformation: T) -> Self
    where
        T: Transformation + 'static,
    {
        self.default = Box::new(transformation);
        self
    }

    pub fn build(self) -> ImageTransformer<K> {
        ImageTransformer {
            output_format: self.output_format,
            quality: self.quality,
            transformations: self.transformations,
            default: self.default,
        }
    }
}

pub struct ImageTransformer<K> {
    output_format: OutputFormat,
    quality: QualityPreset,
    transformations: HashMap<K, Box<dyn Transformation>>,
    default: Box<dyn Transformation>,
}

impl<K: ImageKind> fmt::Debug for ImageTransformer<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageTransformer")
            .field("output_format", &self.output_format)
            .field("quality", &self.quality)
            .field("kinds", &self.transformations.keys().collect::<Vec<_>>())
            .field("default", &self.default.name())
            .finish()
    }
}

impl<K: ImageKind> ImageTransformer<K> {
    pub fn builder(output_format: OutputFormat, quality: QualityPreset) -> ImageTransformerBuilder<K> {
        ImageTransformerBuilder::new(output_format, quality)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn quality(&self) -> QualityPreset {
        self.quality
    }

    pub fn has_transformation(&self, kind: K) -> bool {
        self.transformations.contains_key(&kind)
    }

    /// Decode `source` and run the transformation registered for `kind`,
    /// or the default one. CPU bound; call from a blocking context.
    pub fn transform(&self, source: &[u8], kind: K) -> UploadResult<ProcessedImage> {
        let image = ImageReader::new(Cursor::new(source))
            .with_guessed_format()
            .map_err(|e| UploadError::DecodeFailure(e.to_string()))?
            .decode()
            .map_err(|e| UploadError::DecodeFailure(e.to_string()))?;

        let (transformation, used_default) = match self.transformations.get(&kind) {
            Some(registered) => (registered.as_ref(), false),
            None => (self.default.as_ref(), true),
        };

        tracing::debug!(
            kind = ?kind,
            transformation = transformation.name(),
            used_default = used_default,
            width = image.width(),
            height = image.height(),
            "Applying transformation"
        );

        let mut output = ImageOutput::new(self.output_format, self.quality);
        transformation.apply(image, &mut output).map_err(|e| {
            UploadError::DecodeFailure(format!("{} transformation failed: {}", transformation.name(), e))
        })?;

        tracing::debug!(
            kind = ?kind,
            transformation = transformation.name(),
            size_bytes = output.len(),
            "Transformation applied"
        );

        if output.is_empty() {
            return Err(UploadError::DecodeFailure(format!(
                "{} transformation produced no output",
                transformation.name()
            )));
        }

        Ok(ProcessedImage {
            data: output.into_bytes(),
            format: self.output_format,
            used_default,
        })
    }
}
