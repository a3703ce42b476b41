//! imgpost Processing Library
//!
//! Upload validation, per-kind image transformation, compression, and the
//! upload pipeline that ties them to a storage sink.

pub mod compression;
pub mod image;
pub mod upload;
pub mod validator;

pub use compression::{ImageCompressor, OutputFormat, QualityPreset};
pub use self::image::{
    FitWithin, ImageOutput, ImageTransformer, ImageTransformerBuilder, ProcessedImage, Recompress,
    RegistrationError, SquareCrop, Transformation,
};
pub use upload::{StoredArtifact, UploadPipeline, UploadReceipt, UploadRequest, UploadStage};
pub use validator::UploadValidator;
