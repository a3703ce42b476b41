//! Image processing module
//!
//! - Per-kind transformation registry with a default fallback (transformer)
//! - Built-in geometric transformations (transformations, resize)

pub mod resize;
pub mod transformations;
pub mod transformer;

pub use resize::ImageResize;
pub use transformations::{FitWithin, Recompress, SquareCrop};
pub use transformer::{
    ImageOutput, ImageTransformer, ImageTransformerBuilder, ProcessedImage, RegistrationError,
    Transformation,
};
