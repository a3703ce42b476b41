//! Image kinds accepted by the upload endpoint and their transformations.

use std::fmt;
use std::str::FromStr;

use imgpost_core::{Config, ImageKind};
use imgpost_processing::{
    FitWithin, ImageTransformer, OutputFormat, QualityPreset, SquareCrop,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageType {
    Avatar,
    Preview,
    PostImage,
}

impl ImageKind for ImageType {
    fn destination_path(&self) -> &'static str {
        match self {
            ImageType::Avatar => "images/avatars",
            ImageType::Preview => "images/previews",
            ImageType::PostImage => "images",
        }
    }
}

impl FromStr for ImageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "avatar" => Ok(ImageType::Avatar),
            "preview" => Ok(ImageType::Preview),
            "postimage" | "post_image" | "post-image" => Ok(ImageType::PostImage),
            _ => Err(format!(
                "Unknown image type '{}' (expected avatar, preview or postImage)",
                s
            )),
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageType::Avatar => write!(f, "avatar"),
            ImageType::Preview => write!(f, "preview"),
            ImageType::PostImage => write!(f, "postImage"),
        }
    }
}

/// Build the transformer for the configured output.
///
/// Avatars are center-cropped squares, previews are bounded, post images only
/// go through the default recompression.
pub fn build_transformer(config: &Config) -> anyhow::Result<ImageTransformer<ImageType>> {
    let format = OutputFormat::parse(&config.output_format)?;
    let quality = QualityPreset::parse(&config.image_quality)?;

    let transformer = ImageTransformer::builder(format, quality)
        .register(ImageType::Avatar, SquareCrop::new(Some(config.avatar_size)))?
        .register(
            ImageType::Preview,
            FitWithin::new(config.preview_max_width, config.preview_max_height),
        )?
        .build();

    Ok(transformer)
}
