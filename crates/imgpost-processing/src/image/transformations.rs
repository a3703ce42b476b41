//! Built-in transformations

use crate::image::resize::ImageResize;
use crate::image::transformer::{ImageOutput, Transformation};
use image::{DynamicImage, GenericImageView};

/// Re-encode in the output format with no geometric change.
#[derive(Debug, Clone, Copy, Default)]
pub struct Recompress;

impl Transformation for Recompress {
    fn apply(&self, image: DynamicImage, output: &mut ImageOutput) -> anyhow::Result<()> {
        output.encode(&image)
    }

    fn name(&self) -> &str {
        "recompress"
    }
}

/// Center crop to a square, then optionally downscale to `max_side`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquareCrop {
    pub max_side: Option<u32>,
}

impl SquareCrop {
    pub fn new(max_side: Option<u32>) -> Self {
        Self { max_side }
    }
}

impl Transformation for SquareCrop {
    fn apply(&self, image: DynamicImage, output: &mut ImageOutput) -> anyhow::Result<()> {
        let mut square = ImageResize::center_square(&image);
        drop(image);

        if let Some(max_side) = self.max_side.filter(|&side| side > 0) {
            let (side, _) = square.dimensions();
            if side > max_side {
                square = ImageResize::resize_image(&square, max_side, max_side);
            }
        }

        output.encode(&square)
    }

    fn name(&self) -> &str {
        "square_crop"
    }
}

/// Downscale to fit `max_width` x `max_height`, keeping the aspect ratio.
/// Smaller images pass through unscaled.
#[derive(Debug, Clone, Copy)]
pub struct FitWithin {
    pub max_width: u32,
    pub max_height: u32,
}

impl FitWithin {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }
}

impl Transformation for FitWithin {
    fn apply(&self, image: DynamicImage, output: &mut ImageOutput) -> anyhow::Result<()> {
        let (width, height) = image.dimensions();
        let (target_width, target_height) =
            ImageResize::fit_within_dimensions(width, height, self.max_width, self.max_height);

        if (target_width, target_height) == (width, height) {
            return output.encode(&image);
        }

        tracing::debug!(
            from_width = width,
            from_height = height,
            to_width = target_width,
            to_height = target_height,
            "Downscaling to fit"
        );
        output.encode(&ImageResize::resize_image(&image, target_width, target_height))
    }

    fn name(&self) -> &str {
        "fit_within"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::{OutputFormat, QualityPreset};

    fn run(transformation: &dyn Transformation, image: DynamicImage) -> DynamicImage {
        let mut output = ImageOutput::new(OutputFormat::Png, QualityPreset::Normal);
        transformation.apply(image, &mut output).unwrap();
        image::load_from_memory(&output.into_bytes()).unwrap()
    }

    #[test]
    fn test_recompress_keeps_dimensions() {
        let result = run(&Recompress, DynamicImage::new_rgb8(37, 21));
        assert_eq!(result.dimensions(), (37, 21));
    }

    #[test]
    fn test_square_crop() {
        let result = run(&SquareCrop::new(None), DynamicImage::new_rgb8(90, 60));
        assert_eq!(result.dimensions(), (60, 60));

        let result = run(&SquareCrop::new(Some(32)), DynamicImage::new_rgb8(90, 60));
        assert_eq!(result.dimensions(), (32, 32));

        // small sources are not upscaled
        let result = run(&SquareCrop::new(Some(256)), DynamicImage::new_rgb8(20, 40));
        assert_eq!(result.dimensions(), (20, 20));
    }

    #[test]
    fn test_fit_within() {
        let result = run(&FitWithin::new(64, 48), DynamicImage::new_rgb8(128, 128));
        assert_eq!(result.dimensions(), (48, 48));

        let result = run(&FitWithin::new(64, 48), DynamicImage::new_rgb8(10, 5));
        assert_eq!(result.dimensions(), (10, 5));
    }
}
