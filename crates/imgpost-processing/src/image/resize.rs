use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Select appropriate filter type based on resize ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> FilterType {
        let width_ratio = orig_width as f32 / new_width.max(1) as f32;
        let height_ratio = orig_height as f32 / new_height.max(1) as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            FilterType::Triangle
        } else if max_ratio > 1.5 {
            FilterType::CatmullRom
        } else {
            FilterType::Lanczos3
        }
    }

    /// Largest size with the original aspect ratio that fits the bounding box.
    /// Never larger than the original.
    pub fn fit_within_dimensions(
        orig_width: u32,
        orig_height: u32,
        max_width: u32,
        max_height: u32,
    ) -> (u32, u32) {
        if orig_width <= max_width && orig_height <= max_height {
            return (orig_width, orig_height);
        }

        let scale = (max_width as f64 / orig_width as f64).min(max_height as f64 / orig_height as f64);
        let width = ((orig_width as f64 * scale).round() as u32).clamp(1, max_width.max(1));
        let height = ((orig_height as f64 * scale).round() as u32).clamp(1, max_height.max(1));
        (width, height)
    }

    /// Resize image to exact dimensions
    pub fn resize_image(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let filter = Self::select_filter(orig_width, orig_height, width, height);
        img.resize_exact(width, height, filter)
    }

    /// Centered square region with side `min(width, height)`.
    pub fn center_square(img: &DynamicImage) -> DynamicImage {
        let (width, height) = img.dimensions();
        let side = width.min(height);
        let x = (width - side) / 2;
        let y = (height - side) / 2;
        img.crop_imm(x, y, side, side)
    }
}
