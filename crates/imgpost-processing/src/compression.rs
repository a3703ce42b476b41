use anyhow::{anyhow, Result};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, GenericImageView, ImageFormat};

/// Quality presets for lossy output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityPreset {
    #[default]
    Normal, // Balanced size and quality
    Better,
    Best,
    Lighter,
    Lightest, // Maximum compression
}

impl QualityPreset {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(QualityPreset::Normal),
            "better" => Ok(QualityPreset::Better),
            "best" => Ok(QualityPreset::Best),
            "lighter" => Ok(QualityPreset::Lighter),
            "lightest" => Ok(QualityPreset::Lightest),
            _ => Err(anyhow!("Invalid quality preset: {}", s)),
        }
    }

    /// Get quality value for JPEG (0-100)
    pub fn jpeg_quality(self) -> u8 {
        match self {
            QualityPreset::Normal => 75,
            QualityPreset::Better => 85,
            QualityPreset::Best => 95,
            QualityPreset::Lighter => 65,
            QualityPreset::Lightest => 50,
        }
    }

    /// Get quality value for WebP (0-100)
    pub fn webp_quality(self) -> f32 {
        match self {
            QualityPreset::Normal => 80.0,
            QualityPreset::Better => 90.0,
            QualityPreset::Best => 98.0,
            QualityPreset::Lighter => 70.0,
            QualityPreset::Lightest => 55.0,
        }
    }
}

/// Encoding of every stored artifact. Fixed per transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
    WebP,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "webp" => Ok(OutputFormat::WebP),
            _ => Err(anyhow!("Invalid format: {}", s)),
        }
    }

    /// File extension used for generated names
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        }
    }

    pub fn to_image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::WebP => ImageFormat::WebP,
        }
    }
}

/// Encoder and compression pass for processed images
pub struct ImageCompressor;

impl ImageCompressor {
    /// Encode `img` in `format`, applying the format's compression settings.
    pub fn compress(img: &DynamicImage, format: OutputFormat, quality: QualityPreset) -> Result<Vec<u8>> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(anyhow!("Cannot encode an image with zero dimensions"));
        }

        let data = match format {
            OutputFormat::Jpeg => Self::compress_jpeg(img, quality)?,
            OutputFormat::Png => Self::compress_png(img)?,
            OutputFormat::WebP => Self::compress_webp(img, quality),
        };

        tracing::debug!(
            format = ?format,
            quality = ?quality,
            width = width,
            height = height,
            size_bytes = data.len(),
            "Image compressed"
        );

        Ok(data)
    }

    /// Compress to JPEG using mozjpeg (optimized Huffman tables, progressive scans)
    fn compress_jpeg(img: &DynamicImage, quality: QualityPreset) -> Result<Vec<u8>> {
        let rgb_img = img.to_rgb8();
        let (width, height) = rgb_img.dimensions();

        let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
        comp.set_size(width as usize, height as usize);
        comp.set_quality(quality.jpeg_quality() as f32);
        comp.set_progressive_mode();
        comp.set_optimize_coding(true);

        let mut comp = comp.start_compress(Vec::new())?;
        comp.write_scanlines(&rgb_img)?;
        let jpeg_data = comp.finish()?;

        Ok(jpeg_data)
    }

    /// Compress to PNG. Lossless, so the decoded pixels are preserved exactly.
    fn compress_png(img: &DynamicImage) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let encoder = PngEncoder::new_with_quality(
            &mut buffer,
            CompressionType::Best,
            FilterType::Adaptive,
        );
        img.write_with_encoder(encoder)?;

        Ok(buffer)
    }

    fn compress_webp(img: &DynamicImage, quality: QualityPreset) -> Vec<u8> {
        let (width, height) = img.dimensions();
        let rgba_img = img.to_rgba8();

        let encoder = webp::Encoder::from_rgba(&rgba_img, width, height);
        encoder.encode(quality.webp_quality()).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn solid(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255])))
    }

    #[test]
    fn test_quality_preset_parse() {
        assert_eq!(QualityPreset::parse("normal").unwrap(), QualityPreset::Normal);
        assert_eq!(QualityPreset::parse("Better").unwrap(), QualityPreset::Better);
        assert_eq!(QualityPreset::parse("BEST").unwrap(), QualityPreset::Best);
        assert_eq!(QualityPreset::parse("lighter").unwrap(), QualityPreset::Lighter);
        assert_eq!(QualityPreset::parse("lightest").unwrap(), QualityPreset::Lightest);
        assert!(QualityPreset::parse("invalid").is_err());
    }

    #[test]
    fn test_quality_values() {
        assert_eq!(QualityPreset::Normal.jpeg_quality(), 75);
        assert_eq!(QualityPreset::Best.jpeg_quality(), 95);
        assert_eq!(QualityPreset::Lightest.jpeg_quality(), 50);
        assert_eq!(QualityPreset::Better.webp_quality(), 90.0);
        assert_eq!(QualityPreset::Lighter.webp_quality(), 70.0);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("jpeg").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::parse("JPG").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::parse("png").unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::parse("webp").unwrap(), OutputFormat::WebP);
        assert!(OutputFormat::parse("avif").is_err());
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::WebP.extension(), "webp");
        assert_eq!(OutputFormat::WebP.to_image_format(), ImageFormat::WebP);
    }

    #[test]
    fn test_compress_each_format_is_decodable() {
        let img = solid(40, 30);

        for format in [OutputFormat::Jpeg, OutputFormat::Png, OutputFormat::WebP] {
            let data = ImageCompressor::compress(&img, format, QualityPreset::Normal).unwrap();
            assert!(!data.is_empty());

            let guessed = image::guess_format(&data).unwrap();
            assert_eq!(guessed, format.to_image_format());

            let decoded = image::load_from_memory(&data).unwrap();
            assert_eq!(decoded.dimensions(), (40, 30));
        }
    }

    #[test]
    fn test_png_is_lossless() {
        let mut img = RgbaImage::new(8, 8);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 30) as u8, (y * 30) as u8, 7, 255]);
        }
        let img = DynamicImage::ImageRgba8(img);

        let data = ImageCompressor::compress(&img, OutputFormat::Png, QualityPreset::Lightest).unwrap();
        let decoded = image::load_from_memory(&data).unwrap();
        assert_eq!(decoded.to_rgba8(), img.to_rgba8());
    }

    #[test]
    fn test_zero_sized_image_rejected() {
        let img = DynamicImage::new_rgb8(0, 0);
        assert!(ImageCompressor::compress(&img, OutputFormat::Jpeg, QualityPreset::Normal).is_err());
    }
}
