use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage};

use crate::error::{GlyphError, Result};

/// A decoded input image, one or three channels.
///
/// Alpha is discarded on construction; the pipeline never sees it. The image
/// is immutable once built.
#[derive(Debug, Clone)]
pub struct RasterImage {
    inner: DynamicImage,
}

impl RasterImage {
    /// Decodes PNG/JPEG/BMP/GIF bytes.
    pub fn decode(bytes: &[u8]) -> Result<RasterImage> {
        if bytes.is_empty() {
            return Err(GlyphError::InputDecode {
                message: "empty upload".to_string(),
                source: None,
            });
        }
        let img = image::load_from_memory(bytes)
            .map_err(|e| GlyphError::decode(format!("{} bytes", bytes.len()), e))?;
        Ok(RasterImage::from_dynamic(img))
    }

    /// Reads and decodes an image file.
    pub fn open(path: &Path) -> Result<RasterImage> {
        let img = image::open(path)
            .map_err(|e| GlyphError::decode(path.display().to_string(), e))?;
        Ok(RasterImage::from_dynamic(img))
    }

    /// Normalizes any decoded image to 8-bit gray or 8-bit RGB.
    pub fn from_dynamic(img: DynamicImage) -> RasterImage {
        let color = img.color();
        let inner = if color.has_color() {
            DynamicImage::ImageRgb8(img.to_rgb8())
        } else {
            DynamicImage::ImageLuma8(img.to_luma8())
        };
        RasterImage { inner }
    }

    pub fn from_gray(img: GrayImage) -> RasterImage {
        RasterImage { inner: DynamicImage::ImageLuma8(img) }
    }

    pub fn from_rgb(img: RgbImage) -> RasterImage {
        RasterImage { inner: DynamicImage::ImageRgb8(img) }
    }

    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// 1 for gray sources, 3 for color sources.
    pub fn channels(&self) -> u8 {
        self.inner.color().channel_count()
    }

    /// Single-channel intensity view.
    pub fn to_luma(&self) -> GrayImage {
        match &self.inner {
            DynamicImage::ImageLuma8(gray) => gray.clone(),
            other => other.to_luma8(),
        }
    }
}
