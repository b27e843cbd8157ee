//! PNG export format
//!
//! Exports composited text to 8-bit grayscale PNG using the `image` crate.

use bdfont_core::{
    error::{ExportError, Result},
    traits::Exporter,
    Bitmap,
};
use image::{GrayImage, ImageEncoder, Luma};

const INK: u8 = 0;
const PAPER: u8 = 255;

/// Encode a bitmap as a grayscale PNG, black ink on white.
///
/// PNG has no zero-sized images, so an empty bitmap is an error.
pub fn encode_bitmap_to_png(bitmap: &Bitmap) -> Result<Vec<u8>> {
    if bitmap.is_empty() {
        return Err(ExportError::EmptyBitmap {
            width: bitmap.width(),
            height: bitmap.height(),
        }
        .into());
    }

    let width = u32::try_from(bitmap.width())
        .map_err(|_| ExportError::EncodingFailed("bitmap too wide for PNG".into()))?;
    let height = u32::try_from(bitmap.height())
        .map_err(|_| ExportError::EncodingFailed("bitmap too tall for PNG".into()))?;

    let img = GrayImage::from_fn(width, height, |x, y| {
        Luma([if bitmap.get(x as usize, y as usize) {
            INK
        } else {
            PAPER
        }])
    });

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );

    encoder
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::L8)
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(png_data)
}

/// PNG exporter for composited bitmaps
///
/// # Examples
///
/// ```
/// use bdfont_export::PngExporter;
/// let exporter = PngExporter::new();
/// ```
pub struct PngExporter;

impl PngExporter {
    /// Create a new PNG exporter
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn export(&self, bitmap: &Bitmap) -> Result<Vec<u8>> {
        encode_bitmap_to_png(bitmap)
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }
}

impl Default for PngExporter {
    fn default() -> Self {
        Self::new()
    }
}
