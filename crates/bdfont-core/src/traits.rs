//! The seams between parsing, compositing and export
//!
//! - [`Renderer`] - where text and a font become a [`Bitmap`]
//! - [`Exporter`] - where a [`Bitmap`] becomes file bytes

use crate::{error::Result, Bitmap, CompositeOptions, Font};

/// Turns a string into pixels using a parsed font
///
/// ```ignore
/// struct Blank;
///
/// impl Renderer for Blank {
///     fn name(&self) -> &'static str {
///         "blank"
///     }
///
///     fn render(&self, font: &Font, _text: &str, _options: &CompositeOptions) -> Result<Bitmap> {
///         Ok(Bitmap::new(font.bounding_box.height as usize))
///     }
/// }
/// ```
pub trait Renderer: Send + Sync {
    /// Used in logs and error messages
    fn name(&self) -> &'static str;

    /// Composite `text` onto a fresh canvas
    fn render(&self, font: &Font, text: &str, options: &CompositeOptions) -> Result<Bitmap>;
}

/// Encodes a finished bitmap into a file format
pub trait Exporter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Encode the bitmap as bytes
    fn export(&self, bitmap: &Bitmap) -> Result<Vec<u8>>;

    /// File extension without the dot
    fn extension(&self) -> &'static str;

    fn mime_type(&self) -> &'static str;
}
