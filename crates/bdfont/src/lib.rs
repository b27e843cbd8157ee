//! bdfont - BDF bitmap fonts in, text bitmaps out
//!
//! bdfont reads Glyph Bitmap Distribution Format fonts and lays strings out
//! with them:
//! 1. Reading the font file ([`read`], [`load`])
//! 2. Parsing BDF text into a [`Font`] ([`parse`])
//! 3. Compositing text into a 1-bit [`Bitmap`] ([`write_text`])
//! 4. Exporting the bitmap (PBM, PGM, PNG, text, JSON)
//!
//! # Example
//!
//! ```no_run
//! use bdfont::prelude::*;
//!
//! let font = bdfont::load("fonts/tiny.bdf")?;
//! let bitmap = bdfont::write_text(&font, "Hello", &CompositeOptions::default())?;
//! println!("{}x{}", bitmap.width(), bitmap.height());
//! # Ok::<(), BdfError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `export`: bitmap exporters (on by default)

use std::path::Path;

pub use bdfont_core::{
    config, error, traits, Bitmap, BoundingBox, CompositeOptions, Font, GeometryPolicy, Glyph,
};
pub use bdfont_parse::parse;
pub use bdfont_render::{composite_lines, glyph_for, measure, TextCompositor};

#[cfg(feature = "export")]
pub use bdfont_export as export;

use bdfont_core::error::{BdfError, Result};

/// Read a font file into a string
///
/// A path that does not exist is reported as [`BdfError::FontNotFound`];
/// other IO failures pass through as [`BdfError::Io`].
pub fn read(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => BdfError::FontNotFound(path.display().to_string()),
        _ => BdfError::Io(err),
    })
}

/// Read and parse a BDF file
pub fn load(path: impl AsRef<Path>) -> Result<Font> {
    let path = path.as_ref();
    let font = parse(&read(path)?)?;
    log::info!(
        "loaded {} ({} glyphs) from {}",
        font.name,
        font.glyphs.len(),
        path.display()
    );
    Ok(font)
}

/// Composite `text` with `font` into a fresh bitmap
pub fn write_text(font: &Font, text: &str, options: &CompositeOptions) -> Result<Bitmap> {
    bdfont_render::composite(font, text, options)
}

/// Every encoded character in the font, in the order the file defines them
pub fn all_characters(font: &Font) -> String {
    font.all_characters()
}

/// Common imports for typical usage
pub mod prelude {
    pub use bdfont_core::{
        error::{BdfError, Result},
        traits::{Exporter, Renderer},
        Bitmap, BoundingBox, CompositeOptions, Font, GeometryPolicy, Glyph,
    };
}
