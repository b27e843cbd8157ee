//! Plain-text export: one line per bitmap row

use bdfont_core::{error::Result, traits::Exporter, Bitmap};

/// Draws the bitmap with one character per cell
///
/// Handy for terminals, test fixtures and `info --glyph`.
pub struct TextExporter {
    ink: char,
    blank: char,
}

impl TextExporter {
    /// `#` for ink, `.` for blank cells
    pub fn new() -> Self {
        Self::with_chars('#', '.')
    }

    pub fn with_chars(ink: char, blank: char) -> Self {
        Self { ink, blank }
    }

    /// Rows as strings, without trailing newlines
    pub fn lines(&self, bitmap: &Bitmap) -> Vec<String> {
        bitmap
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&bit| if bit { self.ink } else { self.blank })
                    .collect()
            })
            .collect()
    }
}

impl Default for TextExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for TextExporter {
    fn name(&self) -> &'static str {
        "txt"
    }

    fn export(&self, bitmap: &Bitmap) -> Result<Vec<u8>> {
        let mut out = String::new();
        for line in self.lines(bitmap) {
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn mime_type(&self) -> &'static str {
        "text/plain"
    }
}
