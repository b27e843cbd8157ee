//! Export module for bdfont
//!
//! This module provides exporters for composited bitmaps.

use std::io::Write;

use bdfont_core::{error::Result, traits::Exporter, Bitmap};

pub mod json;
pub mod png;
pub mod text;

pub use json::JsonExporter;
pub use png::PngExporter;
pub use text::TextExporter;

/// PNM (Portable Any Map) exporter for minimal bitmap output
pub struct PnmExporter {
    /// Which PNM format to use
    format: PnmFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PnmFormat {
    /// PBM - Portable Bitmap (1 is ink)
    Pbm,
    /// PGM - Portable Graymap (black ink on white)
    Pgm,
}

impl PnmExporter {
    /// Create a new PNM exporter
    pub fn new(format: PnmFormat) -> Self {
        Self { format }
    }

    /// Create a PBM (1-bit) exporter
    pub fn pbm() -> Self {
        Self::new(PnmFormat::Pbm)
    }

    /// Create a PGM (grayscale) exporter
    pub fn pgm() -> Self {
        Self::new(PnmFormat::Pgm)
    }

    fn export_bitmap(&self, bitmap: &Bitmap) -> Result<Vec<u8>> {
        let mut output = Vec::new();

        match self.format {
            PnmFormat::Pbm => {
                writeln!(&mut output, "P1")?; // ASCII format
                writeln!(&mut output, "{} {}", bitmap.width(), bitmap.height())?;

                for row in bitmap.rows() {
                    let cells: Vec<&str> = row.iter().map(|&bit| if bit { "1" } else { "0" }).collect();
                    writeln!(&mut output, "{}", cells.join(" "))?;
                }
            },
            PnmFormat::Pgm => {
                writeln!(&mut output, "P2")?; // ASCII format
                writeln!(&mut output, "{} {}", bitmap.width(), bitmap.height())?;
                writeln!(&mut output, "255")?; // Max gray value

                for row in bitmap.rows() {
                    let cells: Vec<&str> =
                        row.iter().map(|&bit| if bit { "0" } else { "255" }).collect();
                    writeln!(&mut output, "{}", cells.join(" "))?;
                }
            },
        }

        Ok(output)
    }
}

impl Exporter for PnmExporter {
    fn name(&self) -> &'static str {
        match self.format {
            PnmFormat::Pbm => "pbm",
            PnmFormat::Pgm => "pgm",
        }
    }

    fn export(&self, bitmap: &Bitmap) -> Result<Vec<u8>> {
        self.export_bitmap(bitmap)
    }

    fn extension(&self) -> &'static str {
        self.name()
    }

    fn mime_type(&self) -> &'static str {
        match self.format {
            PnmFormat::Pbm => "image/x-portable-bitmap",
            PnmFormat::Pgm => "image/x-portable-graymap",
        }
    }
}

impl Default for PnmExporter {
    fn default() -> Self {
        Self::pbm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Bitmap {
        Bitmap::from_rows(vec![vec![true, false, true], vec![false, true, false]]).unwrap()
    }

    #[test]
    fn test_pbm_export() {
        let exported = PnmExporter::pbm().export(&sample()).unwrap();
        let text = String::from_utf8(exported).unwrap();
        assert_eq!(text, "P1\n3 2\n1 0 1\n0 1 0\n");
    }

    #[test]
    fn test_pgm_export() {
        let exported = PnmExporter::pgm().export(&sample()).unwrap();
        let text = String::from_utf8(exported).unwrap();
        assert!(text.starts_with("P2\n3 2\n255\n"));
        assert!(text.ends_with("255 0 255\n"));
    }

    #[test]
    fn test_empty_bitmap_still_has_header() {
        let exported = PnmExporter::pbm().export(&Bitmap::new(2)).unwrap();
        assert_eq!(String::from_utf8(exported).unwrap(), "P1\n0 2\n\n\n");
    }

    #[test]
    fn test_extension_and_mime() {
        let pbm = PnmExporter::default();
        assert_eq!(pbm.extension(), "pbm");
        assert_eq!(pbm.mime_type(), "image/x-portable-bitmap");

        let pgm = PnmExporter::pgm();
        assert_eq!(pgm.extension(), "pgm");
        assert_eq!(pgm.mime_type(), "image/x-portable-graymap");
    }
}
