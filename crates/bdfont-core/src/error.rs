//! Error types for bdfont

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BdfError>;

/// Main error type for bdfont
#[derive(Debug, Error)]
pub enum BdfError {
    #[error("Malformed font: {0}")]
    MalformedFont(#[from] MalformedFontError),

    #[error("Glyph geometry error: {0}")]
    GlyphGeometry(#[from] GeometryError),

    #[error("No glyphs available: the font defines no glyphs to fall back on")]
    NoGlyphsAvailable,

    #[error("Export failed: {0}")]
    ExportFailed(#[from] ExportError),

    #[error("Font file not found: {0}")]
    FontNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

/// Structural problems found while parsing BDF text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedFontError {
    #[error("input is empty")]
    EmptyInput,

    #[error("unterminated sections at end of input: {}", open.join(", "))]
    UnbalancedSections { open: Vec<String> },

    #[error("line {line}: {found} does not close an open {expected} section")]
    UnexpectedSectionEnd {
        line: usize,
        found: String,
        expected: &'static str,
    },

    #[error("line {line}: {keyword} is missing value #{index}")]
    MissingToken {
        line: usize,
        keyword: String,
        index: usize,
    },

    #[error("line {line}: invalid number {value:?}")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: invalid hex row {value:?}")]
    InvalidHex { line: usize, value: String },

    #[error("line {line}: bitmap row has {found} bytes, expected {expected}")]
    ShortBitmapRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: {keyword} outside of a STARTCHAR section")]
    OutsideGlyph { line: usize, keyword: String },

    #[error("glyph {glyph:?} has no ENCODING")]
    MissingEncoding { glyph: String },

    #[error("line {line}: BITMAP in glyph {glyph:?} before its BBX")]
    MissingBoundingBox { line: usize, glyph: String },
}

/// A glyph's metrics disagree with its data or with the canvas
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("glyph {glyph:?} declares {expected} bitmap rows but only {found} follow")]
    MissingBitmapRows {
        glyph: String,
        expected: usize,
        found: usize,
    },

    #[error("glyph {glyph:?} writes row {row}, outside canvas height {height}")]
    RowOutOfBounds { glyph: String, row: i64, height: usize },

    #[error("glyph {glyph:?} writes column {column}, outside canvas width {width}")]
    ColumnOutOfBounds {
        glyph: String,
        column: i64,
        width: usize,
    },
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Bitmap is empty ({width}x{height})")]
    EmptyBitmap { width: usize, height: usize },
}
