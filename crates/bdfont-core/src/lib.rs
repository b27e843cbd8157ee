//! bdfont core: the font model and the contracts around it
//!
//! A BDF file travels through three stages:
//!
//! 1. **Parsing** - BDF text becomes a [`Font`] (`bdfont-parse`)
//! 2. **Compositing** - a string and a [`Font`] become a [`Bitmap`] (`bdfont-render`)
//! 3. **Export** - a [`Bitmap`] becomes PBM, PNG, text or JSON (`bdfont-export`)
//!
//! This crate owns the types that flow between the stages, the error
//! types every stage reports with, and the [`Renderer`] / [`Exporter`]
//! traits that let stages be swapped.
//!
//! ```
//! use bdfont_core::{Bitmap, CompositeOptions, GeometryPolicy};
//!
//! let options = CompositeOptions {
//!     repeat_count: 2,
//!     geometry: GeometryPolicy::Clip,
//!     ..Default::default()
//! };
//! assert_eq!(options.passes(), 3);
//!
//! let canvas = Bitmap::new(8);
//! assert_eq!((canvas.width(), canvas.height()), (0, 8));
//! ```

pub mod bitmap;
pub mod config;
pub mod error;
pub mod font;
pub mod traits;

use std::str::FromStr;

pub use bitmap::Bitmap;
pub use error::{BdfError, Result};
pub use font::{BoundingBox, Encoding, Font, FontSize, Glyph, GlyphTable, Properties, Width};
pub use traits::{Exporter, Renderer};

/// What to do when a glyph's cells land outside the canvas
///
/// Happens with corrupt metrics: a glyph taller than the font box, or a
/// cursor pushed left of column 0 by negative kerning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GeometryPolicy {
    /// Fail with [`error::GeometryError`]
    Strict = 0,
    /// Drop the cells that fall outside and keep going
    Clip = 1,
}

impl GeometryPolicy {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Clip,
            _ => Self::Strict,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Clip => "clip",
        }
    }
}

impl FromStr for GeometryPolicy {
    type Err = BdfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "clip" => Ok(Self::Clip),
            other => Err(BdfError::Other(format!("unknown geometry policy: {other}"))),
        }
    }
}

/// How text should be laid onto the canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeOptions {
    /// Extra passes over the same text; the output holds `1 + repeat_count` copies
    pub repeat_count: u32,
    /// Pixels added to every advance, may be negative
    pub kerning_bias: i32,
    pub geometry: GeometryPolicy,
}

impl CompositeOptions {
    /// Total passes over the text
    pub fn passes(&self) -> u64 {
        u64::from(self.repeat_count) + 1
    }
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            repeat_count: 0,
            kerning_bias: 0,
            geometry: config::default_geometry(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_policy_parse() {
        assert_eq!("strict".parse::<GeometryPolicy>().ok(), Some(GeometryPolicy::Strict));
        assert_eq!(" CLIP ".parse::<GeometryPolicy>().ok(), Some(GeometryPolicy::Clip));
        assert!("wrap".parse::<GeometryPolicy>().is_err());
    }

    #[test]
    fn test_geometry_policy_round_trips_through_u8() {
        for policy in [GeometryPolicy::Strict, GeometryPolicy::Clip] {
            assert_eq!(GeometryPolicy::from_u8(policy as u8), policy);
        }
    }

    #[test]
    fn test_passes_counts_first_run() {
        let options = CompositeOptions {
            repeat_count: 0,
            kerning_bias: 0,
            geometry: GeometryPolicy::Strict,
        };
        assert_eq!(options.passes(), 1);
    }
}
