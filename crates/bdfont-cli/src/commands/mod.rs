//! Command implementations for the bdfont CLI

pub mod batch;
pub mod info;
pub mod render;

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use bdfont::error::Result;
use bdfont::{CompositeOptions, Font};

use crate::cli::LayoutArgs;

/// Load the font, announcing it unless quiet
pub(crate) fn load_font(path: &Path, quiet: bool) -> Result<Font> {
    let font = bdfont::load(path)?;
    if !quiet {
        eprintln!("Font: {} ({} glyphs)", font.name, font.glyphs.len());
    }
    Ok(font)
}

/// Compositor options from the shared layout flags
pub(crate) fn composite_options(layout: &LayoutArgs, repeat_count: u32) -> CompositeOptions {
    let mut options = CompositeOptions {
        repeat_count,
        kerning_bias: layout.kerning,
        ..Default::default()
    };
    if let Some(geometry) = layout.geometry {
        options.geometry = geometry.into();
    }
    options
}

/// Write to a file, or to stdout when no path is given
pub(crate) fn write_output(data: &[u8], path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(data)?;
        },
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
        },
    }
    Ok(())
}
