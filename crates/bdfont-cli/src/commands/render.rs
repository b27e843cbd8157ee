//! Render command implementation
//!
//! Composites one string and writes it in the requested format.

use std::fs;
use std::io::{self, Read};

use bdfont::error::Result;

use super::{composite_options, load_font, write_output};
use crate::cli::RenderArgs;

pub fn run(args: &RenderArgs) -> Result<()> {
    let text = get_input_text(args)?;

    if !args.quiet {
        eprintln!("bdfont v{}", env!("CARGO_PKG_VERSION"));
    }

    let font = load_font(&args.font_file, args.quiet)?;
    let options = composite_options(&args.layout, args.repeat);
    log::debug!("render options: {options:?}");

    let bitmap = bdfont::write_text(&font, &text, &options)?;
    if args.verbose {
        eprintln!(
            "Composited {} chars into {}x{}",
            text.chars().count(),
            bitmap.width(),
            bitmap.height()
        );
    }

    let exporter = args.format.exporter();
    let data = exporter.export(&bitmap)?;
    write_output(&data, args.output_file.as_deref())?;

    if !args.quiet {
        if let Some(path) = &args.output_file {
            eprintln!("Wrote {} ({})", path.display(), exporter.mime_type());
        }
    }

    Ok(())
}

fn get_input_text(args: &RenderArgs) -> Result<String> {
    // Priority: text positional > --text > --text-file > stdin
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    if let Some(text) = &args.text_arg {
        return Ok(text.clone());
    }

    if let Some(path) = &args.text_file {
        let text = fs::read_to_string(path)?;
        return Ok(strip_line_ending(text));
    }

    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(strip_line_ending(text))
}

/// Drop the single trailing line ending editors and `echo` append
fn strip_line_ending(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}
