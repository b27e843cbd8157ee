//! Batch command implementation
//!
//! Renders each input line to its own file, in parallel.

use std::fs;
use std::io::{self, Read};
use std::sync::Arc;

use bdfont::error::{BdfError, Result};
use bdfont::TextCompositor;
use bdfont_render::BatchRenderer;

use super::{composite_options, load_font, write_output};
use crate::cli::BatchArgs;

pub fn run(args: &BatchArgs) -> Result<()> {
    if !args.pattern.contains("{}") {
        return Err(BdfError::Other(format!(
            "output pattern '{}' needs a {{}} placeholder",
            args.pattern
        )));
    }

    let input = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        },
    };
    let lines: Vec<&str> = input.lines().collect();

    let font = load_font(&args.font_file, args.quiet)?;
    let options = composite_options(&args.layout, 0);

    fs::create_dir_all(&args.output).map_err(|e| {
        BdfError::Other(format!(
            "failed to create output directory {}: {e}",
            args.output.display()
        ))
    })?;

    let exporter = args.format.exporter();
    let renderer = BatchRenderer::new(Arc::new(TextCompositor::new()));
    let results = renderer.render_batch(&font, &lines, &options);

    let mut failed = 0usize;
    for job in results {
        let line_number = job.index + 1;
        let bitmap = match job.result {
            Ok(bitmap) => bitmap,
            Err(e) => {
                log::warn!("line {line_number}: {e}");
                if !args.quiet {
                    eprintln!("  line {line_number}: failed: {e}");
                }
                failed += 1;
                continue;
            },
        };

        let name = format!(
            "{}.{}",
            args.pattern.replace("{}", &line_number.to_string()),
            exporter.extension()
        );
        let path = args.output.join(name);
        let written = exporter
            .export(&bitmap)
            .and_then(|data| write_output(&data, Some(path.as_path())));

        match written {
            Ok(()) => {
                if args.verbose {
                    eprintln!(
                        "  {} ({}x{}, {:.2?})",
                        path.display(),
                        bitmap.width(),
                        bitmap.height(),
                        job.elapsed
                    );
                }
            },
            Err(e) => {
                log::warn!("line {line_number}: {e}");
                if !args.quiet {
                    eprintln!("  line {line_number}: failed: {e}");
                }
                failed += 1;
            },
        }
    }

    if !args.quiet {
        eprintln!(
            "Rendered {} of {} lines into {}",
            lines.len() - failed,
            lines.len(),
            args.output.display()
        );
    }

    if failed > 0 {
        return Err(BdfError::Other(format!("{failed} lines failed to render")));
    }
    Ok(())
}
