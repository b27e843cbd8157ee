//! CLI argument definitions using Clap v4

use std::path::PathBuf;

use bdfont_core::{traits::Exporter, GeometryPolicy};
use bdfont_export::{JsonExporter, PngExporter, PnmExporter, TextExporter};
use clap::{Parser, Subcommand, ValueEnum};

/// bdfont - render text with BDF bitmap fonts
#[derive(Parser, Debug)]
#[command(name = "bdfont")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display information about a BDF font
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Render text to an image file
    #[command(alias = "r")]
    Render(Box<RenderArgs>),

    /// Render every line of a text file to its own image
    Batch(BatchArgs),
}

impl Commands {
    pub fn verbosity(&self) -> (bool, bool) {
        match self {
            Commands::Info(_) => (false, false),
            Commands::Render(args) => (args.quiet, args.verbose),
            Commands::Batch(args) => (args.quiet, args.verbose),
        }
    }
}

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// BDF font file
    pub font: PathBuf,

    /// Print every character the font defines
    #[arg(long)]
    pub chars: bool,

    /// Draw the glyph used for this character
    #[arg(short = 'g', long)]
    pub glyph: Option<char>,
}

/// Layout options shared by render and batch
#[derive(clap::Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Extra pixels added to every advance (may be negative)
    #[arg(short = 'k', long = "kerning", default_value = "0", allow_negative_numbers = true)]
    pub kerning: i32,

    /// What to do with glyph pixels outside the canvas
    /// (defaults to $BDFONT_GEOMETRY, then strict)
    #[arg(long = "geometry")]
    pub geometry: Option<GeometryArg>,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Input text to render (reads from stdin if omitted)
    pub text: Option<String>,

    /// BDF font file
    #[arg(short = 'f', long = "font-file")]
    pub font_file: PathBuf,

    /// Input text (alternative to positional argument)
    #[arg(short = 't', long = "text", conflicts_with = "text_file")]
    pub text_arg: Option<String>,

    /// Read input text from file
    #[arg(short = 'T', long = "text-file", conflicts_with = "text_arg")]
    pub text_file: Option<PathBuf>,

    /// Render the text this many extra times, end to end
    #[arg(long = "repeat", default_value = "0")]
    pub repeat: u32,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Output file path (stdout if omitted)
    #[arg(short = 'o', long = "output-file")]
    pub output_file: Option<PathBuf>,

    /// Output format
    #[arg(short = 'O', long = "format", default_value = "txt")]
    pub format: OutputFormat,

    /// Silent mode (no progress info)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Verbose output
    #[arg(long = "verbose")]
    pub verbose: bool,
}

/// Arguments for the batch command
#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// BDF font file
    #[arg(short = 'f', long = "font-file")]
    pub font_file: PathBuf,

    /// Input text file, one job per line (stdin if omitted)
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output directory for rendered files
    #[arg(short = 'o', long = "output", default_value = ".")]
    pub output: PathBuf,

    /// Output filename pattern with {} placeholder for the line number
    #[arg(short = 'p', long = "pattern", default_value = "line_{}")]
    pub pattern: String,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Output format
    #[arg(short = 'O', long = "format", default_value = "pbm")]
    pub format: OutputFormat,

    /// Silent mode
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Verbose output
    #[arg(long = "verbose")]
    pub verbose: bool,
}

/// Geometry policy as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum GeometryArg {
    /// Fail when a glyph lands outside the canvas
    Strict,
    /// Drop pixels that land outside the canvas
    Clip,
}

impl From<GeometryArg> for GeometryPolicy {
    fn from(arg: GeometryArg) -> Self {
        match arg {
            GeometryArg::Strict => GeometryPolicy::Strict,
            GeometryArg::Clip => GeometryPolicy::Clip,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Monochrome PBM (ASCII)
    Pbm,
    /// Grayscale PGM (ASCII)
    Pgm,
    /// Grayscale PNG
    Png,
    /// One text line per pixel row
    Txt,
    /// Width, height and rows of 0/1
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pbm => "pbm",
            Self::Pgm => "pgm",
            Self::Png => "png",
            Self::Txt => "txt",
            Self::Json => "json",
        }
    }

    pub fn exporter(&self) -> Box<dyn Exporter> {
        match self {
            Self::Pbm => Box::new(PnmExporter::pbm()),
            Self::Pgm => Box::new(PnmExporter::pgm()),
            Self::Png => Box::new(PngExporter::new()),
            Self::Txt => Box::new(TextExporter::new()),
            Self::Json => Box::new(JsonExporter::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_args_parse() {
        let cli = Cli::try_parse_from([
            "bdfont", "render", "-f", "font.bdf", "Hello", "-k", "-1", "--repeat", "2", "-O",
            "png", "--geometry", "clip",
        ])
        .unwrap();

        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.text.as_deref(), Some("Hello"));
        assert_eq!(args.layout.kerning, -1);
        assert_eq!(args.repeat, 2);
        assert_eq!(args.format, OutputFormat::Png);
        assert_eq!(args.layout.geometry, Some(GeometryArg::Clip));
    }

    #[test]
    fn test_format_extensions_match_exporters() {
        for format in OutputFormat::value_variants() {
            assert_eq!(format.exporter().extension(), format.as_str());
        }
    }
}
