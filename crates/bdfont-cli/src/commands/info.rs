//! Info command implementation
//!
//! Prints a font's header, properties and glyph inventory.

use bdfont::error::Result;
use bdfont::export::TextExporter;
use bdfont::{Bitmap, Font, Glyph};

use crate::cli::InfoArgs;

pub fn run(args: &InfoArgs) -> Result<()> {
    let font = bdfont::load(&args.font)?;

    print_header(&font);
    println!();
    print_properties(&font);

    if args.chars {
        println!();
        println!("Characters:");
        println!("  {}", bdfont::all_characters(&font));
    }

    if let Some(ch) = args.glyph {
        let glyph = bdfont::glyph_for(&font, ch)?;
        println!();
        print_glyph(glyph);
    }

    Ok(())
}

fn print_header(font: &Font) {
    let bbox = font.bounding_box;
    println!("Font:      {}", font.name);
    println!("Version:   {}", font.version);
    println!(
        "Size:      {}pt at {}x{} dpi",
        font.size.point_size, font.size.resolution_x, font.size.resolution_y
    );
    println!(
        "Bounds:    {}x{} origin ({}, {})",
        bbox.width, bbox.height, bbox.origin_x, bbox.origin_y
    );
    println!("Baseline:  {}", font.baseline());
    println!("Glyphs:    {} (declared {})", font.glyphs.len(), font.total_chars);
}

fn print_properties(font: &Font) {
    let props = &font.properties;
    println!("Properties:");
    println!("  FONT_ASCENT       {}", props.font_ascent);
    println!("  FONT_DESCENT      {}", props.font_descent);
    match props.default_char {
        Some(code) => println!("  DEFAULT_CHAR      {code}"),
        None => println!("  DEFAULT_CHAR      (none)"),
    }
    for (name, value) in &props.extra {
        println!("  {name:<17} {value}");
    }
}

fn print_glyph(glyph: &Glyph) {
    let bbox = glyph.bounding_box;
    println!("Glyph {} (encoding {}):", glyph.name, glyph.code);
    println!(
        "  advance {} box {}x{} origin ({}, {})",
        glyph.device_width.x, bbox.width, bbox.height, bbox.origin_x, bbox.origin_y
    );

    if let Some(bitmap) = Bitmap::from_rows(glyph.bitmap.clone()) {
        for row in TextExporter::new().lines(&bitmap) {
            println!("  {row}");
        }
    }
}
