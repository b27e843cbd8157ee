//! Text compositing: a [`Font`] and a string become one [`Bitmap`]
//!
//! The canvas is as tall as the font bounding box and starts with no
//! columns. Each glyph widens it by the larger of its advance and its box
//! width, then has its bits ORed in relative to the shared baseline. Bits
//! that land past any edge are a geometry error, or dropped under
//! [`GeometryPolicy::Clip`]. The cursor (`xpos`) is tracked
//! apart from the committed width because a glyph with a negative left
//! offset may need blank columns reserved before it.
//!
//! ```
//! use bdfont_core::CompositeOptions;
//!
//! # let font = bdfont_core::Font::default();
//! let bitmap = bdfont_render::composite(&font, "", &CompositeOptions::default())?;
//! assert_eq!(bitmap.width(), 0);
//! # Ok::<(), bdfont_core::BdfError>(())
//! ```

pub mod batch;

use bdfont_core::{
    error::{GeometryError, Result},
    BdfError, Bitmap, CompositeOptions, Font, GeometryPolicy, Glyph, Renderer,
};

pub use batch::{composite_lines, BatchRenderer, BatchResult};

/// [`Renderer`] backed by [`composite`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCompositor;

impl TextCompositor {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for TextCompositor {
    fn name(&self) -> &'static str {
        "compositor"
    }

    fn render(&self, font: &Font, text: &str, options: &CompositeOptions) -> Result<Bitmap> {
        composite(font, text, options)
    }
}

/// Find the glyph drawn for `ch`
///
/// Falls back to the font's `DEFAULT_CHAR`, then to `'?'`, then to the first
/// glyph in the font. Only a font without any glyphs fails.
pub fn glyph_for(font: &Font, ch: char) -> Result<&Glyph> {
    if let Some(glyph) = font.glyph_for_char(ch) {
        return Ok(glyph);
    }

    let fallback = font
        .properties
        .default_char
        .and_then(|code| font.glyph(code))
        .or_else(|| font.glyph_for_char('?'))
        .or_else(|| font.glyphs.first())
        .ok_or(BdfError::NoGlyphsAvailable)?;

    log::trace!("no glyph for {:?}, using {:?}", ch, fallback.name);
    Ok(fallback)
}

/// Composite `text` with `font`, `1 + repeat_count` times, onto one canvas
pub fn composite(font: &Font, text: &str, options: &CompositeOptions) -> Result<Bitmap> {
    let mut layout = Layout::new(font, options);
    let mut bitmap = Bitmap::new(font.bounding_box.height as usize);

    for _ in 0..options.passes() {
        for ch in text.chars() {
            let glyph = glyph_for(font, ch)?;
            let placement = layout.place(glyph);
            bitmap.grow(placement.grow);
            stamp(&mut bitmap, glyph, &placement, options.geometry)?;
        }
    }

    log::debug!(
        "composited {} chars x{} into {}x{}",
        text.chars().count(),
        options.passes(),
        bitmap.width(),
        bitmap.height()
    );
    Ok(bitmap)
}

/// Canvas width [`composite`] would produce, without drawing anything
pub fn measure(font: &Font, text: &str, options: &CompositeOptions) -> Result<usize> {
    let mut layout = Layout::new(font, options);
    for _ in 0..options.passes() {
        for ch in text.chars() {
            layout.place(glyph_for(font, ch)?);
        }
    }
    Ok(layout.width)
}

/// Where one glyph lands and how much the canvas grows for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    /// Canvas column of the glyph's leftmost bitmap column
    left: i64,
    /// Canvas row of the glyph's top bitmap row
    top: i64,
    grow: usize,
}

/// Cursor arithmetic, separate from the pixels
#[derive(Debug)]
struct Layout {
    baseline: i64,
    kerning: i64,
    width: usize,
    xpos: i64,
}

impl Layout {
    fn new(font: &Font, options: &CompositeOptions) -> Self {
        Self {
            baseline: font.baseline(),
            kerning: i64::from(options.kerning_bias),
            width: 0,
            xpos: 0,
        }
    }

    fn place(&mut self, glyph: &Glyph) -> Placement {
        let bbox = glyph.bounding_box;
        let origin_x = i64::from(bbox.origin_x);
        let glyph_width = i64::from(bbox.width);
        let advance = i64::from(glyph.device_width.x);
        let committed = self.width as i64;

        let mut columns = advance.max(glyph_width);

        // Reserve blank columns so a left-overhanging glyph never lands left of 0
        if committed < -origin_x {
            self.xpos = -origin_x;
            columns += -origin_x;
        }

        let left = self.xpos + origin_x;
        let top = self.baseline - i64::from(bbox.origin_y) - i64::from(bbox.height);

        self.width += columns as usize;
        self.xpos += advance + self.kerning;

        Placement {
            left,
            top,
            grow: columns as usize,
        }
    }
}

/// OR a glyph's bits into the canvas at `placement`
fn stamp(
    bitmap: &mut Bitmap,
    glyph: &Glyph,
    placement: &Placement,
    policy: GeometryPolicy,
) -> Result<()> {
    let rows = glyph.bitmap.len() as i64;
    let columns = i64::from(glyph.bounding_box.width);
    if rows == 0 || columns == 0 {
        return Ok(());
    }

    if policy == GeometryPolicy::Strict {
        check_bounds(bitmap, glyph, placement, rows, columns)?;
    }

    let mut dropped = 0usize;
    for (y, row) in glyph.bitmap.iter().enumerate() {
        let canvas_y = placement.top + y as i64;
        for (x, &bit) in row.iter().enumerate() {
            let canvas_x = placement.left + x as i64;
            let inside = canvas_x >= 0
                && canvas_y >= 0
                && bitmap.or_bit(canvas_x as usize, canvas_y as usize, bit);
            if !inside && bit {
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        log::warn!(
            "glyph {:?}: clipped {} pixels outside the {}x{} canvas",
            glyph.name,
            dropped,
            bitmap.width(),
            bitmap.height()
        );
    }
    Ok(())
}

fn check_bounds(
    bitmap: &Bitmap,
    glyph: &Glyph,
    placement: &Placement,
    rows: i64,
    columns: i64,
) -> std::result::Result<(), GeometryError> {
    let height = bitmap.height() as i64;
    let width = bitmap.width() as i64;

    if placement.top < 0 || placement.top + rows > height {
        let row = if placement.top < 0 {
            placement.top
        } else {
            placement.top + rows - 1
        };
        return Err(GeometryError::RowOutOfBounds {
            glyph: glyph.name.clone(),
            row,
            height: bitmap.height(),
        });
    }

    if placement.left < 0 || placement.left + columns > width {
        let column = if placement.left < 0 {
            placement.left
        } else {
            placement.left + columns - 1
        };
        return Err(GeometryError::ColumnOutOfBounds {
            glyph: glyph.name.clone(),
            column,
            width: bitmap.width(),
        });
    }

    Ok(())
}
