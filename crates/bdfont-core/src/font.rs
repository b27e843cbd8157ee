//! The font model: what a BDF file says, in types
//!
//! A [`Font`] is built once by the parser and never mutated afterwards, so it
//! can be shared across threads and compositions freely.

use std::collections::HashMap;

/// Encoding integer as written after `ENCODING`; negative means unencoded
pub type Encoding = i32;

/// `SIZE` line: point size and device resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontSize {
    pub point_size: i32,
    pub resolution_x: i32,
    pub resolution_y: i32,
}

/// Extent of a glyph (or of the whole font) relative to its origin
///
/// `origin_y` is the offset of the bottom row from the baseline, so fonts with
/// descenders have a negative font-wide `origin_y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundingBox {
    pub width: u32,
    pub height: u32,
    pub origin_x: i32,
    pub origin_y: i32,
}

impl BoundingBox {
    pub const fn new(width: u32, height: u32, origin_x: i32, origin_y: i32) -> Self {
        Self {
            width,
            height,
            origin_x,
            origin_y,
        }
    }

    /// Bytes in one padded bitmap row
    pub const fn bytes_per_row(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Total bytes a glyph with this box carries
    pub const fn byte_len(&self) -> usize {
        self.bytes_per_row() * self.height as usize
    }
}

/// An (x, y) width pair as found on `SWIDTH` and `DWIDTH` lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Width {
    pub x: i32,
    pub y: i32,
}

impl Width {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Everything between `STARTPROPERTIES` and `ENDPROPERTIES`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    /// Line-spacing hint only; rendering uses the font bounding box
    pub font_descent: i32,
    /// Line-spacing hint only; rendering uses the font bounding box
    pub font_ascent: i32,
    /// Encoding drawn in place of characters the font lacks
    pub default_char: Option<Encoding>,
    /// Every other property in declaration order, quotes removed
    pub extra: Vec<(String, String)>,
}

impl Properties {
    /// Look up an untyped property by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.extra
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// One `STARTCHAR` .. `ENDCHAR` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub name: String,
    pub code: Encoding,
    /// `None` for unencoded glyphs and encodings that are not Unicode scalars
    pub character: Option<char>,
    pub scalable_width: Width,
    pub device_width: Width,
    pub bounding_box: BoundingBox,
    /// Row-major, each row padded to a whole byte
    pub bytes: Vec<u8>,
    /// `height` rows of `width` bits, unpacked MSB-first from `bytes`
    pub bitmap: Vec<Vec<bool>>,
}

impl Glyph {
    /// Character that an encoding stands for, if any
    pub fn char_for_code(code: Encoding) -> Option<char> {
        u32::try_from(code).ok().and_then(char::from_u32)
    }

    pub fn width(&self) -> u32 {
        self.bounding_box.width
    }

    pub fn height(&self) -> u32 {
        self.bounding_box.height
    }
}

/// Glyphs keyed by encoding, iterated in insertion order
///
/// The key is always taken from the glyph's own `code`, so a lookup can
/// never return a glyph filed under some other encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphTable {
    glyphs: Vec<Glyph>,
    index: HashMap<Encoding, usize>,
}

impl GlyphTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a glyph, replacing (in place) any earlier glyph with the same code
    pub fn insert(&mut self, glyph: Glyph) -> Option<Glyph> {
        match self.index.get(&glyph.code) {
            Some(&slot) => Some(std::mem::replace(&mut self.glyphs[slot], glyph)),
            None => {
                self.index.insert(glyph.code, self.glyphs.len());
                self.glyphs.push(glyph);
                None
            },
        }
    }

    pub fn get(&self, code: Encoding) -> Option<&Glyph> {
        self.index.get(&code).map(|&slot| &self.glyphs[slot])
    }

    /// The earliest inserted glyph
    pub fn first(&self) -> Option<&Glyph> {
        self.glyphs.first()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Glyph> {
        self.glyphs.iter()
    }
}

impl<'a> IntoIterator for &'a GlyphTable {
    type Item = &'a Glyph;
    type IntoIter = std::slice::Iter<'a, Glyph>;

    fn into_iter(self) -> Self::IntoIter {
        self.glyphs.iter()
    }
}

impl FromIterator<Glyph> for GlyphTable {
    fn from_iter<I: IntoIterator<Item = Glyph>>(iter: I) -> Self {
        let mut table = GlyphTable::new();
        for glyph in iter {
            table.insert(glyph);
        }
        table
    }
}

/// A parsed BDF font
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Font {
    /// Format version from `STARTFONT`, informational only
    pub version: String,
    pub name: String,
    pub size: FontSize,
    /// Maximum extent over all glyphs; drives canvas height and baseline
    pub bounding_box: BoundingBox,
    pub properties: Properties,
    /// Count declared by `CHARS`, not checked against `glyphs`
    pub total_chars: u32,
    pub glyphs: GlyphTable,
}

impl Font {
    pub fn glyph(&self, code: Encoding) -> Option<&Glyph> {
        self.glyphs.get(code)
    }

    /// Glyph encoded as this character's code point
    pub fn glyph_for_char(&self, ch: char) -> Option<&Glyph> {
        Encoding::try_from(u32::from(ch))
            .ok()
            .and_then(|code| self.glyphs.get(code))
    }

    /// Canvas row of the baseline, counted from the top of the font box
    pub fn baseline(&self) -> i64 {
        i64::from(self.bounding_box.height) + i64::from(self.bounding_box.origin_y)
    }

    /// Every encoded glyph's character, in glyph table order
    pub fn all_characters(&self) -> String {
        self.glyphs.iter().filter_map(|glyph| glyph.character).collect()
    }
}
