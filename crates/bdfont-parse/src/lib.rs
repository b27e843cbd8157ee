//! BDF parser: text in, [`Font`] out
//!
//! BDF is line oriented. Every line starts with a keyword, and three pairs of
//! keywords open and close nested sections:
//!
//! ```text
//! STARTFONT 2.1
//! FONT -misc-tiny-medium-r-normal--6-60-75-75-c-40-iso10646-1
//! SIZE 6 75 75
//! FONTBOUNDINGBOX 4 6 0 -1
//! STARTPROPERTIES 1
//! DEFAULT_CHAR 63
//! ENDPROPERTIES
//! CHARS 1
//! STARTCHAR A
//! ENCODING 65
//! SWIDTH 666 0
//! DWIDTH 4 0
//! BBX 4 6 0 -1
//! BITMAP
//! 40
//! A0
//! E0
//! A0
//! A0
//! 00
//! ENDCHAR
//! ENDFONT
//! ```
//!
//! [`parse`] walks the lines once, keeping the open sections on a stack and
//! the glyph under construction in a scratch value. Nothing outlives the
//! call, so separate inputs can be parsed concurrently.

pub mod rows;

use bdfont_core::{
    error::{GeometryError, MalformedFontError, Result},
    BoundingBox, Encoding, Font, FontSize, Glyph, Width,
};

/// Parse BDF text into a [`Font`]
///
/// Fails with a malformed-font error on empty input, on numbers or hex rows
/// that don't parse, and when sections are left open or closed out of
/// order. Fails with a geometry error when a glyph declares more bitmap
/// rows than follow it.
pub fn parse(text: &str) -> Result<Font> {
    if text.trim().is_empty() {
        return Err(MalformedFontError::EmptyInput.into());
    }

    let mut parser = Parser::new(text);
    parser.run()?;
    parser.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Font,
    Properties,
    Char,
}

impl Section {
    fn start_keyword(self) -> &'static str {
        match self {
            Section::Font => "STARTFONT",
            Section::Properties => "STARTPROPERTIES",
            Section::Char => "STARTCHAR",
        }
    }
}

/// A tokenized line plus where it came from
struct Line<'a> {
    number: usize,
    keyword: &'a str,
    args: Vec<&'a str>,
    /// Everything after the keyword, trimmed
    rest: &'a str,
}

impl<'a> Line<'a> {
    fn new(number: usize, text: &'a str) -> Option<Self> {
        let text = text.trim();
        let mut tokens = text.split_whitespace();
        let keyword = tokens.next()?;
        Some(Self {
            number,
            keyword,
            args: tokens.collect(),
            rest: text[keyword.len()..].trim(),
        })
    }

    /// Argument `index` (0-based, so token `index + 2` of the line)
    fn arg(&self, index: usize) -> std::result::Result<&'a str, MalformedFontError> {
        self.args
            .get(index)
            .copied()
            .ok_or_else(|| MalformedFontError::MissingToken {
                line: self.number,
                keyword: self.keyword.to_string(),
                index: index + 2,
            })
    }

    fn int(&self, index: usize) -> std::result::Result<i32, MalformedFontError> {
        let value = self.arg(index)?;
        value.parse().map_err(|_| MalformedFontError::InvalidNumber {
            line: self.number,
            value: value.to_string(),
        })
    }

    fn uint(&self, index: usize) -> std::result::Result<u32, MalformedFontError> {
        let value = self.arg(index)?;
        value.parse().map_err(|_| MalformedFontError::InvalidNumber {
            line: self.number,
            value: value.to_string(),
        })
    }

    fn width_pair(&self) -> std::result::Result<Width, MalformedFontError> {
        Ok(Width::new(self.int(0)?, self.int(1)?))
    }

    fn bounding_box(&self) -> std::result::Result<BoundingBox, MalformedFontError> {
        Ok(BoundingBox::new(
            self.uint(0)?,
            self.uint(1)?,
            self.int(2)?,
            self.int(3)?,
        ))
    }
}

/// The glyph between `STARTCHAR` and `ENDCHAR`
#[derive(Debug, Default)]
struct GlyphScratch {
    name: String,
    code: Option<Encoding>,
    scalable_width: Option<Width>,
    device_width: Option<Width>,
    bounding_box: Option<BoundingBox>,
    rows: Option<(Vec<u8>, Vec<Vec<bool>>)>,
}

struct Parser<'a> {
    lines: Vec<&'a str>,
    cursor: usize,
    sections: Vec<Section>,
    font: Font,
    glyph: Option<GlyphScratch>,
    // Font-level SWIDTH/DWIDTH, used by glyphs that omit their own
    default_scalable_width: Width,
    default_device_width: Width,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            cursor: 0,
            sections: Vec::new(),
            font: Font::default(),
            glyph: None,
            default_scalable_width: Width::default(),
            default_device_width: Width::default(),
        }
    }

    fn run(&mut self) -> Result<()> {
        while self.cursor < self.lines.len() {
            let number = self.cursor + 1;
            let text = self.lines[self.cursor];
            self.cursor += 1;

            if let Some(line) = Line::new(number, text) {
                self.apply(&line)?;
            }
        }
        Ok(())
    }

    fn apply(&mut self, line: &Line<'a>) -> Result<()> {
        match line.keyword {
            "STARTFONT" => {
                self.sections.push(Section::Font);
                self.font.version = line.args.first().copied().unwrap_or_default().to_string();
            },
            "FONT" => self.font.name = line.rest.to_string(),
            "SIZE" => {
                self.font.size = FontSize {
                    point_size: line.int(0)?,
                    resolution_x: line.int(1)?,
                    resolution_y: line.int(2)?,
                };
            },
            "FONTBOUNDINGBOX" => self.font.bounding_box = line.bounding_box()?,
            "STARTPROPERTIES" => {
                self.sections.push(Section::Properties);
                self.font.properties = Default::default();
            },
            "FONT_DESCENT" => self.font.properties.font_descent = line.int(0)?,
            "FONT_ASCENT" => self.font.properties.font_ascent = line.int(0)?,
            "DEFAULT_CHAR" => self.font.properties.default_char = Some(line.int(0)?),
            "ENDPROPERTIES" => self.close(line, Section::Properties)?,
            "CHARS" => self.font.total_chars = line.uint(0)?,
            "STARTCHAR" => {
                self.sections.push(Section::Char);
                self.glyph = Some(GlyphScratch {
                    name: line.rest.to_string(),
                    ..Default::default()
                });
            },
            "ENCODING" => self.scratch(line)?.code = Some(line.int(0)?),
            "SWIDTH" => {
                let width = line.width_pair()?;
                match self.glyph.as_mut() {
                    Some(glyph) => glyph.scalable_width = Some(width),
                    None => self.default_scalable_width = width,
                }
            },
            "DWIDTH" => {
                let width = line.width_pair()?;
                match self.glyph.as_mut() {
                    Some(glyph) => glyph.device_width = Some(width),
                    None => self.default_device_width = width,
                }
            },
            "BBX" => self.scratch(line)?.bounding_box = Some(line.bounding_box()?),
            "BITMAP" => {
                let rows = self.read_bitmap(line)?;
                self.scratch(line)?.rows = Some(rows);
            },
            "ENDCHAR" => {
                self.close(line, Section::Char)?;
                self.commit_glyph(line)?;
            },
            "ENDFONT" => self.close(line, Section::Font)?,
            "COMMENT" => {},
            keyword => {
                if self.sections.last() == Some(&Section::Properties) {
                    self.font
                        .properties
                        .extra
                        .push((keyword.to_string(), unquote(line.rest)));
                } else {
                    log::trace!("line {}: ignoring {}", line.number, keyword);
                }
            },
        }
        Ok(())
    }

    fn scratch(
        &mut self,
        line: &Line<'_>,
    ) -> std::result::Result<&mut GlyphScratch, MalformedFontError> {
        self.glyph
            .as_mut()
            .ok_or_else(|| MalformedFontError::OutsideGlyph {
                line: line.number,
                keyword: line.keyword.to_string(),
            })
    }

    fn close(
        &mut self,
        line: &Line<'_>,
        section: Section,
    ) -> std::result::Result<(), MalformedFontError> {
        if self.sections.last() != Some(&section) {
            return Err(MalformedFontError::UnexpectedSectionEnd {
                line: line.number,
                found: line.keyword.to_string(),
                expected: section.start_keyword(),
            });
        }
        self.sections.pop();
        Ok(())
    }

    /// Consume the rows following `BITMAP`
    fn read_bitmap(&mut self, line: &Line<'_>) -> Result<(Vec<u8>, Vec<Vec<bool>>)> {
        let glyph = self.scratch(line)?;
        let name = glyph.name.clone();
        let bbox = glyph
            .bounding_box
            .ok_or_else(|| MalformedFontError::MissingBoundingBox {
                line: line.number,
                glyph: name.clone(),
            })?;

        let height = bbox.height as usize;
        let per_row = bbox.bytes_per_row();
        let mut bytes = Vec::with_capacity(bbox.byte_len());
        let mut bitmap = Vec::with_capacity(height);

        for found in 0..height {
            let row = match self.lines.get(self.cursor).map(|row| row.trim()) {
                Some(row) if row != "ENDCHAR" => row,
                _ => {
                    return Err(GeometryError::MissingBitmapRows {
                        glyph: name,
                        expected: height,
                        found,
                    }
                    .into())
                },
            };

            let decoded = rows::decode_hex_row(row, per_row, self.cursor + 1)?;
            bitmap.push(rows::unpack_bits(&decoded, bbox.width as usize));
            bytes.extend_from_slice(&decoded);
            self.cursor += 1;
        }

        Ok((bytes, bitmap))
    }

    fn commit_glyph(&mut self, line: &Line<'_>) -> Result<()> {
        let Some(scratch) = self.glyph.take() else {
            return Err(MalformedFontError::OutsideGlyph {
                line: line.number,
                keyword: line.keyword.to_string(),
            }
            .into());
        };

        let code = scratch
            .code
            .ok_or_else(|| MalformedFontError::MissingEncoding {
                glyph: scratch.name.clone(),
            })?;
        let bounding_box = scratch.bounding_box.unwrap_or_default();

        let (bytes, bitmap) = match scratch.rows {
            Some(rows) => rows,
            None => {
                if bounding_box.height > 0 {
                    log::warn!("glyph {:?} has no BITMAP; drawing it blank", scratch.name);
                }
                (
                    vec![0; bounding_box.byte_len()],
                    vec![vec![false; bounding_box.width as usize]; bounding_box.height as usize],
                )
            },
        };

        let glyph = Glyph {
            character: Glyph::char_for_code(code),
            name: scratch.name,
            code,
            scalable_width: scratch.scalable_width.unwrap_or(self.default_scalable_width),
            device_width: scratch.device_width.unwrap_or(self.default_device_width),
            bounding_box,
            bytes,
            bitmap,
        };

        log::trace!("glyph {:?} -> encoding {}", glyph.name, glyph.code);
        if let Some(previous) = self.font.glyphs.insert(glyph) {
            log::debug!("encoding {} redefined, replacing {:?}", code, previous.name);
        }
        Ok(())
    }

    fn finish(self) -> Result<Font> {
        if !self.sections.is_empty() {
            return Err(MalformedFontError::UnbalancedSections {
                open: self
                    .sections
                    .iter()
                    .map(|section| section.start_keyword().to_string())
                    .collect(),
            }
            .into());
        }

        let font = self.font;
        if font.total_chars as usize != font.glyphs.len() {
            log::debug!(
                "font {:?} declares {} glyphs but defines {}",
                font.name,
                font.total_chars,
                font.glyphs.len()
            );
        }
        log::debug!("parsed font {:?}: {} glyphs", font.name, font.glyphs.len());
        Ok(font)
    }
}

/// Strip BDF string quoting: `"a ""b"""` -> `a "b"`
fn unquote(value: &str) -> String {
    match value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\""),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bdfont_core::BdfError;

    const TINY: &str = "\
STARTFONT 2.1
COMMENT a four by six test font
FONT -misc-tiny-medium-r-normal--6-60-75-75-c-40-iso10646-1
SIZE 6 75 75
FONTBOUNDINGBOX 4 6 0 -1
STARTPROPERTIES 5
FOUNDRY \"Misc\"
COPYRIGHT \"Say \"\"hi\"\"\"
FONT_DESCENT 1
FONT_ASCENT 5
DEFAULT_CHAR 63
ENDPROPERTIES
CHARS 2
STARTCHAR question
ENCODING 63
SWIDTH 666 0
DWIDTH 4 0
BBX 4 6 0 -1
BITMAP
c0
20
40
00
40
00
ENDCHAR
STARTCHAR A
ENCODING 65
SWIDTH 666 0
DWIDTH 4 0
BBX 4 6 0 -1
BITMAP
40
A0
E0
A0
A0
00
ENDCHAR
ENDFONT
";

    fn bits(pattern: &str) -> Vec<bool> {
        pattern.chars().map(|c| c == '1').collect()
    }

    fn malformed(text: &str) -> MalformedFontError {
        match parse(text) {
            Err(BdfError::MalformedFont(err)) => err,
            other => panic!("expected a malformed font error, got {other:?}"),
        }
    }

    fn one_glyph(body: &str) -> String {
        format!("STARTFONT 2.1\nFONTBOUNDINGBOX 8 2 0 0\nSTARTCHAR g\n{body}ENDCHAR\nENDFONT\n")
    }

    #[test]
    fn test_header_fields() {
        let font = parse(TINY).unwrap();

        assert_eq!(font.version, "2.1");
        assert_eq!(font.name, "-misc-tiny-medium-r-normal--6-60-75-75-c-40-iso10646-1");
        assert_eq!(
            font.size,
            FontSize {
                point_size: 6,
                resolution_x: 75,
                resolution_y: 75
            }
        );
        assert_eq!(font.bounding_box, BoundingBox::new(4, 6, 0, -1));
        assert_eq!(font.total_chars, 2);
    }

    #[test]
    fn test_properties() {
        let props = parse(TINY).unwrap().properties;

        assert_eq!(props.font_descent, 1);
        assert_eq!(props.font_ascent, 5);
        assert_eq!(props.default_char, Some(63));
        assert_eq!(props.get("FOUNDRY"), Some("Misc"));
        assert_eq!(props.get("COPYRIGHT"), Some("Say \"hi\""));
        assert_eq!(props.get("FONT_ASCENT"), None, "typed properties are not duplicated");
    }

    #[test]
    fn test_glyph_a_decodes() {
        let font = parse(TINY).unwrap();
        let a = font.glyph(65).unwrap();

        assert_eq!(a.name, "A");
        assert_eq!(a.character, Some('A'));
        assert_eq!(a.scalable_width, Width::new(666, 0));
        assert_eq!(a.device_width, Width::new(4, 0));
        assert_eq!(a.bounding_box, BoundingBox::new(4, 6, 0, -1));
        assert_eq!(a.bytes, vec![0x40, 0xA0, 0xE0, 0xA0, 0xA0, 0x00]);
        assert_eq!(
            a.bitmap,
            vec![
                bits("0100"),
                bits("1010"),
                bits("1110"),
                bits("1010"),
                bits("1010"),
                bits("0000"),
            ]
        );
    }

    #[test]
    fn test_byte_and_bitmap_sizes_follow_each_glyph_box() {
        let text = "\
STARTFONT 2.1
FONTBOUNDINGBOX 12 3 -1 -1
STARTCHAR wide
ENCODING 87
DWIDTH 12 0
BBX 12 2 0 0
BITMAP
FFF0
8010
ENDCHAR
STARTCHAR narrow
ENCODING 46
DWIDTH 2 0
BBX 1 1 0 0
BITMAP
80
ENDCHAR
STARTCHAR empty
ENCODING 32
DWIDTH 3 0
BBX 0 0 0 0
BITMAP
ENDCHAR
ENDFONT
";
        let font = parse(text).unwrap();
        assert_eq!(font.glyphs.len(), 3);

        for glyph in &font.glyphs {
            let bbox = glyph.bounding_box;
            assert_eq!(
                glyph.bytes.len(),
                (bbox.width as usize).div_ceil(8) * bbox.height as usize,
                "byte count of {}",
                glyph.name
            );
            assert_eq!(glyph.bitmap.len(), bbox.height as usize);
            assert!(glyph.bitmap.iter().all(|row| row.len() == bbox.width as usize));
        }

        let wide = font.glyph(87).unwrap();
        assert_eq!(wide.bitmap[0], bits("111111111111"));
        assert_eq!(wide.bitmap[1], bits("100000000001"));
    }

    #[test]
    fn test_glyph_table_keeps_file_order() {
        let font = parse(TINY).unwrap();
        assert_eq!(font.all_characters(), "?A");
        assert!(font.glyphs.iter().all(|g| font.glyph(g.code) == Some(g)));
    }

    #[test]
    fn test_unknown_keywords_are_ignored() {
        let text = one_glyph("ENCODING 1\nVVECTOR 0 0\nMETRICSSET 0\nBBX 1 1 0 0\nBITMAP\n80\n");
        let font = parse(&text).unwrap();
        assert_eq!(font.glyphs.len(), 1);
    }

    #[test]
    fn test_font_level_widths_are_defaults() {
        let text = "\
STARTFONT 2.1
FONTBOUNDINGBOX 8 1 0 0
SWIDTH 500 0
DWIDTH 5 0
STARTCHAR a
ENCODING 97
BBX 1 1 0 0
BITMAP
80
ENDCHAR
STARTCHAR b
ENCODING 98
DWIDTH 7 0
BBX 1 1 0 0
BITMAP
80
ENDCHAR
ENDFONT
";
        let font = parse(text).unwrap();
        assert_eq!(font.glyph(97).unwrap().device_width, Width::new(5, 0));
        assert_eq!(font.glyph(97).unwrap().scalable_width, Width::new(500, 0));
        assert_eq!(font.glyph(98).unwrap().device_width, Width::new(7, 0));
    }

    #[test]
    fn test_negative_encoding_has_no_character() {
        let text = one_glyph("ENCODING -1\nBBX 1 1 0 0\nBITMAP\n80\n");
        let font = parse(&text).unwrap();
        let glyph = font.glyph(-1).unwrap();
        assert_eq!(glyph.character, None);
        assert_eq!(font.all_characters(), "");
    }

    #[test]
    fn test_missing_bitmap_is_blank() {
        let text = one_glyph("ENCODING 1\nBBX 9 2 0 0\n");
        let glyph = parse(&text).unwrap().glyph(1).cloned().unwrap();
        assert_eq!(glyph.bytes, vec![0; 4]);
        assert_eq!(glyph.bitmap, vec![vec![false; 9]; 2]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(malformed(""), MalformedFontError::EmptyInput);
        assert_eq!(malformed("  \n\t\n"), MalformedFontError::EmptyInput);
    }

    #[test]
    fn test_unterminated_sections() {
        let err = malformed("STARTFONT 2.1\nSTARTCHAR a\nENCODING 1\n");
        assert_eq!(
            err,
            MalformedFontError::UnbalancedSections {
                open: vec!["STARTFONT".into(), "STARTCHAR".into()]
            }
        );

        let err = malformed("STARTFONT 2.1\nSTARTPROPERTIES 0\nENDPROPERTIES\n");
        assert_eq!(
            err,
            MalformedFontError::UnbalancedSections {
                open: vec!["STARTFONT".into()]
            }
        );
    }

    #[test]
    fn test_mismatched_section_end() {
        let err = malformed("STARTFONT 2.1\nSTARTPROPERTIES 0\nENDFONT\n");
        assert_eq!(
            err,
            MalformedFontError::UnexpectedSectionEnd {
                line: 3,
                found: "ENDFONT".into(),
                expected: "STARTFONT"
            }
        );
        assert!(matches!(
            malformed("STARTFONT 2.1\nENDCHAR\nENDFONT\n"),
            MalformedFontError::UnexpectedSectionEnd { line: 2, .. }
        ));
    }

    #[test]
    fn test_glyph_keyword_outside_char() {
        assert_eq!(
            malformed("STARTFONT 2.1\nENCODING 65\nENDFONT\n"),
            MalformedFontError::OutsideGlyph {
                line: 2,
                keyword: "ENCODING".into()
            }
        );
    }

    #[test]
    fn test_bad_numbers() {
        assert_eq!(
            malformed("STARTFONT 2.1\nSIZE 6 x 75\nENDFONT\n"),
            MalformedFontError::InvalidNumber {
                line: 2,
                value: "x".into()
            }
        );
        assert_eq!(
            malformed("STARTFONT 2.1\nFONTBOUNDINGBOX 4 6 0\nENDFONT\n"),
            MalformedFontError::MissingToken {
                line: 2,
                keyword: "FONTBOUNDINGBOX".into(),
                index: 5
            }
        );
        assert!(matches!(
            malformed(&one_glyph("ENCODING 1\nBBX -1 1 0 0\n")),
            MalformedFontError::InvalidNumber { .. }
        ));
    }

    #[test]
    fn test_short_row_is_malformed() {
        let err = malformed(&one_glyph("ENCODING 1\nBBX 9 1 0 0\nBITMAP\nFF\n"));
        assert_eq!(
            err,
            MalformedFontError::ShortBitmapRow {
                line: 7,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_missing_rows_are_a_geometry_error() {
        let text = one_glyph("ENCODING 1\nBBX 8 3 0 0\nBITMAP\nFF\n");
        match parse(&text) {
            Err(BdfError::GlyphGeometry(GeometryError::MissingBitmapRows {
                glyph,
                expected,
                found,
            })) => {
                assert_eq!(glyph, "g");
                assert_eq!((expected, found), (3, 1));
            },
            other => panic!("unexpected result {other:?}"),
        }

        let truncated = "STARTFONT 2.1\nSTARTCHAR g\nENCODING 1\nBBX 8 2 0 0\nBITMAP\nFF";
        assert!(matches!(
            parse(truncated),
            Err(BdfError::GlyphGeometry(GeometryError::MissingBitmapRows { found: 1, .. }))
        ));
    }

    #[test]
    fn test_missing_encoding_and_bbx() {
        assert_eq!(
            malformed(&one_glyph("BBX 1 1 0 0\nBITMAP\n80\n")),
            MalformedFontError::MissingEncoding { glyph: "g".into() }
        );
        assert_eq!(
            malformed(&one_glyph("ENCODING 1\nBITMAP\n")),
            MalformedFontError::MissingBoundingBox {
                line: 5,
                glyph: "g".into()
            }
        );
    }

    #[test]
    fn test_redefined_encoding_replaces_glyph() {
        let text = "\
STARTFONT 2.1
STARTCHAR first
ENCODING 65
BBX 0 0 0 0
ENDCHAR
STARTCHAR second
ENCODING 65
BBX 0 0 0 0
ENDCHAR
ENDFONT
";
        let font = parse(text).unwrap();
        assert_eq!(font.glyphs.len(), 1);
        assert_eq!(font.glyph(65).unwrap().name, "second");
    }

    #[test]
    fn test_crlf_and_indentation() {
        let text = TINY.replace('\n', "\r\n").replace("BITMAP", "  BITMAP");
        let font = parse(&text).unwrap();
        assert_eq!(font.glyph(65).unwrap().bytes[2], 0xE0);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"Misc\""), "Misc");
        assert_eq!(unquote("\"a \"\"b\"\"\""), "a \"b\"");
        assert_eq!(unquote("96"), "96");
        assert_eq!(unquote("\""), "\"");
    }
}
