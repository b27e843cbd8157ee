//! JSON export format
//!
//! Exports a bitmap as `{"width", "height", "rows"}` with each row written as
//! a string of `0` and `1`.

use bdfont_core::{
    error::{ExportError, Result},
    traits::Exporter,
    Bitmap,
};
use serde::{Deserialize, Serialize};

/// JSON exporter for composited bitmaps
///
/// # Examples
///
/// ```ignore
/// use bdfont_export::JsonExporter;
///
/// let exporter = JsonExporter::new();
/// let json = exporter.export(&bitmap)?;
/// println!("{}", String::from_utf8_lossy(&json));
/// ```
pub struct JsonExporter {
    /// Whether to pretty-print the JSON
    pretty: bool,
}

impl JsonExporter {
    /// Create a new JSON exporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Create a JSON exporter with pretty-printing enabled
    pub fn with_pretty_print() -> Self {
        Self { pretty: true }
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for JsonExporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn export(&self, bitmap: &Bitmap) -> Result<Vec<u8>> {
        let output = BitmapJson::from(bitmap);

        let json = if self.pretty {
            serde_json::to_string_pretty(&output)
        } else {
            serde_json::to_string(&output)
        }
        .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;

        Ok(json.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }
}

/// Serialized form of a [`Bitmap`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitmapJson {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<String>,
}

impl From<&Bitmap> for BitmapJson {
    fn from(bitmap: &Bitmap) -> Self {
        Self {
            width: bitmap.width(),
            height: bitmap.height(),
            rows: bitmap
                .rows()
                .iter()
                .map(|row| row.iter().map(|&bit| if bit { '1' } else { '0' }).collect())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_export() {
        let bitmap = Bitmap::from_rows(vec![vec![true, false, false]]).unwrap();
        let out = JsonExporter::new().export(&bitmap).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            r#"{"width":3,"height":1,"rows":["100"]}"#
        );
    }

    #[test]
    fn test_pretty_json_parses_back() {
        let bitmap = Bitmap::from_rows(vec![vec![false, true], vec![true, false]]).unwrap();
        let out = JsonExporter::with_pretty_print().export(&bitmap).unwrap();

        let parsed: BitmapJson = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, BitmapJson::from(&bitmap));
        assert!(String::from_utf8(out).unwrap().contains('\n'));
    }
}
