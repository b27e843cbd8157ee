//! The 1-bit canvas that compositing produces

/// Rows of bits that only ever grow to the right
///
/// Cells start blank and are combined with glyph ink by OR, so overlapping
/// glyphs keep each other's ink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    rows: Vec<Vec<bool>>,
}

impl Bitmap {
    /// Zero-width canvas with `height` empty rows
    pub fn new(height: usize) -> Self {
        Self {
            width: 0,
            height,
            rows: vec![Vec::new(); height],
        }
    }

    /// Build from explicit rows; every row must have the same length
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Option<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height: rows.len(),
            rows,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    pub fn row(&self, y: usize) -> Option<&[bool]> {
        self.rows.get(y).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bit at `(x, y)`; out-of-range reads are blank
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// Append `columns` blank columns to every row
    pub fn grow(&mut self, columns: usize) {
        if columns == 0 {
            return;
        }
        self.width += columns;
        for row in &mut self.rows {
            row.resize(self.width, false);
        }
    }

    /// OR `bit` into `(x, y)`; returns false when the cell is outside the canvas
    pub fn or_bit(&mut self, x: usize, y: usize, bit: bool) -> bool {
        match self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            Some(cell) => {
                *cell |= bit;
                true
            },
            None => false,
        }
    }

    /// Copy of the columns in `start..end`, clamped to the canvas
    pub fn crop_columns(&self, start: usize, end: usize) -> Bitmap {
        let end = end.min(self.width);
        let start = start.min(end);
        Bitmap {
            width: end - start,
            height: self.height,
            rows: self
                .rows
                .iter()
                .map(|row| row[start..end].to_vec())
                .collect(),
        }
    }

    /// Number of set cells
    pub fn ink_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|&&bit| bit).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_empty() {
        let bitmap = Bitmap::new(5);
        assert_eq!(bitmap.width(), 0);
        assert_eq!(bitmap.height(), 5);
        assert!(bitmap.rows().iter().all(Vec::is_empty));
        assert!(bitmap.is_empty());
    }

    #[test]
    fn test_grow_and_or() {
        let mut bitmap = Bitmap::new(2);
        bitmap.grow(3);
        assert!(bitmap.or_bit(1, 1, true));
        assert!(bitmap.or_bit(1, 1, false), "a blank write keeps existing ink");
        assert!(!bitmap.or_bit(3, 0, true));
        assert!(!bitmap.or_bit(0, 2, true));

        assert_eq!(bitmap.width(), 3);
        assert!(bitmap.get(1, 1));
        assert_eq!(bitmap.ink_count(), 1);

        bitmap.grow(2);
        assert_eq!(bitmap.row(1).map(<[bool]>::len), Some(5));
        assert!(bitmap.get(1, 1));
    }

    #[test]
    fn test_crop_columns_clamps() {
        let bitmap = Bitmap::from_rows(vec![vec![true, false, true], vec![false, true, false]])
            .unwrap();
        let cropped = bitmap.crop_columns(1, 10);
        assert_eq!(cropped.width(), 2);
        assert_eq!(cropped.rows(), &[vec![false, true], vec![true, false]]);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(Bitmap::from_rows(vec![vec![true], vec![]]).is_none());
    }
}
