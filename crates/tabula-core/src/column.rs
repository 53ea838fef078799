//! Column range types

use crate::MAX_COLS;

/// Width (in characters) of a column with no width set
pub const DEFAULT_COLUMN_WIDTH: f64 = 9.0;

/// Pixel width of the widest digit in the default font
pub const MAX_DIGIT_WIDTH: f64 = 7.0;

/// Convert a width in characters to the stored raw width.
///
/// The raw width includes 5 pixels of padding and is truncated to 1/256th
/// of a character.
pub fn chars_to_raw_width(chars: f64) -> f64 {
    ((chars + 5.0 / MAX_DIGIT_WIDTH) * 256.0).trunc() / 256.0
}

/// Convert a stored raw width back to whole characters
pub fn raw_width_to_chars(raw: f64) -> f64 {
    (raw - 5.0 / MAX_DIGIT_WIDTH).round()
}

/// Column metadata shared by a contiguous run of columns
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnRange {
    /// First column (0-based, inclusive)
    pub start: u16,
    /// Last column (0-based, inclusive)
    pub end: u16,
    /// Column-level style index (None = no column style)
    pub style_index: Option<u32>,
    /// Raw width (None = default)
    pub width: Option<f64>,
    pub custom_width: bool,
}

impl ColumnRange {
    /// Create a range with default settings
    pub fn new(start: u16, end: u16) -> Self {
        Self {
            start,
            end,
            style_index: None,
            width: None,
            custom_width: false,
        }
    }

    /// Create a range covering one column
    pub fn single(col: u16) -> Self {
        Self::new(col, col)
    }

    pub fn with_style(mut self, style_index: u32) -> Self {
        self.style_index = Some(style_index);
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self.custom_width = true;
        self
    }

    pub fn contains(&self, col: u16) -> bool {
        self.start <= col && col <= self.end
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    fn piece(&self, start: u16, end: u16) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }
}

/// The column ranges of a worksheet
///
/// Ranges are kept sorted by `start` and never overlap; columns outside
/// every range use the defaults.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnRanges {
    ranges: Vec<ColumnRange>,
}

impl ColumnRanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ranges read out of a file.
    ///
    /// Returns `None` if the ranges are inverted, out of bounds or
    /// overlapping.
    pub fn from_ranges(mut ranges: Vec<ColumnRange>) -> Option<Self> {
        ranges.sort_by_key(|r| r.start);
        let valid = ranges
            .iter()
            .all(|r| r.start <= r.end && (r.end as u32) < MAX_COLS as u32)
            && ranges.windows(2).all(|w| w[0].end < w[1].start);
        valid.then_some(Self { ranges })
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnRange> {
        self.ranges.iter()
    }

    pub fn as_slice(&self) -> &[ColumnRange] {
        &self.ranges
    }

    /// The range covering `col`, if any
    pub fn locate(&self, col: u16) -> Option<&ColumnRange> {
        self.position(col).map(|i| &self.ranges[i])
    }

    /// Style of the range covering `col`, 0 if none
    pub fn style_of(&self, col: u16) -> u32 {
        self.locate(col).and_then(|r| r.style_index).unwrap_or(0)
    }

    /// Raw width of the range covering `col`
    pub fn width_of(&self, col: u16) -> Option<f64> {
        self.locate(col).and_then(|r| r.width)
    }

    fn position(&self, col: u16) -> Option<usize> {
        // Sorted and disjoint, so the only candidate is the last range
        // starting at or before `col`
        let idx = self.ranges.partition_point(|r| r.start <= col);
        idx.checked_sub(1).filter(|&i| self.ranges[i].end >= col)
    }

    /// A range covering exactly `col`, ready to be changed.
    ///
    /// A multi-column range covering `col` is split so the change stays on
    /// that one column; the other pieces keep the original settings. With
    /// no covering range a new default range is inserted.
    pub fn get_range(&mut self, col: u16) -> &mut ColumnRange {
        let idx = match self.position(col) {
            Some(i) if self.ranges[i].is_single() => i,
            Some(i) => {
                let range = self.ranges.remove(i);
                let mut at = i;
                if range.start < col {
                    self.ranges.insert(at, range.piece(range.start, col - 1));
                    at += 1;
                }
                self.ranges.insert(at, range.piece(col, col));
                if col < range.end {
                    self.ranges.insert(at + 1, range.piece(col + 1, range.end));
                }
                at
            }
            None => {
                let at = self.ranges.partition_point(|r| r.start < col);
                self.ranges.insert(at, ColumnRange::single(col));
                at
            }
        };
        &mut self.ranges[idx]
    }

    /// Renumber ranges for a column inserted at `col`.
    ///
    /// The range covering `col - 1` grows over the new column; ranges at or
    /// after `col` move right. Anything pushed past the last column is
    /// clipped.
    pub fn insert_column(&mut self, col: u16) {
        let last = MAX_COLS - 1;
        for range in &mut self.ranges {
            if range.start >= col {
                range.start = range.start.saturating_add(1);
                range.end = range.end.saturating_add(1);
            } else if col > 0 && range.end >= col - 1 {
                range.end = range.end.saturating_add(1);
            }
        }
        self.ranges.retain(|r| r.start <= last);
        for range in &mut self.ranges {
            range.end = range.end.min(last);
        }
    }

    /// Renumber ranges for the column at `col` being deleted.
    ///
    /// A range covering only `col` disappears, a range containing it
    /// shrinks, ranges after it move left.
    pub fn delete_column(&mut self, col: u16) {
        self.ranges.retain(|r| !(r.start == col && r.end == col));
        for range in &mut self.ranges {
            if range.start > col {
                range.start -= 1;
                range.end -= 1;
            } else if range.end >= col {
                range.end -= 1;
            }
        }
    }

    /// Check the sorted, non-overlapping invariant
    pub fn is_partition(&self) -> bool {
        self.ranges.iter().all(|r| r.start <= r.end)
            && self.ranges.windows(2).all(|w| w[0].end < w[1].start)
    }
}
