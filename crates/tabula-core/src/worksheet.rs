//! Worksheet type

use std::fmt;

use crate::cell::Cell;
use crate::column::ColumnRanges;
use crate::row::Row;

/// Ordered, sparse row storage of a worksheet
///
/// Indexed by row number; `None` entries are rows that were never
/// materialized.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetData {
    pub(crate) rows: Vec<Option<Row>>,
}

impl SheetData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of row slots (materialized or not)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: u32) -> Option<&Row> {
        self.rows.get(index as usize).and_then(Option::as_ref)
    }

    pub(crate) fn row_mut(&mut self, index: u32) -> Option<&mut Row> {
        self.rows.get_mut(index as usize).and_then(Option::as_mut)
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.row(row).and_then(|r| r.cell(col))
    }

    pub(crate) fn cell_mut(&mut self, row: u32, col: u16) -> Option<&mut Cell> {
        self.row_mut(row).and_then(|r| r.cell_mut(col))
    }

    /// Iterate over `(index, row)` for every materialized row
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Row)> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.as_ref().map(|r| (i as u32, r)))
    }

    pub(crate) fn iter_rows_mut(&mut self) -> impl Iterator<Item = &mut Row> {
        self.rows.iter_mut().flatten()
    }

    /// Iterate over every materialized cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten().flat_map(Row::iter_cells)
    }

    /// Pad so `(row, col)` is addressable and return the (materialized)
    /// target row
    pub(crate) fn ensure(&mut self, row: u32, col: u16) -> &mut Row {
        let index = row as usize;
        let width = col as usize + 1;
        if self.rows.len() <= index {
            self.rows.resize(index + 1, None);
        }
        for existing in self.iter_rows_mut() {
            existing.pad_to(width);
        }
        self.rows[index].get_or_insert_with(|| Row::with_len(width))
    }

    /// Rewrite cached row numbers of every row from `from` onward
    pub(crate) fn renumber_from(&mut self, from: usize) {
        for (index, slot) in self.rows.iter_mut().enumerate().skip(from) {
            if let Some(row) = slot {
                row.renumber(index as u32);
            }
        }
    }

    /// Rewrite every cached position
    pub(crate) fn renumber_all(&mut self) {
        self.renumber_from(0);
        for row in self.iter_rows_mut() {
            row.renumber_columns_from(0);
        }
    }
}

/// A merged rectangular region (all bounds inclusive, 0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergedCell {
    pub start_row: u32,
    pub start_col: u16,
    pub end_row: u32,
    pub end_col: u16,
}

impl MergedCell {
    /// Create a region, normalizing the corner order
    pub fn new(start_row: u32, start_col: u16, end_row: u32, end_col: u16) -> Self {
        Self {
            start_row: start_row.min(end_row),
            start_col: start_col.min(end_col),
            end_row: start_row.max(end_row),
            end_col: start_col.max(end_col),
        }
    }

    pub fn contains(&self, row: u32, col: u16) -> bool {
        (self.start_row..=self.end_row).contains(&row)
            && (self.start_col..=self.end_col).contains(&col)
    }

    pub fn overlaps(&self, other: &MergedCell) -> bool {
        self.start_row <= other.end_row
            && self.end_row >= other.start_row
            && self.start_col <= other.end_col
            && self.end_col >= other.start_col
    }
}

/// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
pub fn column_to_letters(col: u16) -> String {
    let mut result = String::new();
    let mut n = col as u32 + 1;

    while n > 0 {
        n -= 1;
        result.insert(0, ((n % 26) as u8 + b'A') as char);
        n /= 26;
    }

    result
}

impl fmt::Display for MergedCell {
    /// A1-style reference such as `B2:D4`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}{}",
            column_to_letters(self.start_col),
            self.start_row + 1,
            column_to_letters(self.end_col),
            self.end_row + 1
        )
    }
}

/// A worksheet (single sheet in a workbook)
///
/// Reading is done directly on the worksheet; every mutation goes through a
/// [`SheetEditor`](crate::edit::SheetEditor), which pairs the sheet with
/// its workbook's style registry.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Worksheet {
    name: String,
    pub(crate) sheet_data: SheetData,
    pub(crate) cols: ColumnRanges,
    pub(crate) merged_cells: Vec<MergedCell>,
}

impl Worksheet {
    /// Create a new, empty worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Assemble a worksheet from parts read out of a file.
    ///
    /// Cached cell positions are rewritten from the slots the cells occupy.
    pub fn from_parts<S: Into<String>>(
        name: S,
        rows: Vec<Option<Row>>,
        cols: ColumnRanges,
        merged_cells: Vec<MergedCell>,
    ) -> Self {
        let mut sheet_data = SheetData { rows };
        sheet_data.renumber_all();
        Self {
            name: name.into(),
            sheet_data,
            cols,
            merged_cells,
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    pub fn sheet_data(&self) -> &SheetData {
        &self.sheet_data
    }

    pub fn row(&self, index: u32) -> Option<&Row> {
        self.sheet_data.row(index)
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.sheet_data.cell(row, col)
    }

    pub fn column_ranges(&self) -> &ColumnRanges {
        &self.cols
    }

    /// Merged regions in the order they were added
    pub fn merged_cells(&self) -> &[MergedCell] {
        &self.merged_cells
    }

    /// Check that every materialized cell's cached position matches its slot
    pub fn positions_consistent(&self) -> bool {
        self.sheet_data.iter().all(|(r, row)| {
            row.cells.iter().enumerate().all(|(c, slot)| {
                slot.as_ref()
                    .map_or(true, |cell| cell.row == r && cell.col as usize == c)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(column_to_letters(0), "A");
        assert_eq!(column_to_letters(25), "Z");
        assert_eq!(column_to_letters(26), "AA");
        assert_eq!(column_to_letters(16383), "XFD");
    }

    #[test]
    fn test_merged_cell_reference() {
        let region = MergedCell::new(3, 3, 1, 1);
        assert_eq!(region.to_string(), "B2:D4");
        assert!(region.contains(2, 2));
        assert!(!region.contains(0, 2));
        assert!(region.overlaps(&MergedCell::new(3, 3, 5, 5)));
        assert!(!region.overlaps(&MergedCell::new(4, 0, 5, 5)));
    }

    #[test]
    fn test_from_parts_renumbers() {
        let mut row = Row::with_len(2);
        row.cells[1] = Some(Cell::new(99, 99, 0));
        let sheet = Worksheet::from_parts("Data", vec![None, Some(row)], ColumnRanges::new(), vec![]);

        assert!(sheet.positions_consistent());
        let cell = sheet.cell(1, 1).unwrap();
        assert_eq!((cell.row, cell.col), (1, 1));
        assert!(sheet.row(0).is_none());
    }
}
