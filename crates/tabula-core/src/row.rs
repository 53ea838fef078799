//! Row types

use crate::cell::Cell;

/// A materialized row
///
/// `cells` is indexed by column; `None` slots are explicit empty cells.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    pub cells: Vec<Option<Cell>>,
    /// Row-level style index (None = no row style)
    pub style_index: Option<u32>,
    /// Custom height in points (None = default)
    pub height: Option<f64>,
    pub custom_height: bool,
}

impl Row {
    /// Create an empty row with no cells
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row of `len` empty slots
    pub fn with_len(len: usize) -> Self {
        Self {
            cells: vec![None; len],
            ..Self::default()
        }
    }

    /// Get a cell by column index
    pub fn cell(&self, col: u16) -> Option<&Cell> {
        self.cells.get(col as usize).and_then(Option::as_ref)
    }

    /// Get a mutable cell by column index
    pub fn cell_mut(&mut self, col: u16) -> Option<&mut Cell> {
        self.cells.get_mut(col as usize).and_then(Option::as_mut)
    }

    /// Number of slots (materialized or empty)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Grow the slot vector so it holds at least `len` entries
    pub fn pad_to(&mut self, len: usize) {
        if self.cells.len() < len {
            self.cells.resize(len, None);
        }
    }

    /// Iterate over the materialized cells
    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    pub fn iter_cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut().flatten()
    }

    /// Effective style of the slot at `col`: the cell's own style if the
    /// slot is materialized, else the row style, else 0
    pub fn slot_style(&self, col: u16) -> u32 {
        self.cell(col)
            .map(|c| c.style_index)
            .unwrap_or_else(|| self.style_index.unwrap_or(0))
    }

    /// Rewrite every cell's cached row number
    pub(crate) fn renumber(&mut self, row: u32) {
        for cell in self.iter_cells_mut() {
            cell.row = row;
        }
    }

    /// Rewrite cached column numbers from slot `from` onward
    pub(crate) fn renumber_columns_from(&mut self, from: usize) {
        for (col, slot) in self.cells.iter_mut().enumerate().skip(from) {
            if let Some(cell) = slot {
                cell.col = col as u16;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_style_fallbacks() {
        let mut row = Row::with_len(3);
        assert_eq!(row.slot_style(1), 0);

        row.style_index = Some(4);
        assert_eq!(row.slot_style(1), 4);
        assert_eq!(row.slot_style(40), 4);

        row.cells[1] = Some(Cell::new(0, 1, 9));
        assert_eq!(row.slot_style(1), 9);
    }

    #[test]
    fn test_renumber_columns() {
        let mut row = Row::with_len(2);
        row.cells.insert(0, Some(Cell::new(5, 0, 0)));
        row.cells[2] = Some(Cell::new(5, 1, 0));
        row.renumber_columns_from(1);
        assert_eq!(row.cell(2).map(|c| c.col), Some(2));
        assert_eq!(row.cell(0).map(|c| c.col), Some(0));
    }
}
