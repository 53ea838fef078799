//! Row, column and cell insertion and deletion

use log::debug;

use super::{check_col, check_row, DeleteShift, InsertShift, SheetEditor};
use crate::cell::{Cell, CellInput, DataType};
use crate::error::Result;
use crate::row::Row;
use crate::worksheet::MergedCell;
use crate::{MAX_COLS, MAX_ROWS};

impl<'a> SheetEditor<'a> {
    /// Insert a row at `index`, pushing rows at and below it down.
    ///
    /// The new row copies the formatting (not the values) of the row above
    /// it, including the row style. Inserting at the top, or below a
    /// missing row, yields empty slots as wide as row 0.
    pub fn insert_row(&mut self, index: u32) -> Result<&Row> {
        self.attached()?;
        check_row(index)?;

        let data = &mut self.sheet.sheet_data;
        let at = index as usize;
        if data.rows.len() < at {
            data.rows.resize(at, None);
        }

        let above = index.checked_sub(1).and_then(|i| data.row(i));
        let new_row = match above {
            Some(above) => Row {
                cells: above
                    .cells
                    .iter()
                    .enumerate()
                    .map(|(col, slot)| slot.as_ref().map(|c| c.style_copy(index, col as u16)))
                    .collect(),
                style_index: above.style_index,
                ..Row::default()
            },
            None => Row::with_len(data.row(0).map_or(0, Row::len)),
        };

        data.rows.insert(at, Some(new_row));
        data.rows.truncate(MAX_ROWS as usize);
        data.renumber_from(at + 1);
        debug!("inserted row {index} in {:?}", self.sheet.name());

        Ok(self.sheet.sheet_data.rows[at].get_or_insert_with(Row::new))
    }

    /// Delete the row at `index`, pulling rows below it up.
    ///
    /// Returns the removed row, or `None` if the slot was empty or beyond
    /// the last row.
    pub fn delete_row(&mut self, index: u32) -> Result<Option<Row>> {
        self.attached()?;
        check_row(index)?;

        let data = &mut self.sheet.sheet_data;
        let at = index as usize;
        if at >= data.rows.len() {
            return Ok(None);
        }

        let removed = data.rows.remove(at);
        data.renumber_from(at);
        debug!("deleted row {index} in {:?}", self.sheet.name());
        Ok(removed)
    }

    /// Insert a column at `col`, pushing columns at and after it right.
    ///
    /// In each materialized row the new slot gets a cell carrying the
    /// style of the column to the left, but only when that style is set
    /// and differs from what the slot already shows (the cell there, else
    /// the row style). Column ranges are renumbered.
    pub fn insert_column(&mut self, col: u16) -> Result<()> {
        self.attached()?;
        check_col(col)?;

        let sheet = &mut *self.sheet;
        sheet.sheet_data.ensure(0, col);

        let left_style = col.checked_sub(1).map_or(0, |c| sheet.cols.style_of(c));

        for (row_index, slot) in sheet.sheet_data.rows.iter_mut().enumerate() {
            let Some(row) = slot else { continue };

            let new_cell = (left_style != 0 && left_style != row.slot_style(col)).then(|| Cell {
                datatype: Some(DataType::SharedString),
                ..Cell::new(row_index as u32, col, left_style)
            });

            row.pad_to(col as usize);
            row.cells.insert(col as usize, new_cell);
            row.cells.truncate(MAX_COLS as usize);
            row.renumber_columns_from(col as usize + 1);
        }

        sheet.cols.insert_column(col);
        debug!("inserted column {col} in {:?}", sheet.name());
        Ok(())
    }

    /// Delete the column at `col`, pulling columns after it left
    pub fn delete_column(&mut self, col: u16) -> Result<()> {
        self.attached()?;
        check_col(col)?;

        let sheet = &mut *self.sheet;
        for row in sheet.sheet_data.iter_rows_mut() {
            if (col as usize) < row.cells.len() {
                row.cells.remove(col as usize);
                row.renumber_columns_from(col as usize);
            }
        }

        sheet.cols.delete_column(col);
        debug!("deleted column {col} in {:?}", sheet.name());
        Ok(())
    }

    /// Insert a cell at `(row, col)` holding `value` (or `formula`).
    ///
    /// With [`InsertShift::Right`] the rest of the row moves right; with
    /// [`InsertShift::Down`] the rest of the column moves down, growing the
    /// sheet by one row. [`InsertShift::None`] overwrites the slot.
    pub fn insert_cell(
        &mut self,
        row: u32,
        col: u16,
        value: impl Into<CellInput>,
        formula: Option<&str>,
        shift: InsertShift,
    ) -> Result<&Cell> {
        let value = value.into();
        self.attached()?;
        check_row(row)?;
        check_col(col)?;
        super::contents::check_contents(&value, formula)?;

        let data = &mut self.sheet.sheet_data;
        let target = data.ensure(row, col);
        let width = target.len();

        match shift {
            InsertShift::None => {}
            InsertShift::Right => {
                target.cells.insert(col as usize, None);
                target.cells.truncate(MAX_COLS as usize);
                target.renumber_columns_from(col as usize + 1);
            }
            InsertShift::Down => {
                data.rows.push(Some(Row::with_len(width)));
                let last = data.rows.len() - 1;
                for r in (row as usize + 1..=last).rev() {
                    // Slot `r` was emptied on the previous step
                    let Some(mut moved) = data.rows[r - 1]
                        .as_mut()
                        .and_then(|above| above.cells.get_mut(col as usize))
                        .and_then(Option::take)
                    else {
                        continue;
                    };
                    moved.row = r as u32;
                    let below = data.rows[r].get_or_insert_with(Row::new);
                    below.pad_to(col as usize + 1);
                    below.cells[col as usize] = Some(moved);
                }
                data.rows.truncate(MAX_ROWS as usize);
            }
        }
        debug!("inserted cell ({row}, {col}) shifting {shift}");

        self.add_cell(row, col, value, formula, true)
    }

    /// Delete the cell at `(row, col)` and return it.
    ///
    /// With [`DeleteShift::Left`] the rest of the row moves left; with
    /// [`DeleteShift::Up`] the rest of the column moves up and the bottom
    /// slot is left empty.
    pub fn delete_cell(&mut self, row: u32, col: u16, shift: DeleteShift) -> Result<Option<Cell>> {
        self.attached()?;
        check_row(row)?;
        check_col(col)?;

        let data = &mut self.sheet.sheet_data;
        let c = col as usize;

        let removed = match shift {
            DeleteShift::Up => {
                let removed = data
                    .row_mut(row)
                    .and_then(|target| target.cells.get_mut(c))
                    .and_then(Option::take);
                // The column moves up whether or not the target slot exists
                for r in row as usize..data.rows.len().saturating_sub(1) {
                    let Some(mut moved) = data.rows[r + 1]
                        .as_mut()
                        .and_then(|below| below.cells.get_mut(c))
                        .and_then(Option::take)
                    else {
                        continue;
                    };
                    moved.row = r as u32;
                    let here = data.rows[r].get_or_insert_with(Row::new);
                    here.pad_to(c + 1);
                    here.cells[c] = Some(moved);
                }
                removed
            }
            DeleteShift::None | DeleteShift::Left => {
                let Some(target) = data.row_mut(row).filter(|t| c < t.cells.len()) else {
                    return Ok(None);
                };
                if shift == DeleteShift::Left {
                    let removed = target.cells.remove(c);
                    target.renumber_columns_from(c);
                    removed
                } else {
                    target.cells[c].take()
                }
            }
        };
        debug!("deleted cell ({row}, {col}) shifting {shift}");
        Ok(removed)
    }

    /// Record `(start_row, start_col)..=(end_row, end_col)` as a merged
    /// region. Overlapping and repeated regions are accepted as given.
    pub fn merge_cells(
        &mut self,
        start_row: u32,
        start_col: u16,
        end_row: u32,
        end_col: u16,
    ) -> Result<MergedCell> {
        self.attached()?;
        check_row(start_row)?;
        check_row(end_row)?;
        check_col(start_col)?;
        check_col(end_col)?;

        let region = MergedCell::new(start_row, start_col, end_row, end_col);
        if self.sheet.merged_cells.iter().any(|m| m.overlaps(&region)) {
            debug!("merged region {region} overlaps an existing one");
        }
        self.sheet.merged_cells.push(region);
        debug!("merged {region} in {:?}", self.sheet.name());
        Ok(region)
    }

    /// Remove every merged region equal to the given rectangle; returns how
    /// many were removed
    pub fn unmerge_cells(
        &mut self,
        start_row: u32,
        start_col: u16,
        end_row: u32,
        end_col: u16,
    ) -> Result<usize> {
        self.attached()?;
        let region = MergedCell::new(start_row, start_col, end_row, end_col);
        let before = self.sheet.merged_cells.len();
        self.sheet.merged_cells.retain(|m| *m != region);
        Ok(before - self.sheet.merged_cells.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::cell::{CellValue, DataType};
    use crate::edit::{DeleteShift, InsertShift};
    use crate::error::Error;
    use crate::workbook::Workbook;

    fn text(wb: &Workbook, row: u32, col: u16) -> Option<String> {
        wb.worksheet(0)
            .and_then(|ws| ws.cell(row, col))
            .and_then(|c| c.value.as_text().map(str::to_string))
    }

    #[test]
    fn test_insert_row_shifts_and_renumbers() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.add_cell(0, 0, "a", None, true).unwrap();
        sheet.add_cell(1, 0, "b", None, true).unwrap();
        sheet.insert_row(1).unwrap();

        assert!(sheet.sheet().positions_consistent());
        drop(sheet);
        assert_eq!(text(&wb, 0, 0).as_deref(), Some("a"));
        assert_eq!(text(&wb, 2, 0).as_deref(), Some("b"));
        // New row carries the style copy but no value
        let copied = wb.worksheet(0).unwrap().cell(1, 0).unwrap();
        assert_eq!(copied.value, CellValue::Empty);
        assert_eq!(copied.row, 1);
    }

    #[test]
    fn test_insert_row_copies_row_above_formatting() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.add_cell(2, 1, "x", None, true).unwrap();
        sheet.change_row_fill(2, "00ff00").unwrap();
        let row = sheet.insert_row(3).unwrap();

        assert!(row.style_index.is_some());
        assert_eq!(row.len(), 2);
        assert!(row.cell(0).is_none());
        let styled = row.cell(1).unwrap().style_index;
        assert_eq!(sheet.cell_fill(3, 1).unwrap(), "00ff00");
        assert_ne!(styled, 0);
    }

    #[test]
    fn test_insert_row_past_end_pads() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.add_cell(0, 2, 1.0, None, true).unwrap();
        let row = sheet.insert_row(5).unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(sheet.sheet().sheet_data().len(), 6);
        assert!(sheet.sheet().row(4).is_none());
    }

    #[test]
    fn test_delete_row() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.add_cell(0, 0, "a", None, true).unwrap();
        sheet.add_cell(1, 0, "b", None, true).unwrap();
        sheet.add_cell(2, 0, "c", None, true).unwrap();

        let removed = sheet.delete_row(1).unwrap().unwrap();
        assert_eq!(removed.cell(0).unwrap().value, CellValue::Text("b".into()));
        assert!(sheet.sheet().positions_consistent());
        assert!(sheet.delete_row(10).unwrap().is_none());

        drop(sheet);
        assert_eq!(text(&wb, 1, 0).as_deref(), Some("c"));
    }

    #[test]
    fn test_insert_column_shifts_cells() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.add_cell(0, 0, "a", None, true).unwrap();
        sheet.add_cell(0, 1, "b", None, true).unwrap();
        sheet.insert_column(1).unwrap();

        assert!(sheet.sheet().positions_consistent());
        drop(sheet);
        assert_eq!(text(&wb, 0, 0).as_deref(), Some("a"));
        assert_eq!(text(&wb, 0, 1), None);
        assert_eq!(text(&wb, 0, 2).as_deref(), Some("b"));
    }

    #[test]
    fn test_insert_column_takes_left_column_style() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.add_cell(0, 0, "a", None, true).unwrap();
        sheet.add_cell(1, 0, "b", None, true).unwrap();
        sheet.change_column_fill(0, "0000ff").unwrap();
        let left = sheet.sheet().column_ranges().style_of(0);

        sheet.insert_column(1).unwrap();

        let data = sheet.sheet().sheet_data();
        let created = data.cell(0, 1).unwrap();
        assert_eq!(created.style_index, left);
        assert_eq!(created.datatype, Some(DataType::SharedString));
        assert_eq!((created.row, created.col), (0, 1));
        assert_eq!(data.cell(1, 1).unwrap().row, 1);
        // The range covering column 0 grew over the new column
        assert_eq!(sheet.sheet().column_ranges().style_of(1), left);
    }

    #[test]
    fn test_insert_column_skips_slot_with_same_style() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.change_column_fill(0, "0000ff").unwrap();
        sheet.change_row_fill(1, "0000ff").unwrap();
        let left = sheet.sheet().column_ranges().style_of(0);
        assert_eq!(sheet.sheet().row(1).unwrap().style_index, Some(left));

        sheet.insert_column(1).unwrap();
        assert_eq!(sheet.sheet().cell(0, 1).map(|c| c.style_index), Some(left));
        assert!(sheet.sheet().cell(1, 1).is_none());
    }

    #[test]
    fn test_delete_column() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        for col in 0..3u16 {
            sheet.add_cell(0, col, col as f64, None, true).unwrap();
        }
        sheet.delete_column(1).unwrap();

        let row = sheet.sheet().row(0).unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(row.cell(1).unwrap().value, CellValue::Number(2.0));
        assert!(sheet.sheet().positions_consistent());
    }

    #[test]
    fn test_delete_column_removes_single_range() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.change_column_width(2, 20.0).unwrap();
        sheet.change_column_width(4, 30.0).unwrap();
        sheet.delete_column(2).unwrap();

        let spans: Vec<_> = sheet
            .sheet()
            .column_ranges()
            .iter()
            .map(|r| (r.start, r.end))
            .collect();
        assert_eq!(spans, vec![(3, 3)]);
        assert_eq!(sheet.column_width(3).unwrap(), 30.0);
    }

    #[test]
    fn test_insert_cell_shift_right() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.add_cell(0, 0, "a", None, true).unwrap();
        sheet.add_cell(0, 1, "b", None, true).unwrap();
        sheet.insert_cell(0, 0, "new", None, InsertShift::Right).unwrap();

        assert!(sheet.sheet().positions_consistent());
        drop(sheet);
        assert_eq!(text(&wb, 0, 0).as_deref(), Some("new"));
        assert_eq!(text(&wb, 0, 1).as_deref(), Some("a"));
        assert_eq!(text(&wb, 0, 2).as_deref(), Some("b"));
    }

    #[test]
    fn test_insert_cell_shift_down() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.add_cell(0, 0, "a", None, true).unwrap();
        sheet.add_cell(2, 0, "c", None, true).unwrap();
        sheet.add_cell(2, 1, "side", None, true).unwrap();
        sheet.insert_cell(0, 0, "new", None, InsertShift::Down).unwrap();

        assert!(sheet.sheet().positions_consistent());
        assert_eq!(sheet.sheet().sheet_data().len(), 4);
        drop(sheet);
        assert_eq!(text(&wb, 0, 0).as_deref(), Some("new"));
        assert_eq!(text(&wb, 1, 0).as_deref(), Some("a"));
        assert_eq!(text(&wb, 2, 0), None);
        assert_eq!(text(&wb, 3, 0).as_deref(), Some("c"));
        // Other columns stay put
        assert_eq!(text(&wb, 2, 1).as_deref(), Some("side"));
    }

    #[test]
    fn test_insert_cell_shift_down_keeps_gaps_sparse() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.add_cell(0, 0, "a", None, true).unwrap();
        sheet.add_cell(4, 1, "far", None, true).unwrap();
        sheet.insert_cell(0, 0, "new", None, InsertShift::Down).unwrap();

        assert!(sheet.sheet().row(2).is_none());
        assert!(sheet.sheet().row(3).is_none());
        assert!(sheet.sheet().positions_consistent());
        drop(sheet);
        assert_eq!(text(&wb, 1, 0).as_deref(), Some("a"));
        assert_eq!(text(&wb, 4, 1).as_deref(), Some("far"));
    }

    #[test]
    fn test_insert_cell_validates_first() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        let long = "x".repeat(32_768);
        assert!(matches!(
            sheet.insert_cell(0, 0, long, None, InsertShift::Down),
            Err(Error::InvalidArgument(_))
        ));
        assert!(sheet.sheet().sheet_data().is_empty());
    }

    #[test]
    fn test_delete_cell_shifts() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        for col in 0..3u16 {
            sheet.add_cell(0, col, col as f64, None, true).unwrap();
        }
        let removed = sheet.delete_cell(0, 0, DeleteShift::Left).unwrap().unwrap();
        assert_eq!(removed.value, CellValue::Number(0.0));
        assert_eq!(sheet.sheet().cell(0, 0).unwrap().value, CellValue::Number(1.0));
        assert!(sheet.sheet().positions_consistent());

        let removed = sheet.delete_cell(0, 1, DeleteShift::None).unwrap();
        assert!(removed.is_some());
        assert!(sheet.sheet().cell(0, 1).is_none());
        assert!(sheet.delete_cell(7, 0, DeleteShift::Up).unwrap().is_none());
    }

    #[test]
    fn test_delete_cell_shift_up_leaves_bottom_empty() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.add_cell(0, 0, "a", None, true).unwrap();
        sheet.add_cell(1, 0, "b", None, true).unwrap();
        sheet.add_cell(2, 0, "c", None, true).unwrap();
        sheet.delete_cell(0, 0, DeleteShift::Up).unwrap();

        assert!(sheet.sheet().positions_consistent());
        drop(sheet);
        assert_eq!(text(&wb, 0, 0).as_deref(), Some("b"));
        assert_eq!(text(&wb, 1, 0).as_deref(), Some("c"));
        assert_eq!(text(&wb, 2, 0), None);
    }

    #[test]
    fn test_column_index_bounds() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        assert!(matches!(
            sheet.insert_column(16_384),
            Err(Error::InvalidArgument(_))
        ));
        assert!(sheet.delete_column(16_384).is_err());
    }

    #[test]
    fn test_ranges_follow_column_edits() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.change_column_width(3, 12.0).unwrap();
        sheet.insert_column(0).unwrap();
        assert_eq!(
            sheet.sheet().column_ranges().locate(4).map(|r| (r.start, r.end)),
            Some((4, 4))
        );
    }

    #[test]
    fn test_merge_is_permissive() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        let region = sheet.merge_cells(3, 3, 1, 1).unwrap();
        assert_eq!(region.to_string(), "B2:D4");
        sheet.merge_cells(1, 1, 3, 3).unwrap();
        sheet.merge_cells(2, 2, 5, 5).unwrap();
        assert_eq!(sheet.sheet().merged_cells().len(), 3);

        assert_eq!(sheet.unmerge_cells(1, 1, 3, 3).unwrap(), 2);
        assert_eq!(sheet.sheet().merged_cells().len(), 1);
        assert_eq!(sheet.unmerge_cells(0, 0, 0, 0).unwrap(), 0);
    }
}
