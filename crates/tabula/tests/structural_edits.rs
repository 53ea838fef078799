//! End-to-end tests for row, column and cell insertion and deletion

use pretty_assertions::assert_eq;
use tabula::prelude::*;

fn texts(wb: &Workbook, row: u32) -> Vec<Option<String>> {
    let sheet = wb.worksheet(0).unwrap();
    match sheet.row(row) {
        Some(r) => (0..r.len() as u16)
            .map(|c| r.cell(c).and_then(|cell| cell.value.as_text().map(str::to_string)))
            .collect(),
        None => Vec::new(),
    }
}

fn s(v: &str) -> Option<String> {
    Some(v.to_string())
}

/// Build a 3x3 grid of "r{row}c{col}" texts
fn grid() -> Workbook {
    let mut wb = Workbook::new();
    wb.edit_sheet(0, |sheet| {
        for row in 0..3u32 {
            for col in 0..3u16 {
                sheet.add_cell(row, col, format!("r{row}c{col}"), None, true)?;
            }
        }
        Ok(())
    })
    .unwrap();
    wb
}

#[test]
fn test_insert_and_delete_row_round_trip() {
    let mut wb = grid();
    let before: Vec<_> = (0..3).map(|r| texts(&wb, r)).collect();

    wb.edit_sheet(0, |sheet| {
        sheet.insert_row(1)?;
        assert_eq!(sheet.sheet().sheet_data().len(), 4);
        sheet.delete_row(1)?;
        Ok(())
    })
    .unwrap();

    let after: Vec<_> = (0..3).map(|r| texts(&wb, r)).collect();
    assert_eq!(before, after);
    assert!(wb.worksheet(0).unwrap().positions_consistent());
}

#[test]
fn test_insert_column_in_grid() {
    let mut wb = grid();
    wb.edit_sheet(0, |sheet| sheet.insert_column(0)).unwrap();

    assert_eq!(texts(&wb, 0), vec![None, s("r0c0"), s("r0c1"), s("r0c2")]);
    assert_eq!(texts(&wb, 2), vec![None, s("r2c0"), s("r2c1"), s("r2c2")]);
    assert!(wb.worksheet(0).unwrap().positions_consistent());
}

#[test]
fn test_delete_column_in_grid() {
    let mut wb = grid();
    wb.edit_sheet(0, |sheet| sheet.delete_column(1)).unwrap();

    assert_eq!(texts(&wb, 1), vec![s("r1c0"), s("r1c2")]);
    let cell = wb.worksheet(0).unwrap().cell(1, 1).unwrap();
    assert_eq!((cell.row, cell.col), (1, 1));
}

#[test]
fn test_insert_cell_down_only_moves_one_column() {
    let mut wb = grid();
    wb.edit_sheet(0, |sheet| {
        sheet.insert_cell(1, 2, "new", None, InsertShift::Down)?;
        Ok(())
    })
    .unwrap();

    assert_eq!(texts(&wb, 0), vec![s("r0c0"), s("r0c1"), s("r0c2")]);
    assert_eq!(texts(&wb, 1), vec![s("r1c0"), s("r1c1"), s("new")]);
    assert_eq!(texts(&wb, 2), vec![s("r2c0"), s("r2c1"), s("r1c2")]);
    assert_eq!(texts(&wb, 3), vec![None, None, s("r2c2")]);
    assert!(wb.worksheet(0).unwrap().positions_consistent());
}

#[test]
fn test_delete_cell_up_and_left() {
    let mut wb = grid();
    let removed = wb
        .edit_sheet(0, |sheet| sheet.delete_cell(0, 1, DeleteShift::Up))
        .unwrap()
        .unwrap();
    assert_eq!(removed.value, CellValue::Text("r0c1".into()));
    assert_eq!(texts(&wb, 0), vec![s("r0c0"), s("r1c1"), s("r0c2")]);
    assert_eq!(texts(&wb, 2), vec![s("r2c0"), None, s("r2c2")]);

    wb.edit_sheet(0, |sheet| sheet.delete_cell(2, 0, DeleteShift::Left))
        .unwrap();
    assert_eq!(texts(&wb, 2), vec![None, s("r2c2")]);
    assert!(wb.worksheet(0).unwrap().positions_consistent());
}

#[test]
fn test_delete_cell_up_from_missing_row() {
    let mut wb = Workbook::new();
    let removed = wb
        .edit_sheet(0, |sheet| {
            sheet.add_cell(1, 0, "b", None, true)?;
            sheet.add_cell(2, 0, "c", None, true)?;
            sheet.delete_cell(0, 0, DeleteShift::Up)
        })
        .unwrap();

    assert!(removed.is_none());
    assert_eq!(texts(&wb, 0), vec![s("b")]);
    assert_eq!(texts(&wb, 1), vec![s("c")]);
    assert_eq!(texts(&wb, 2), vec![None]);
    assert!(wb.worksheet(0).unwrap().positions_consistent());
}

#[test]
fn test_delete_cell_up_from_short_row() {
    let mut wb = Workbook::new();
    wb.edit_sheet(0, |sheet| {
        sheet.add_cell(1, 3, "x", None, true)?;
        sheet.add_cell(0, 0, "a", None, true)?;
        assert_eq!(sheet.sheet().row(0).unwrap().len(), 1);
        sheet.delete_cell(0, 3, DeleteShift::Up).map(drop)
    })
    .unwrap();

    assert_eq!(texts(&wb, 0), vec![s("a"), None, None, s("x")]);
    assert_eq!(texts(&wb, 1), vec![None, None, None, None]);
    let sheet = wb.worksheet(0).unwrap();
    assert_eq!(sheet.cell(0, 3).map(|c| c.row), Some(0));
    assert!(sheet.positions_consistent());
}

#[test]
fn test_shift_strings() {
    let mut wb = grid();
    let shift: InsertShift = "right".parse().unwrap();
    wb.edit_sheet(0, |sheet| {
        sheet.insert_cell(0, 0, "first", None, shift)?;
        Ok(())
    })
    .unwrap();
    assert_eq!(
        texts(&wb, 0),
        vec![s("first"), s("r0c0"), s("r0c1"), s("r0c2")]
    );

    assert!(matches!(
        "sideways".parse::<InsertShift>(),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        "down".parse::<DeleteShift>(),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_rejected_edits_leave_sheet_untouched() {
    let mut wb = grid();
    let before = wb.worksheet(0).unwrap().clone();

    wb.edit_sheet(0, |sheet| {
        assert!(sheet.insert_row(tabula::MAX_ROWS).is_err());
        assert!(sheet.insert_column(tabula::MAX_COLS).is_err());
        assert!(sheet
            .insert_cell(0, 0, f64::INFINITY, None, InsertShift::Right)
            .is_err());
        assert!(sheet.change_row_fill(0, "red").is_err());
        assert!(sheet.change_column_font_size(0, -3.0).is_err());
        Ok(())
    })
    .unwrap();

    assert_eq!(wb.worksheet(0).unwrap(), &before);
}

#[test]
fn test_detached_worksheet_rejects_edits() {
    let mut ws = Worksheet::new("Loose");
    let mut sheet = SheetEditor::detached(&mut ws);

    assert!(matches!(
        sheet.insert_row(0),
        Err(Error::PreconditionFailed(_))
    ));
    assert!(matches!(
        sheet.add_cell(0, 0, "x", None, true),
        Err(Error::PreconditionFailed(_))
    ));
    assert!(matches!(
        sheet.merge_cells(0, 0, 1, 1),
        Err(Error::PreconditionFailed(_))
    ));
    assert!(ws.sheet_data().is_empty());
}
