//! Cell creation and cell contents

use super::{check_col, check_row, SheetEditor};
use crate::cell::{Cell, CellInput, CellValue, DataType, MAX_TEXT_LEN};
use crate::datetime::date_to_serial;
use crate::error::{Error, Result};

impl<'a> SheetEditor<'a> {
    /// Create a cell at `(row, col)` holding `value` (or `formula`).
    ///
    /// The new cell takes the row style if the row has one, else the style
    /// of the column range covering `col`, else style 0. With `overwrite`
    /// unset an existing cell is returned untouched.
    pub fn add_cell(
        &mut self,
        row: u32,
        col: u16,
        value: impl Into<CellInput>,
        formula: Option<&str>,
        overwrite: bool,
    ) -> Result<&Cell> {
        let value = value.into();
        self.attached()?;
        check_row(row)?;
        check_col(col)?;
        check_contents(&value, formula)?;

        let date_1904 = self.settings.date_1904;
        let sheet = &mut *self.sheet;
        let col_style = sheet.cols.locate(col).and_then(|r| r.style_index);
        let target = sheet.sheet_data.ensure(row, col);
        let style = target.style_index.or(col_style).unwrap_or(0);

        let slot = &mut target.cells[col as usize];
        if overwrite || slot.is_none() {
            let mut cell = Cell::new(row, col, style);
            set_contents(&mut cell, value, formula, date_1904);
            *slot = Some(cell);
        }
        Ok(slot.get_or_insert_with(|| Cell::new(row, col, style)))
    }

    /// Replace the contents of the cell at `(row, col)`, creating it if
    /// needed. Formatting is kept.
    ///
    /// A formula is stored with no type tag and `value` as its cached
    /// result. Otherwise numbers and dates carry no tag (dates become
    /// serial numbers in the workbook's date system), text is tagged
    /// [`DataType::RawString`] and booleans [`DataType::Boolean`].
    pub fn change_contents(
        &mut self,
        row: u32,
        col: u16,
        value: impl Into<CellInput>,
        formula: Option<&str>,
    ) -> Result<&Cell> {
        let value = value.into();
        check_contents(&value, formula)?;
        self.add_cell(row, col, CellInput::Empty, None, false)?;

        let date_1904 = self.settings.date_1904;
        let cell = self
            .sheet
            .sheet_data
            .cell_mut(row, col)
            .ok_or_else(|| Error::invalid(format!("no cell at ({row}, {col})")))?;
        set_contents(cell, value, formula, date_1904);
        Ok(cell)
    }
}

pub(crate) fn check_contents(value: &CellInput, formula: Option<&str>) -> Result<()> {
    match value {
        CellInput::Text(s) if s.chars().count() > MAX_TEXT_LEN => {
            return Err(Error::invalid(format!(
                "text exceeds {MAX_TEXT_LEN} characters"
            )));
        }
        CellInput::Number(n) if !n.is_finite() => {
            return Err(Error::invalid(format!("cannot store non-finite number {n}")));
        }
        _ => {}
    }
    if let Some(expr) = formula {
        if formula_text(expr).is_empty() {
            return Err(Error::invalid("formula expression cannot be empty"));
        }
    }
    Ok(())
}

fn formula_text(expr: &str) -> &str {
    expr.trim().trim_start_matches('=')
}

fn set_contents(cell: &mut Cell, value: CellInput, formula: Option<&str>, date_1904: bool) {
    let (value, datatype) = match value {
        CellInput::Empty => (CellValue::Empty, None),
        CellInput::Text(s) => (CellValue::Text(s), Some(DataType::RawString)),
        CellInput::Number(n) => (CellValue::Number(n), None),
        CellInput::Boolean(b) => (CellValue::Boolean(b), Some(DataType::Boolean)),
        CellInput::Date(dt) => (CellValue::Number(date_to_serial(dt, date_1904)), None),
    };

    cell.value = value;
    match formula {
        Some(expr) => {
            cell.datatype = None;
            cell.formula = Some(formula_text(expr).to_string());
        }
        None => {
            cell.datatype = datatype;
            cell.formula = None;
        }
    }
}
