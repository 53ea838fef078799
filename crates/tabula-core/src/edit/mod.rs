//! Editing services for worksheets
//!
//! A [`SheetEditor`] pairs one worksheet with the style registry and
//! settings of the workbook that owns it. Structural edits (rows, columns,
//! cells), formatting changes and formatting queries are all methods on the
//! editor:
//!
//! ```
//! use tabula_core::Workbook;
//!
//! let mut wb = Workbook::new();
//! let mut sheet = wb.sheet_editor(0).unwrap();
//!
//! sheet.add_cell(0, 0, "Total", None, true).unwrap();
//! sheet.change_row_fill(0, "ff0000").unwrap();
//! sheet.insert_row(0).unwrap();
//!
//! assert_eq!(sheet.row_fill(1).unwrap(), "ff0000");
//! ```
//!
//! Every operation checks its arguments and the style indices it is about
//! to read before it changes anything, so an `Err` leaves the worksheet and
//! the registry as they were.

mod contents;
mod format;
mod query;
mod structure;

use std::fmt;
use std::str::FromStr;

pub use query::FormatView;

use crate::error::{Error, Result};
use crate::style::StyleRegistry;
use crate::workbook::WorkbookSettings;
use crate::worksheet::Worksheet;
use crate::{MAX_COLS, MAX_ROWS};

/// Editor for one worksheet
#[derive(Debug)]
pub struct SheetEditor<'a> {
    sheet: &'a mut Worksheet,
    styles: Option<&'a mut StyleRegistry>,
    settings: WorkbookSettings,
}

impl<'a> SheetEditor<'a> {
    pub(crate) fn new(
        sheet: &'a mut Worksheet,
        styles: &'a mut StyleRegistry,
        settings: &WorkbookSettings,
    ) -> Self {
        Self {
            sheet,
            styles: Some(styles),
            settings: settings.clone(),
        }
    }

    /// Editor for a worksheet that does not belong to a workbook.
    ///
    /// With no style registry to resolve formatting against, every
    /// operation fails with [`Error::PreconditionFailed`].
    pub fn detached(sheet: &'a mut Worksheet) -> Self {
        Self {
            sheet,
            styles: None,
            settings: WorkbookSettings::default(),
        }
    }

    /// The worksheet being edited
    pub fn sheet(&self) -> &Worksheet {
        self.sheet
    }

    pub fn settings(&self) -> &WorkbookSettings {
        &self.settings
    }

    pub(crate) fn attached(&self) -> Result<()> {
        if self.styles.is_some() {
            Ok(())
        } else {
            Err(Error::detached())
        }
    }

    pub(crate) fn registry(&self) -> Result<&StyleRegistry> {
        self.styles.as_deref().ok_or_else(Error::detached)
    }

    /// The worksheet and the registry, borrowed together
    pub(crate) fn parts(&mut self) -> Result<(&mut Worksheet, &mut StyleRegistry)> {
        match self.styles.as_deref_mut() {
            Some(styles) => Ok((&mut *self.sheet, styles)),
            None => Err(Error::detached()),
        }
    }

    /// Make `(row, col)` addressable.
    ///
    /// Pads the row sequence up to `row`, materializes that row, and pads
    /// every materialized row's cell sequence to at least `col + 1` slots.
    /// No cell is created.
    pub fn ensure_cell_exists(&mut self, row: u32, col: u16) -> Result<()> {
        self.attached()?;
        check_row(row)?;
        check_col(col)?;
        self.sheet.sheet_data.ensure(row, col);
        Ok(())
    }
}

pub(crate) fn check_row(row: u32) -> Result<()> {
    if row >= MAX_ROWS {
        return Err(Error::invalid(format!(
            "row index {row} out of bounds (max {})",
            MAX_ROWS - 1
        )));
    }
    Ok(())
}

pub(crate) fn check_col(col: u16) -> Result<()> {
    if col >= MAX_COLS {
        return Err(Error::invalid(format!(
            "column index {col} out of bounds (max {})",
            MAX_COLS - 1
        )));
    }
    Ok(())
}

/// How existing cells move when a cell is inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertShift {
    /// Overwrite the slot in place
    #[default]
    None,
    /// Push the rest of the row one column to the right
    Right,
    /// Push the rest of the column one row down
    Down,
}

impl FromStr for InsertShift {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(InsertShift::None),
            "right" => Ok(InsertShift::Right),
            "down" => Ok(InsertShift::Down),
            other => Err(Error::invalid(format!("invalid shift option: {other:?}"))),
        }
    }
}

impl fmt::Display for InsertShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InsertShift::None => "none",
            InsertShift::Right => "right",
            InsertShift::Down => "down",
        })
    }
}

/// How existing cells move when a cell is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteShift {
    /// Leave an empty slot
    #[default]
    None,
    /// Pull the rest of the row one column to the left
    Left,
    /// Pull the rest of the column one row up
    Up,
}

impl FromStr for DeleteShift {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(DeleteShift::None),
            "left" => Ok(DeleteShift::Left),
            "up" => Ok(DeleteShift::Up),
            other => Err(Error::invalid(format!("invalid shift option: {other:?}"))),
        }
    }
}

impl fmt::Display for DeleteShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeleteShift::None => "none",
            DeleteShift::Left => "left",
            DeleteShift::Up => "up",
        })
    }
}
