//! # tabula-core
//!
//! In-memory document model and style engine for the tabula spreadsheet
//! library.
//!
//! This crate provides:
//! - [`Workbook`], [`Worksheet`] - The document tree (sheets, sparse rows, cells,
//!   column ranges and merged regions)
//! - [`StyleRegistry`] - Deduplicated fonts, fills, borders and cell formats
//! - [`SheetEditor`] - Structural edits, formatting changes and formatting queries
//! - [`legacy_password_hash`] - The legacy sheet-protection password digest
//!
//! ## Example
//!
//! ```rust
//! use tabula_core::{InsertShift, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let mut sheet = workbook.sheet_editor(0).unwrap();
//!
//! sheet.add_cell(0, 0, "Hello", None, true).unwrap();
//! sheet.insert_cell(0, 0, 42.0, None, InsertShift::Right).unwrap();
//! sheet.change_cell_bold(0, 1, true).unwrap();
//!
//! assert!(sheet.is_cell_bolded(0, 1).unwrap());
//! assert_eq!(sheet.sheet().cell(0, 1).unwrap().value.as_text(), Some("Hello"));
//! ```

pub mod cell;
pub mod column;
pub mod datetime;
pub mod edit;
pub mod error;
pub mod protection;
pub mod row;
pub mod style;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{Cell, CellInput, CellValue, DataType};
pub use column::{ColumnRange, ColumnRanges};
pub use edit::{DeleteShift, FormatView, InsertShift, SheetEditor};
pub use error::{Error, Result};
pub use protection::legacy_password_hash;
pub use row::Row;
pub use workbook::{Workbook, WorkbookSettings};
pub use worksheet::{MergedCell, SheetData, Worksheet};

// Re-export all style types for convenience
pub use style::{
    Alignment, Border, BorderEdge, BorderLineStyle, BorderSide, Color, Fill, Font, FontChange,
    FontFlag, HorizontalAlignment, NumberFormat, PatternType, StyleRegistry, VerticalAlignment,
    Xf,
};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
