//! # tabula
//!
//! An in-memory spreadsheet document model: workbooks, sparse worksheets,
//! structural edits and deduplicated cell formatting.
//!
//! ## Features
//!
//! - Insert and delete rows, columns and single cells with shifting
//! - Row, column and cell formatting (fill, font, border, alignment, number
//!   format, dimensions) backed by a deduplicating style registry
//! - Formatting queries that resolve cell, row and column defaults
//! - Legacy protection password hashing
//!
//! ## Example
//!
//! ```rust
//! use tabula::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! workbook
//!     .edit_sheet_by_name("Sheet1", |sheet| {
//!         sheet.add_cell(0, 0, "Region", None, true)?;
//!         sheet.add_cell(0, 1, 1250.5, None, true)?;
//!         sheet.change_row_bold(0, true)?;
//!         sheet.insert_row(0)?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let sheet = workbook.worksheet(0).unwrap();
//! assert_eq!(sheet.cell(1, 0).unwrap().value.as_text(), Some("Region"));
//! ```

pub mod editing;
pub mod prelude;

pub use editing::WorkbookEditExt;

// Re-export core types
pub use tabula_core::{
    legacy_password_hash,
    Alignment,
    Border,
    BorderEdge,
    BorderLineStyle,
    BorderSide,
    // Cell types
    Cell,
    CellInput,
    CellValue,
    Color,
    ColumnRange,
    ColumnRanges,
    DataType,
    DeleteShift,
    // Error types
    Error,
    Fill,
    Font,
    FontChange,
    FontFlag,
    FormatView,
    HorizontalAlignment,
    // Editing
    InsertShift,
    MergedCell,
    NumberFormat,
    PatternType,
    Result,
    Row,
    SheetData,
    SheetEditor,
    // Style types
    StyleRegistry,
    VerticalAlignment,
    // Main types
    Workbook,
    WorkbookSettings,
    Worksheet,
    Xf,

    MAX_COLS,
    // Constants
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

pub use tabula_core::{cell, column, datetime, edit, error, protection, row, style, workbook, worksheet};
