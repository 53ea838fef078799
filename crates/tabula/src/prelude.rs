//! Prelude module - common imports for tabula users
//!
//! ```rust
//! use tabula::prelude::*;
//! ```

pub use crate::{
    // Style types
    Alignment,
    BorderLineStyle,
    BorderSide,
    // Cell types
    CellInput,
    CellValue,
    Color,
    DeleteShift,

    // Error types
    Error,
    HorizontalAlignment,
    // Editing
    InsertShift,
    Result,
    SheetEditor,
    VerticalAlignment,
    // Main types
    Workbook,
    // Extension traits
    WorkbookEditExt,
    WorkbookSettings,
    Worksheet,
};
