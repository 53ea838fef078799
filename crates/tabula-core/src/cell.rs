//! Cell types
//!
//! This module contains:
//! - [`Cell`] - A materialized cell with its cached position and style
//! - [`CellValue`] - The value stored in a cell
//! - [`CellInput`] - Values accepted by content-changing operations
//! - [`DataType`] - The file-level type tag of a cell's raw value

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// Maximum number of characters a text cell may hold
pub const MAX_TEXT_LEN: usize = 32_767;

/// The file-level type tag of a cell's raw value
///
/// `None` on a [`Cell`] means "number" for plain values and "computed" for
/// formula cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    SharedString,
    RawString,
    InlineString,
    Boolean,
    Number,
    Error,
    Date,
}

impl DataType {
    /// Attribute value used in the file format
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::SharedString => "s",
            DataType::RawString => "str",
            DataType::InlineString => "inlineStr",
            DataType::Boolean => "b",
            DataType::Number => "n",
            DataType::Error => "e",
            DataType::Date => "d",
        }
    }
}

/// The value stored in a cell
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    #[default]
    Empty,
    Boolean(bool),
    /// Numeric value (dates are stored as serial numbers)
    Number(f64),
    Text(String),
    /// Error literal such as `#N/A`
    Error(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Boolean(true) => write!(f, "TRUE"),
            CellValue::Boolean(false) => write!(f, "FALSE"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Error(e) => write!(f, "{e}"),
        }
    }
}

/// A value handed to [`change_contents`](crate::edit::SheetEditor::change_contents)
/// or the cell-inserting operations
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellInput {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Boolean(bool),
    /// Converted to a serial number in the workbook's date system
    Date(NaiveDateTime),
}

impl From<&str> for CellInput {
    fn from(s: &str) -> Self {
        CellInput::Text(s.to_string())
    }
}

impl From<String> for CellInput {
    fn from(s: String) -> Self {
        CellInput::Text(s)
    }
}

impl From<f64> for CellInput {
    fn from(n: f64) -> Self {
        CellInput::Number(n)
    }
}

impl From<i32> for CellInput {
    fn from(n: i32) -> Self {
        CellInput::Number(n as f64)
    }
}

impl From<bool> for CellInput {
    fn from(b: bool) -> Self {
        CellInput::Boolean(b)
    }
}

impl From<NaiveDateTime> for CellInput {
    fn from(dt: NaiveDateTime) -> Self {
        CellInput::Date(dt)
    }
}

impl From<NaiveDate> for CellInput {
    fn from(d: NaiveDate) -> Self {
        CellInput::Date(d.and_time(chrono::NaiveTime::MIN))
    }
}

impl<T: Into<CellInput>> From<Option<T>> for CellInput {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellInput::Empty)
    }
}

/// A materialized cell
///
/// `row` and `col` cache the cell's position; structural edits keep them
/// equal to the cell's actual slot in its worksheet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: u32,
    pub col: u16,
    /// Index into the workbook's cell formats
    pub style_index: u32,
    pub value: CellValue,
    pub datatype: Option<DataType>,
    /// Formula expression without the leading `=`
    pub formula: Option<String>,
}

impl Cell {
    /// Create an empty cell with the given style
    pub fn new(row: u32, col: u16, style_index: u32) -> Self {
        Self {
            row,
            col,
            style_index,
            value: CellValue::Empty,
            datatype: None,
            formula: None,
        }
    }

    /// A value-less copy of this cell's formatting at another position
    pub fn style_copy(&self, row: u32, col: u16) -> Self {
        Self::new(row, col, self.style_index)
    }

    /// Clear value, type tag and formula, keeping the style
    pub fn clear_contents(&mut self) {
        self.value = CellValue::Empty;
        self.datatype = None;
        self.formula = None;
    }

    pub fn has_formula(&self) -> bool {
        self.formula.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_conversions() {
        assert_eq!(CellInput::from("abc"), CellInput::Text("abc".into()));
        assert_eq!(CellInput::from(3), CellInput::Number(3.0));
        assert_eq!(CellInput::from(None::<f64>), CellInput::Empty);

        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            CellInput::from(date),
            CellInput::Date(date.and_hms_opt(0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_style_copy_drops_contents() {
        let mut cell = Cell::new(3, 2, 7);
        cell.value = CellValue::Text("hello".into());
        cell.datatype = Some(DataType::RawString);

        let copy = cell.style_copy(4, 2);
        assert_eq!(copy, Cell::new(4, 2, 7));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(CellValue::Boolean(true).to_string(), "TRUE");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Empty.to_string(), "");
    }
}
