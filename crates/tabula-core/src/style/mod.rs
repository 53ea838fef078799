//! Cell styling types
//!
//! This module contains the style records a workbook shares between its
//! rows, columns and cells:
//! - [`Xf`] - Cell format, pointing at the records below by index
//! - [`Font`] - Font settings
//! - [`Fill`] - Background fill
//! - [`Border`] - Cell borders
//! - [`Alignment`] - Text alignment
//! - [`Color`] - Color representation
//!
//! Records are only ever added through the [`StyleRegistry`], which keeps
//! each array free of value-equal duplicates.

mod alignment;
mod border;
mod color;
mod fill;
mod font;
mod number_format;
mod registry;
mod xf;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use border::{Border, BorderEdge, BorderLineStyle, BorderSide};
pub use color::Color;
pub use fill::{Fill, PatternType};
pub use font::{Font, FontChange, FontFlag};
pub use number_format::{
    builtin_format_code, builtin_format_id, NumberFormat, NumberFormats,
    FIRST_CUSTOM_NUM_FMT_ID,
};
pub use registry::StyleRegistry;
pub use xf::Xf;
