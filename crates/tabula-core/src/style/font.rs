//! Font records and the tri-state boolean attribute encoding

use super::Color;
use crate::error::{Error, Result};

/// Encoding of a boolean font attribute (`<b>`, `<i>`, `<u>`, `<strike>`).
///
/// The file format distinguishes three spellings:
///
/// | Encoding | Markup | Effective value |
/// |----------|--------|-----------------|
/// | [`FontFlag::Absent`] | no element | `false` |
/// | [`FontFlag::Present`] | `<b/>` | `true` |
/// | [`FontFlag::Explicit`] | `<b val="0"/>` | the payload |
///
/// Setters always produce `Explicit`, so an explicit `false` stays
/// distinguishable from an absent attribute even though both read as off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontFlag {
    #[default]
    Absent,
    Present,
    Explicit(bool),
}

impl FontFlag {
    /// Effective boolean value
    pub fn is_on(self) -> bool {
        match self {
            FontFlag::Absent => false,
            FontFlag::Present => true,
            FontFlag::Explicit(val) => val,
        }
    }

    /// The form written by every setter
    pub fn explicit(val: bool) -> Self {
        FontFlag::Explicit(val)
    }
}

/// Font record
///
/// Fields are optional because the marshaling layer only fills in what the
/// file actually contains.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Font {
    /// Font family name (e.g., "Calibri", "Arial")
    pub name: Option<String>,
    /// Font size in points
    pub size: Option<f64>,
    /// Font color
    pub color: Option<Color>,
    pub bold: FontFlag,
    pub italic: FontFlag,
    pub underline: FontFlag,
    pub strikethrough: FontFlag,
}

impl Font {
    /// Create an empty font record
    pub fn new() -> Self {
        Self::default()
    }

    /// Font used by record 0 of a fresh registry
    pub fn default_font() -> Self {
        Self::new().with_name("Calibri").with_size(11.0)
    }

    /// Set font name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set font size
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn is_bold(&self) -> bool {
        self.bold.is_on()
    }

    pub fn is_italic(&self) -> bool {
        self.italic.is_on()
    }

    pub fn is_underlined(&self) -> bool {
        self.underline.is_on()
    }

    pub fn is_strikethrough(&self) -> bool {
        self.strikethrough.is_on()
    }

    pub fn set_bold(&mut self, val: bool) {
        self.bold = FontFlag::explicit(val);
    }

    pub fn set_italic(&mut self, val: bool) {
        self.italic = FontFlag::explicit(val);
    }

    pub fn set_underline(&mut self, val: bool) {
        self.underline = FontFlag::explicit(val);
    }

    pub fn set_strikethrough(&mut self, val: bool) {
        self.strikethrough = FontFlag::explicit(val);
    }
}

/// Bit pattern `size` is compared and hashed by: `-0.0` folds onto `0.0`
/// and every NaN onto one NaN
fn size_key(size: Option<f64>) -> Option<u64> {
    size.map(|s| match s {
        s if s.is_nan() => f64::NAN.to_bits(),
        s if s == 0.0 => 0.0f64.to_bits(),
        s => s.to_bits(),
    })
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && size_key(self.size) == size_key(other.size)
            && self.color == other.color
            && self.bold == other.bold
            && self.italic == other.italic
            && self.underline == other.underline
            && self.strikethrough == other.strikethrough
    }
}

impl Eq for Font {}

impl std::hash::Hash for Font {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        size_key(self.size).hash(state);
        self.color.hash(state);
        self.bold.hash(state);
        self.italic.hash(state);
        self.underline.hash(state);
        self.strikethrough.hash(state);
    }
}

/// A single font modification.
///
/// Row and column operations apply the same change to the container default
/// and to every materialized cell, so the change travels as a value.
#[derive(Debug, Clone, PartialEq)]
pub enum FontChange {
    Name(String),
    Size(f64),
    Color(Color),
    Italic(bool),
    Bold(bool),
    Underline(bool),
    Strikethrough(bool),
}

impl FontChange {
    /// Reject payloads that must never reach the registry
    pub fn validate(&self) -> Result<()> {
        match self {
            FontChange::Size(size) if !size.is_finite() || *size <= 0.0 => Err(Error::invalid(
                format!("font size must be a positive number, got {size}"),
            )),
            FontChange::Name(name) if name.is_empty() => {
                Err(Error::invalid("font name cannot be empty"))
            }
            _ => Ok(()),
        }
    }

    /// Apply the change to a (duplicated) font record
    pub fn apply(&self, font: &mut Font) {
        match self {
            FontChange::Name(name) => font.name = Some(name.clone()),
            FontChange::Size(size) => font.size = Some(*size),
            FontChange::Color(color) => font.color = Some(*color),
            FontChange::Italic(val) => font.set_italic(*val),
            FontChange::Bold(val) => font.set_bold(*val),
            FontChange::Underline(val) => font.set_underline(*val),
            FontChange::Strikethrough(val) => font.set_strikethrough(*val),
        }
    }
}
