//! Text alignment value object

use std::str::FromStr;

use crate::error::{Error, Result};

/// Alignment settings carried by an [`Xf`](super::Xf)
///
/// Unset fields mean "inherit the application default".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alignment {
    pub horizontal: Option<HorizontalAlignment>,
    pub vertical: Option<VerticalAlignment>,
    pub wrap_text: Option<bool>,
    pub shrink_to_fit: Option<bool>,
    /// Indent level (0-250)
    pub indent: Option<u8>,
    /// Text rotation in degrees (-90 to 90, or 255 for vertical)
    pub text_rotation: Option<i16>,
}

impl Alignment {
    /// Create a new default alignment
    pub fn new() -> Self {
        Self::default()
    }

    /// Set horizontal alignment
    pub fn with_horizontal(mut self, align: HorizontalAlignment) -> Self {
        self.horizontal = Some(align);
        self
    }

    /// Set vertical alignment
    pub fn with_vertical(mut self, align: VerticalAlignment) -> Self {
        self.vertical = Some(align);
        self
    }

    /// Enable text wrapping
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap_text = Some(wrap);
        self
    }
}

/// Horizontal alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlignment {
    General,
    Left,
    Center,
    Right,
    Fill,
    Justify,
    CenterContinuous,
    Distributed,
}

impl HorizontalAlignment {
    pub fn as_str(self) -> &'static str {
        match self {
            HorizontalAlignment::General => "general",
            HorizontalAlignment::Left => "left",
            HorizontalAlignment::Center => "center",
            HorizontalAlignment::Right => "right",
            HorizontalAlignment::Fill => "fill",
            HorizontalAlignment::Justify => "justify",
            HorizontalAlignment::CenterContinuous => "centerContinuous",
            HorizontalAlignment::Distributed => "distributed",
        }
    }
}

impl FromStr for HorizontalAlignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "general" => Ok(HorizontalAlignment::General),
            "left" => Ok(HorizontalAlignment::Left),
            "center" => Ok(HorizontalAlignment::Center),
            "right" => Ok(HorizontalAlignment::Right),
            "fill" => Ok(HorizontalAlignment::Fill),
            "justify" => Ok(HorizontalAlignment::Justify),
            "centerContinuous" => Ok(HorizontalAlignment::CenterContinuous),
            "distributed" => Ok(HorizontalAlignment::Distributed),
            other => Err(Error::invalid(format!(
                "unknown horizontal alignment: {other:?}"
            ))),
        }
    }
}

/// Vertical alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
    Justify,
    Distributed,
}

impl VerticalAlignment {
    pub fn as_str(self) -> &'static str {
        match self {
            VerticalAlignment::Top => "top",
            VerticalAlignment::Center => "center",
            VerticalAlignment::Bottom => "bottom",
            VerticalAlignment::Justify => "justify",
            VerticalAlignment::Distributed => "distributed",
        }
    }
}

impl FromStr for VerticalAlignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "top" => Ok(VerticalAlignment::Top),
            "center" => Ok(VerticalAlignment::Center),
            "bottom" => Ok(VerticalAlignment::Bottom),
            "justify" => Ok(VerticalAlignment::Justify),
            "distributed" => Ok(VerticalAlignment::Distributed),
            other => Err(Error::invalid(format!(
                "unknown vertical alignment: {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_names() {
        for name in ["left", "center", "centerContinuous", "distributed"] {
            assert_eq!(name.parse::<HorizontalAlignment>().unwrap().as_str(), name);
        }
        assert_eq!("top".parse::<VerticalAlignment>(), Ok(VerticalAlignment::Top));
        assert!("middle".parse::<VerticalAlignment>().is_err());
    }
}
