//! Fill/background records

use super::Color;

/// Fill record for a cell background
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fill {
    /// No fill (transparent)
    #[default]
    None,

    /// Solid color fill
    Solid { color: Color },

    /// Pattern fill
    Pattern {
        pattern: PatternType,
        foreground: Option<Color>,
        background: Option<Color>,
    },
}

impl Fill {
    /// Create a solid fill with the given color
    pub fn solid(color: Color) -> Self {
        Fill::Solid { color }
    }

    /// The 12.5% gray pattern every workbook carries at fill index 1
    pub fn gray125() -> Self {
        Fill::Pattern {
            pattern: PatternType::Gray125,
            foreground: None,
            background: None,
        }
    }

    /// Foreground color, if the fill has one
    pub fn foreground(&self) -> Option<Color> {
        match self {
            Fill::None => None,
            Fill::Solid { color } => Some(*color),
            Fill::Pattern { foreground, .. } => *foreground,
        }
    }

    /// Check if this is a "no fill"
    pub fn is_none(&self) -> bool {
        matches!(self, Fill::None)
    }
}

/// Pattern fill types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternType {
    #[default]
    None,
    Solid,
    MediumGray,
    DarkGray,
    LightGray,
    DarkHorizontal,
    DarkVertical,
    DarkDown,
    DarkUp,
    DarkGrid,
    DarkTrellis,
    LightHorizontal,
    LightVertical,
    LightDown,
    LightUp,
    LightGrid,
    LightTrellis,
    Gray125,
    Gray0625,
}
