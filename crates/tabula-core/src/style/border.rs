//! Border records

use std::str::FromStr;

use super::Color;
use crate::error::{Error, Result};

/// Border record for a cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Border {
    pub left: Option<BorderEdge>,
    pub right: Option<BorderEdge>,
    pub top: Option<BorderEdge>,
    pub bottom: Option<BorderEdge>,
    /// Shared by both diagonal directions
    pub diagonal: Option<BorderEdge>,
    /// Inner vertical edge (only meaningful for range formats)
    pub vertical: Option<BorderEdge>,
    /// Inner horizontal edge (only meaningful for range formats)
    pub horizontal: Option<BorderEdge>,
    /// Diagonal from bottom-left to top-right is drawn
    pub diagonal_up: bool,
    /// Diagonal from top-left to bottom-right is drawn
    pub diagonal_down: bool,
}

impl Border {
    /// Create a border record with no edges
    pub fn new() -> Self {
        Self::default()
    }

    /// Edge stored for `side`
    pub fn edge(&self, side: BorderSide) -> Option<&BorderEdge> {
        match side {
            BorderSide::Left => self.left.as_ref(),
            BorderSide::Right => self.right.as_ref(),
            BorderSide::Top => self.top.as_ref(),
            BorderSide::Bottom => self.bottom.as_ref(),
            BorderSide::Diagonal | BorderSide::DiagonalUp | BorderSide::DiagonalDown => {
                self.diagonal.as_ref()
            }
            BorderSide::Vertical => self.vertical.as_ref(),
            BorderSide::Horizontal => self.horizontal.as_ref(),
        }
    }

    /// Mutable slot for `side`
    pub fn edge_mut(&mut self, side: BorderSide) -> &mut Option<BorderEdge> {
        match side {
            BorderSide::Left => &mut self.left,
            BorderSide::Right => &mut self.right,
            BorderSide::Top => &mut self.top,
            BorderSide::Bottom => &mut self.bottom,
            BorderSide::Diagonal | BorderSide::DiagonalUp | BorderSide::DiagonalDown => {
                &mut self.diagonal
            }
            BorderSide::Vertical => &mut self.vertical,
            BorderSide::Horizontal => &mut self.horizontal,
        }
    }

    /// Line style of one edge
    pub fn edge_style(&self, side: BorderSide) -> Option<BorderLineStyle> {
        self.edge(side).and_then(|e| e.style)
    }

    /// Color of one edge
    pub fn edge_color(&self, side: BorderSide) -> Option<Color> {
        self.edge(side).and_then(|e| e.color)
    }

    /// Set the line style of one edge, creating the edge if needed.
    ///
    /// The directional diagonal sides also switch their direction flag on.
    pub fn set_edge_style(&mut self, side: BorderSide, style: BorderLineStyle) {
        self.edge_mut(side).get_or_insert_with(BorderEdge::default).style = Some(style);
        self.mark_diagonal(side);
    }

    /// Set the color of one edge, creating the edge if needed
    pub fn set_edge_color(&mut self, side: BorderSide, color: Color) {
        self.edge_mut(side).get_or_insert_with(BorderEdge::default).color = Some(color);
        self.mark_diagonal(side);
    }

    fn mark_diagonal(&mut self, side: BorderSide) {
        match side {
            BorderSide::DiagonalUp => self.diagonal_up = true,
            BorderSide::DiagonalDown => self.diagonal_down = true,
            _ => {}
        }
    }

    /// Check if all edges are empty
    pub fn is_empty(&self) -> bool {
        self.left.is_none()
            && self.right.is_none()
            && self.top.is_none()
            && self.bottom.is_none()
            && self.diagonal.is_none()
            && self.vertical.is_none()
            && self.horizontal.is_none()
    }
}

/// A single border edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderEdge {
    /// Line style
    pub style: Option<BorderLineStyle>,
    /// Line color
    pub color: Option<Color>,
}

impl BorderEdge {
    /// Create a new border edge
    pub fn new(style: BorderLineStyle, color: Color) -> Self {
        Self {
            style: Some(style),
            color: Some(color),
        }
    }
}

/// Which edge of a border record an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BorderSide {
    Left,
    Right,
    Top,
    Bottom,
    /// Diagonal edge without touching the direction flags
    Diagonal,
    /// Diagonal edge, drawn bottom-left to top-right
    DiagonalUp,
    /// Diagonal edge, drawn top-left to bottom-right
    DiagonalDown,
    Vertical,
    Horizontal,
}

impl FromStr for BorderSide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(BorderSide::Left),
            "right" => Ok(BorderSide::Right),
            "top" => Ok(BorderSide::Top),
            "bottom" => Ok(BorderSide::Bottom),
            "diagonal" => Ok(BorderSide::Diagonal),
            "diagonal_up" => Ok(BorderSide::DiagonalUp),
            "diagonal_down" => Ok(BorderSide::DiagonalDown),
            "vertical" => Ok(BorderSide::Vertical),
            "horizontal" => Ok(BorderSide::Horizontal),
            other => Err(Error::invalid(format!("unknown border side: {other:?}"))),
        }
    }
}

/// Border line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BorderLineStyle {
    #[default]
    None,
    Thin,
    Medium,
    Thick,
    Dashed,
    Dotted,
    Double,
    Hair,
    MediumDashed,
    DashDot,
    MediumDashDot,
    DashDotDot,
    MediumDashDotDot,
    SlantDashDot,
}

impl BorderLineStyle {
    /// Name used in the file format
    pub fn as_str(self) -> &'static str {
        match self {
            BorderLineStyle::None => "none",
            BorderLineStyle::Thin => "thin",
            BorderLineStyle::Medium => "medium",
            BorderLineStyle::Thick => "thick",
            BorderLineStyle::Dashed => "dashed",
            BorderLineStyle::Dotted => "dotted",
            BorderLineStyle::Double => "double",
            BorderLineStyle::Hair => "hair",
            BorderLineStyle::MediumDashed => "mediumDashed",
            BorderLineStyle::DashDot => "dashDot",
            BorderLineStyle::MediumDashDot => "mediumDashDot",
            BorderLineStyle::DashDotDot => "dashDotDot",
            BorderLineStyle::MediumDashDotDot => "mediumDashDotDot",
            BorderLineStyle::SlantDashDot => "slantDashDot",
        }
    }
}

impl FromStr for BorderLineStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        const ALL: [BorderLineStyle; 14] = [
            BorderLineStyle::None,
            BorderLineStyle::Thin,
            BorderLineStyle::Medium,
            BorderLineStyle::Thick,
            BorderLineStyle::Dashed,
            BorderLineStyle::Dotted,
            BorderLineStyle::Double,
            BorderLineStyle::Hair,
            BorderLineStyle::MediumDashed,
            BorderLineStyle::DashDot,
            BorderLineStyle::MediumDashDot,
            BorderLineStyle::DashDotDot,
            BorderLineStyle::MediumDashDotDot,
            BorderLineStyle::SlantDashDot,
        ];
        ALL.into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| Error::invalid(format!("unknown border weight: {s:?}")))
    }
}
