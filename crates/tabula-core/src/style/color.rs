//! Color representation and validation

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Color as referenced by fonts, fills and border edges
///
/// Supports RGB, ARGB, theme colors, and indexed colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// RGB color (no alpha)
    Rgb { r: u8, g: u8, b: u8 },

    /// ARGB color with alpha channel
    Argb { a: u8, r: u8, g: u8, b: u8 },

    /// Theme color with optional tint
    Theme {
        /// Theme color index (0-9)
        index: u8,
        /// Tint value (-1.0 to 1.0, stored as i8 percentage)
        tint: i8,
    },

    /// Indexed color (legacy palette)
    Indexed(u8),
}

impl Color {
    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Validate and parse a six-digit RGB string such as `"ff0000"`.
    ///
    /// This is the check every color-taking operation runs before it touches
    /// the style registry. No `#` prefix, no alpha, case-insensitive.
    pub fn parse_rgb(s: &str) -> Result<Self> {
        match decode_hex::<3>(s) {
            Some([r, g, b]) => Ok(Color::Rgb { r, g, b }),
            None => Err(Error::invalid(format!("invalid RGB color: {s:?}"))),
        }
    }

    /// Lenient form used for colors read out of files: RGB or ARGB, with or
    /// without a leading `#`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if let Some([r, g, b]) = decode_hex::<3>(hex) {
            return Some(Color::Rgb { r, g, b });
        }
        decode_hex::<4>(hex).map(|[a, r, g, b]| Color::Argb { a, r, g, b })
    }

    /// Lowercase hex string of an explicit color.
    ///
    /// Theme and indexed colors have no RGB value without a palette, so they
    /// yield `None`.
    pub fn rgb_hex(&self) -> Option<String> {
        let bytes: &[u8] = match self {
            Color::Rgb { r, g, b } => &[*r, *g, *b],
            Color::Argb { a, r, g, b } => &[*a, *r, *g, *b],
            Color::Theme { .. } | Color::Indexed(_) => return None,
        };
        Some(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    pub const BLACK: Color = Color::Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const RED: Color = Color::Rgb { r: 255, g: 0, b: 0 };
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse_rgb(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.rgb_hex()) {
            (_, Some(hex)) => f.write_str(&hex),
            (Color::Theme { index, tint }, None) => write!(f, "theme {index} ({tint:+}%)"),
            (Color::Indexed(i), None) => write!(f, "indexed {i}"),
            _ => Ok(()),
        }
    }
}

/// Exactly `N` bytes spelled as `2 * N` hex digits
fn decode_hex<const N: usize>(s: &str) -> Option<[u8; N]> {
    if s.len() != 2 * N || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let mut out = [0u8; N];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&s[2 * i..2 * i + 2], 16).ok()?;
    }
    Some(out)
}
