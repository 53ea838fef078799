//! Cell format (`xf`) records

use super::Alignment;

/// Cell format record
///
/// An `Xf` does not own its font, fill or border; it points at records in
/// the [`StyleRegistry`](super::StyleRegistry) by index. `None` indices
/// resolve to record 0. The `apply_*` flags tell the rendering application
/// which of the referenced properties are active.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Xf {
    pub num_fmt_id: Option<u32>,
    pub font_id: Option<u32>,
    pub fill_id: Option<u32>,
    pub border_id: Option<u32>,
    /// Index of the parent cell-style record
    pub xf_id: Option<u32>,
    pub alignment: Option<Alignment>,
    pub apply_number_format: bool,
    pub apply_font: bool,
    pub apply_fill: bool,
    pub apply_border: bool,
    pub apply_alignment: bool,
}

impl Xf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record 0 of a fresh registry
    pub fn default_xf() -> Self {
        Self {
            num_fmt_id: Some(0),
            font_id: Some(0),
            fill_id: Some(0),
            border_id: Some(0),
            xf_id: Some(0),
            ..Self::default()
        }
    }

    pub fn with_font(mut self, font_id: u32) -> Self {
        self.font_id = Some(font_id);
        self.apply_font = true;
        self
    }

    pub fn with_fill(mut self, fill_id: u32) -> Self {
        self.fill_id = Some(fill_id);
        self.apply_fill = true;
        self
    }

    pub fn with_border(mut self, border_id: u32) -> Self {
        self.border_id = Some(border_id);
        self.apply_border = true;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self.apply_alignment = true;
        self
    }

    /// Font index, with an unset reference meaning record 0
    pub fn font_index(&self) -> u32 {
        self.font_id.unwrap_or(0)
    }

    /// Fill index, with an unset reference meaning record 0
    pub fn fill_index(&self) -> u32 {
        self.fill_id.unwrap_or(0)
    }

    /// Border index, with an unset reference meaning record 0
    pub fn border_index(&self) -> u32 {
        self.border_id.unwrap_or(0)
    }
}
