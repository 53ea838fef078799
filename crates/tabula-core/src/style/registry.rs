//! Style registry: deduplicated font, fill, border and cell-format arrays

use std::hash::Hash;

use ahash::AHashMap;

use super::{
    Alignment, Border, BorderLineStyle, BorderSide, Color, Fill, Font, FontChange,
    NumberFormat, NumberFormats, Xf,
};
use crate::error::{Error, Result};

/// Append-only array with a content-addressed index
///
/// Records keep their first-seen position for the lifetime of the document,
/// so indices handed out by [`StyleArray::register`] never move.
#[derive(Debug, Clone)]
struct StyleArray<T> {
    records: Vec<T>,
    index_map: AHashMap<T, u32>,
}

impl<T: Clone + Eq + Hash> StyleArray<T> {
    fn new() -> Self {
        Self {
            records: Vec::with_capacity(16),
            index_map: AHashMap::with_capacity(16),
        }
    }

    fn from_records(records: Vec<T>) -> Self {
        let mut array = Self::new();
        for record in records {
            array.append(record);
        }
        array
    }

    /// Find a value-equal record or append this one
    fn register(&mut self, record: T) -> (u32, bool) {
        if let Some(&idx) = self.index_map.get(&record) {
            return (idx, false);
        }
        (self.append(record), true)
    }

    /// Unconditional append; lookups keep resolving to the first copy
    fn append(&mut self, record: T) -> u32 {
        let idx = self.records.len() as u32;
        self.index_map.entry(record.clone()).or_insert(idx);
        self.records.push(record);
        idx
    }

    fn get(&self, index: u32) -> Option<&T> {
        self.records.get(index as usize)
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

/// The workbook's style registry
///
/// Every row, column range and cell references formatting through an index
/// into `cell_xfs`, and each [`Xf`] references fonts, fills, borders and
/// number formats by index. Records are shared by every entity pointing at
/// them, so they are never edited in place: a change duplicates the current
/// record, applies itself to the copy and registers the copy, yielding a
/// (possibly pre-existing) index. Entities not re-pointed at that index keep
/// their formatting.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    fonts: StyleArray<Font>,
    fills: StyleArray<Fill>,
    borders: StyleArray<Border>,
    cell_xfs: StyleArray<Xf>,
    num_fmts: NumberFormats,
}

impl StyleRegistry {
    /// Create a registry holding the default records every workbook carries
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }

    /// Build a registry from records read out of a file.
    ///
    /// Records keep their file positions, duplicates included. Empty arrays
    /// are seeded with the defaults so index 0 always resolves.
    pub fn from_parts(
        fonts: Vec<Font>,
        fills: Vec<Fill>,
        borders: Vec<Border>,
        cell_xfs: Vec<Xf>,
        num_fmts: Vec<NumberFormat>,
    ) -> Self {
        let fonts = if fonts.is_empty() {
            vec![Font::default_font()]
        } else {
            fonts
        };
        let fills = if fills.is_empty() {
            vec![Fill::None, Fill::gray125()]
        } else {
            fills
        };
        let borders = if borders.is_empty() {
            vec![Border::new()]
        } else {
            borders
        };
        let cell_xfs = if cell_xfs.is_empty() {
            vec![Xf::default_xf()]
        } else {
            cell_xfs
        };

        let mut formats = NumberFormats::new();
        for format in num_fmts {
            formats.insert(format);
        }

        Self {
            fonts: StyleArray::from_records(fonts),
            fills: StyleArray::from_records(fills),
            borders: StyleArray::from_records(borders),
            cell_xfs: StyleArray::from_records(cell_xfs),
            num_fmts: formats,
        }
    }

    // === Register ===

    /// Find or add a font, returning its index
    pub fn register_font(&mut self, font: Font) -> u32 {
        let (idx, added) = self.fonts.register(font);
        if added {
            log::trace!("registered font {idx}");
        }
        idx
    }

    /// Find or add a fill, returning its index
    pub fn register_fill(&mut self, fill: Fill) -> u32 {
        let (idx, added) = self.fills.register(fill);
        if added {
            log::trace!("registered fill {idx}");
        }
        idx
    }

    /// Find or add a border, returning its index
    pub fn register_border(&mut self, border: Border) -> u32 {
        let (idx, added) = self.borders.register(border);
        if added {
            log::trace!("registered border {idx}");
        }
        idx
    }

    /// Find or add a cell format, returning its index
    pub fn register_xf(&mut self, xf: Xf) -> u32 {
        let (idx, added) = self.cell_xfs.register(xf);
        if added {
            log::trace!("registered cell xf {idx}");
        }
        idx
    }

    /// Find or allocate a number format id for `code`
    pub fn register_number_format(&mut self, code: &str) -> u32 {
        self.num_fmts.register(code)
    }

    // === Lookup ===

    pub fn font(&self, index: u32) -> Option<&Font> {
        self.fonts.get(index)
    }

    pub fn fill(&self, index: u32) -> Option<&Fill> {
        self.fills.get(index)
    }

    pub fn border(&self, index: u32) -> Option<&Border> {
        self.borders.get(index)
    }

    pub fn xf(&self, index: u32) -> Option<&Xf> {
        self.cell_xfs.get(index)
    }

    pub fn fonts(&self) -> &[Font] {
        &self.fonts.records
    }

    pub fn fills(&self) -> &[Fill] {
        &self.fills.records
    }

    pub fn borders(&self) -> &[Border] {
        &self.borders.records
    }

    pub fn cell_xfs(&self) -> &[Xf] {
        &self.cell_xfs.records
    }

    pub fn number_formats(&self) -> &NumberFormats {
        &self.num_fmts
    }

    /// Format code for a number format id (built-in or custom)
    pub fn number_format_code(&self, id: u32) -> Option<&str> {
        self.num_fmts.code(id)
    }

    /// Cell format at `index`, or [`Error::InvalidStyleIndex`]
    pub fn xf_checked(&self, index: u32) -> Result<&Xf> {
        self.xf(index).ok_or(Error::InvalidStyleIndex(index))
    }

    /// Font referenced by the cell format at `xf_index`
    pub fn xf_font(&self, xf_index: u32) -> Result<&Font> {
        let font_id = self.xf_checked(xf_index)?.font_index();
        self.font(font_id).ok_or(Error::InvalidStyleIndex(font_id))
    }

    /// Fill referenced by the cell format at `xf_index`
    pub fn xf_fill(&self, xf_index: u32) -> Result<&Fill> {
        let fill_id = self.xf_checked(xf_index)?.fill_index();
        self.fill(fill_id).ok_or(Error::InvalidStyleIndex(fill_id))
    }

    /// Border referenced by the cell format at `xf_index`
    pub fn xf_border(&self, xf_index: u32) -> Result<&Border> {
        let border_id = self.xf_checked(xf_index)?.border_index();
        self.border(border_id).ok_or(Error::InvalidStyleIndex(border_id))
    }

    /// Check that `xf_index` and every record it references resolve.
    ///
    /// Row and column operations run this over all affected cells before
    /// they start mutating.
    pub fn check_xf(&self, xf_index: u32) -> Result<()> {
        self.xf_font(xf_index)?;
        self.xf_fill(xf_index)?;
        self.xf_border(xf_index)?;
        Ok(())
    }

    /// Fill color of a cell format as lowercase hex; `"ffffff"` when the
    /// fill has no explicit foreground color
    pub fn fill_color(&self, xf_index: u32) -> Result<String> {
        Ok(self
            .xf_fill(xf_index)?
            .foreground()
            .and_then(|c| c.rgb_hex())
            .unwrap_or_else(|| "ffffff".to_string()))
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    pub fn fill_count(&self) -> usize {
        self.fills.len()
    }

    pub fn border_count(&self) -> usize {
        self.borders.len()
    }

    pub fn xf_count(&self) -> usize {
        self.cell_xfs.len()
    }

    // === Modify (duplicate, change, register) ===

    /// Derive a cell format whose alignment has been changed by `change`
    pub fn modify_alignment<F>(&mut self, xf_index: u32, change: F) -> Result<u32>
    where
        F: FnOnce(&mut Alignment),
    {
        let mut xf = self.xf_checked(xf_index)?.clone();
        change(xf.alignment.get_or_insert_with(Alignment::default));
        xf.apply_alignment = true;
        Ok(self.register_xf(xf))
    }

    /// Derive a cell format with a solid fill of `color`
    pub fn modify_fill(&mut self, xf_index: u32, color: Color) -> Result<u32> {
        let mut xf = self.xf_checked(xf_index)?.clone();
        xf.fill_id = Some(self.register_fill(Fill::solid(color)));
        xf.apply_fill = true;
        Ok(self.register_xf(xf))
    }

    /// Derive a cell format whose font has been changed by `change`
    pub fn modify_font(&mut self, xf_index: u32, change: &FontChange) -> Result<u32> {
        change.validate()?;
        let mut font = self.xf_font(xf_index)?.clone();
        change.apply(&mut font);

        let mut xf = self.xf_checked(xf_index)?.clone();
        xf.font_id = Some(self.register_font(font));
        xf.apply_font = true;
        Ok(self.register_xf(xf))
    }

    /// Derive a cell format whose border edge `side` has line style `weight`
    pub fn modify_border(
        &mut self,
        xf_index: u32,
        side: BorderSide,
        weight: BorderLineStyle,
    ) -> Result<u32> {
        let mut border = self.xf_border(xf_index)?.clone();
        border.set_edge_style(side, weight);
        self.replace_border(xf_index, border)
    }

    /// Derive a cell format whose border edge `side` has `color`
    pub fn modify_border_color(
        &mut self,
        xf_index: u32,
        side: BorderSide,
        color: Color,
    ) -> Result<u32> {
        let mut border = self.xf_border(xf_index)?.clone();
        border.set_edge_color(side, color);
        self.replace_border(xf_index, border)
    }

    /// Derive a cell format using number format `code`
    pub fn modify_number_format(&mut self, xf_index: u32, code: &str) -> Result<u32> {
        let mut xf = self.xf_checked(xf_index)?.clone();
        xf.num_fmt_id = Some(self.register_number_format(code));
        xf.apply_number_format = true;
        Ok(self.register_xf(xf))
    }

    fn replace_border(&mut self, xf_index: u32, border: Border) -> Result<u32> {
        let mut xf = self.xf_checked(xf_index)?.clone();
        xf.border_id = Some(self.register_border(border));
        xf.apply_border = true;
        Ok(self.register_xf(xf))
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{FontFlag, HorizontalAlignment};

    #[test]
    fn test_defaults() {
        let reg = StyleRegistry::new();
        assert_eq!(reg.font_count(), 1);
        assert_eq!(reg.fill_count(), 2);
        assert_eq!(reg.border_count(), 1);
        assert_eq!(reg.xf_count(), 1);
        assert_eq!(reg.xf(0), Some(&Xf::default_xf()));
        assert_eq!(reg.font(0).unwrap().name.as_deref(), Some("Calibri"));
    }

    #[test]
    fn test_deduplication() {
        let mut reg = StyleRegistry::new();

        let bold = Font {
            bold: FontFlag::Explicit(true),
            ..Font::default_font()
        };
        let idx1 = reg.register_font(bold.clone());
        let len = reg.font_count();
        let idx2 = reg.register_font(bold);
        let idx3 = reg.register_font(Font::default_font().with_size(14.0));

        assert_eq!(idx1, idx2);
        assert_ne!(idx1, idx3);
        assert_eq!(reg.font_count(), len + 1);

        // The default font is found, not duplicated
        assert_eq!(reg.register_font(Font::default_font()), 0);
    }

    #[test]
    fn test_signed_zero_and_nan_sizes_share_a_record() {
        let mut reg = StyleRegistry::new();
        let zero = reg.register_font(Font::new().with_size(0.0));
        assert_eq!(reg.register_font(Font::new().with_size(-0.0)), zero);

        let nan = reg.register_font(Font::new().with_size(f64::NAN));
        assert_eq!(reg.register_font(Font::new().with_size(-f64::NAN)), nan);
        assert_eq!(reg.font(nan), reg.font(nan));
        assert_eq!(reg.font_count(), 3);
    }

    #[test]
    fn test_modify_fill_leaves_source_untouched() {
        let mut reg = StyleRegistry::new();
        let red = reg.modify_fill(0, Color::RED).unwrap();

        assert_ne!(red, 0);
        assert_eq!(reg.xf(0), Some(&Xf::default_xf()));
        assert_eq!(reg.fill_color(0).unwrap(), "ffffff");
        assert_eq!(reg.fill_color(red).unwrap(), "ff0000");
        assert!(reg.xf(red).unwrap().apply_fill);

        // Same change from the same source lands on the same index
        assert_eq!(reg.modify_fill(0, Color::RED).unwrap(), red);
        // Repainting with the current color is a no-op
        assert_eq!(reg.modify_fill(red, Color::RED).unwrap(), red);
    }

    #[test]
    fn test_modify_font() {
        let mut reg = StyleRegistry::new();
        let italic = reg.modify_font(0, &FontChange::Italic(true)).unwrap();
        let font = reg.xf_font(italic).unwrap();
        assert!(font.is_italic());
        assert_eq!(font.size, Some(11.0));
        assert!(reg.xf(italic).unwrap().apply_font);
        assert!(!reg.xf_font(0).unwrap().is_italic());
    }

    #[test]
    fn test_modify_font_rejects_before_registering() {
        let mut reg = StyleRegistry::new();
        let err = reg.modify_font(0, &FontChange::Size(-1.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(reg.font_count(), 1);
        assert_eq!(reg.xf_count(), 1);
    }

    #[test]
    fn test_modify_border_edges() {
        let mut reg = StyleRegistry::new();
        let top = reg
            .modify_border(0, BorderSide::Top, BorderLineStyle::Thin)
            .unwrap();
        let top_red = reg.modify_border_color(top, BorderSide::Top, Color::RED).unwrap();

        let border = reg.xf_border(top_red).unwrap();
        assert_eq!(border.edge_style(BorderSide::Top), Some(BorderLineStyle::Thin));
        assert_eq!(border.edge_color(BorderSide::Top), Some(Color::RED));
        assert_eq!(reg.xf_border(top).unwrap().edge_color(BorderSide::Top), None);
        assert!(reg.border(0).unwrap().is_empty());
    }

    #[test]
    fn test_modify_alignment() {
        let mut reg = StyleRegistry::new();
        let centered = reg
            .modify_alignment(0, |a| a.horizontal = Some(HorizontalAlignment::Center))
            .unwrap();
        let wrapped = reg
            .modify_alignment(centered, |a| a.wrap_text = Some(true))
            .unwrap();

        let alignment = reg.xf(wrapped).unwrap().alignment.clone().unwrap();
        assert_eq!(alignment.horizontal, Some(HorizontalAlignment::Center));
        assert_eq!(alignment.wrap_text, Some(true));
        assert!(reg.xf(wrapped).unwrap().apply_alignment);
        assert!(reg.xf(0).unwrap().alignment.is_none());
    }

    #[test]
    fn test_modify_number_format() {
        let mut reg = StyleRegistry::new();
        let pct = reg.modify_number_format(0, "0.00%").unwrap();
        let custom = reg.modify_number_format(0, "0.0000").unwrap();

        assert_eq!(reg.xf(pct).unwrap().num_fmt_id, Some(10));
        assert_eq!(reg.xf(custom).unwrap().num_fmt_id, Some(164));
        assert_eq!(reg.number_format_code(164), Some("0.0000"));
    }

    #[test]
    fn test_invalid_index() {
        let mut reg = StyleRegistry::new();
        assert_eq!(
            reg.modify_fill(42, Color::RED),
            Err(Error::InvalidStyleIndex(42))
        );
        assert_eq!(reg.xf_count(), 1);
        assert_eq!(reg.fill_count(), 2);
    }

    #[test]
    fn test_from_parts_keeps_file_positions() {
        let reg = StyleRegistry::from_parts(
            vec![Font::default_font(), Font::default_font()],
            Vec::new(),
            Vec::new(),
            vec![Xf::default_xf(), Xf::default_xf().with_font(1)],
            Vec::new(),
        );
        assert_eq!(reg.font_count(), 2);
        assert_eq!(reg.fill_count(), 2);
        assert_eq!(reg.xf_font(1).unwrap(), &Font::default_font());

        let mut reg = reg;
        // Lookups resolve to the first copy
        assert_eq!(reg.register_font(Font::default_font()), 0);
    }
}
