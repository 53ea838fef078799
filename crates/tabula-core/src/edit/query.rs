//! Formatting queries on rows, columns and cells

use super::{check_col, check_row, SheetEditor};
use crate::column::raw_width_to_chars;
use crate::error::Result;
use crate::style::{
    Alignment, Border, BorderLineStyle, BorderSide, Fill, Font, HorizontalAlignment,
    StyleRegistry, VerticalAlignment, Xf,
};

/// The resolved formatting behind one cell format index
#[derive(Debug, Clone, Copy)]
pub struct FormatView<'r> {
    styles: &'r StyleRegistry,
    index: u32,
    xf: &'r Xf,
    font: &'r Font,
    fill: &'r Fill,
    border: &'r Border,
}

impl<'r> FormatView<'r> {
    /// Resolve `index` and every record it points at
    pub fn resolve(styles: &'r StyleRegistry, index: u32) -> Result<Self> {
        Ok(Self {
            styles,
            index,
            xf: styles.xf_checked(index)?,
            font: styles.xf_font(index)?,
            fill: styles.xf_fill(index)?,
            border: styles.xf_border(index)?,
        })
    }

    /// Index into the registry's cell formats
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn xf(&self) -> &'r Xf {
        self.xf
    }

    pub fn font(&self) -> &'r Font {
        self.font
    }

    pub fn fill(&self) -> &'r Fill {
        self.fill
    }

    pub fn border(&self) -> &'r Border {
        self.border
    }

    pub fn alignment(&self) -> Option<&'r Alignment> {
        self.xf.alignment.as_ref()
    }

    /// Fill color as lowercase hex, `"ffffff"` when unset
    pub fn fill_color(&self) -> String {
        self.fill
            .foreground()
            .and_then(|c| c.rgb_hex())
            .unwrap_or_else(|| "ffffff".to_string())
    }

    pub fn font_name(&self) -> Option<&'r str> {
        self.font.name.as_deref()
    }

    pub fn font_size(&self) -> Option<f64> {
        self.font.size
    }

    /// Font color as lowercase hex, `"000000"` when unset
    pub fn font_color(&self) -> String {
        self.font
            .color
            .and_then(|c| c.rgb_hex())
            .unwrap_or_else(|| "000000".to_string())
    }

    pub fn is_italic(&self) -> bool {
        self.font.is_italic()
    }

    pub fn is_bold(&self) -> bool {
        self.font.is_bold()
    }

    pub fn is_underlined(&self) -> bool {
        self.font.is_underlined()
    }

    pub fn is_strikethrough(&self) -> bool {
        self.font.is_strikethrough()
    }

    pub fn border_style(&self, side: BorderSide) -> Option<BorderLineStyle> {
        self.border.edge_style(side)
    }

    pub fn border_color(&self, side: BorderSide) -> Option<String> {
        self.border.edge_color(side).and_then(|c| c.rgb_hex())
    }

    pub fn horizontal_alignment(&self) -> Option<HorizontalAlignment> {
        self.alignment().and_then(|a| a.horizontal)
    }

    pub fn vertical_alignment(&self) -> Option<VerticalAlignment> {
        self.alignment().and_then(|a| a.vertical)
    }

    pub fn text_wrap(&self) -> bool {
        self.alignment().and_then(|a| a.wrap_text).unwrap_or(false)
    }

    /// Number format code, `"General"` for an unknown id
    pub fn number_format(&self) -> &'r str {
        self.styles
            .number_format_code(self.xf.num_fmt_id.unwrap_or(0))
            .unwrap_or("General")
    }
}

impl<'a> SheetEditor<'a> {
    /// Style index of a row, 0 if the row has none
    pub fn row_style_index(&self, row: u32) -> Result<u32> {
        self.attached()?;
        check_row(row)?;
        Ok(self.sheet.row(row).and_then(|r| r.style_index).unwrap_or(0))
    }

    /// Style index of the column range covering `col`, 0 if none
    pub fn column_style_index(&self, col: u16) -> Result<u32> {
        self.attached()?;
        check_col(col)?;
        Ok(self.sheet.cols.style_of(col))
    }

    /// Style a cell at `(row, col)` has, or would get if created now
    pub fn effective_cell_style(&self, row: u32, col: u16) -> Result<u32> {
        self.attached()?;
        check_row(row)?;
        check_col(col)?;
        if let Some(cell) = self.sheet.cell(row, col) {
            return Ok(cell.style_index);
        }
        let row_style = self.sheet.row(row).and_then(|r| r.style_index);
        let col_style = self.sheet.cols.locate(col).and_then(|r| r.style_index);
        Ok(row_style.or(col_style).unwrap_or(0))
    }

    pub fn row_format(&self, row: u32) -> Result<FormatView<'_>> {
        let index = self.row_style_index(row)?;
        FormatView::resolve(self.registry()?, index)
    }

    pub fn column_format(&self, col: u16) -> Result<FormatView<'_>> {
        let index = self.column_style_index(col)?;
        FormatView::resolve(self.registry()?, index)
    }

    pub fn cell_format(&self, row: u32, col: u16) -> Result<FormatView<'_>> {
        let index = self.effective_cell_style(row, col)?;
        FormatView::resolve(self.registry()?, index)
    }

    // === Rows ===

    pub fn row_fill(&self, row: u32) -> Result<String> {
        Ok(self.row_format(row)?.fill_color())
    }

    pub fn row_font_name(&self, row: u32) -> Result<Option<String>> {
        Ok(self.row_format(row)?.font_name().map(str::to_string))
    }

    pub fn row_font_size(&self, row: u32) -> Result<Option<f64>> {
        Ok(self.row_format(row)?.font_size())
    }

    pub fn row_font_color(&self, row: u32) -> Result<String> {
        Ok(self.row_format(row)?.font_color())
    }

    pub fn is_row_italicized(&self, row: u32) -> Result<bool> {
        Ok(self.row_format(row)?.is_italic())
    }

    pub fn is_row_bolded(&self, row: u32) -> Result<bool> {
        Ok(self.row_format(row)?.is_bold())
    }

    pub fn is_row_underlined(&self, row: u32) -> Result<bool> {
        Ok(self.row_format(row)?.is_underlined())
    }

    pub fn is_row_struckthrough(&self, row: u32) -> Result<bool> {
        Ok(self.row_format(row)?.is_strikethrough())
    }

    pub fn row_border(&self, row: u32, side: BorderSide) -> Result<Option<BorderLineStyle>> {
        Ok(self.row_format(row)?.border_style(side))
    }

    pub fn row_border_color(&self, row: u32, side: BorderSide) -> Result<Option<String>> {
        Ok(self.row_format(row)?.border_color(side))
    }

    pub fn row_alignment(&self, row: u32) -> Result<Option<Alignment>> {
        Ok(self.row_format(row)?.alignment().cloned())
    }

    pub fn row_horizontal_alignment(&self, row: u32) -> Result<Option<HorizontalAlignment>> {
        Ok(self.row_format(row)?.horizontal_alignment())
    }

    pub fn row_vertical_alignment(&self, row: u32) -> Result<Option<VerticalAlignment>> {
        Ok(self.row_format(row)?.vertical_alignment())
    }

    pub fn row_number_format(&self, row: u32) -> Result<String> {
        Ok(self.row_format(row)?.number_format().to_string())
    }

    /// Row height in points; the configured default for rows without one
    pub fn row_height(&self, row: u32) -> Result<f64> {
        self.attached()?;
        check_row(row)?;
        Ok(self
            .sheet
            .row(row)
            .and_then(|r| r.height)
            .unwrap_or(self.settings.default_row_height))
    }

    // === Columns ===

    pub fn column_fill(&self, col: u16) -> Result<String> {
        Ok(self.column_format(col)?.fill_color())
    }

    pub fn column_font_name(&self, col: u16) -> Result<Option<String>> {
        Ok(self.column_format(col)?.font_name().map(str::to_string))
    }

    pub fn column_font_size(&self, col: u16) -> Result<Option<f64>> {
        Ok(self.column_format(col)?.font_size())
    }

    pub fn column_font_color(&self, col: u16) -> Result<String> {
        Ok(self.column_format(col)?.font_color())
    }

    pub fn is_column_italicized(&self, col: u16) -> Result<bool> {
        Ok(self.column_format(col)?.is_italic())
    }

    pub fn is_column_bolded(&self, col: u16) -> Result<bool> {
        Ok(self.column_format(col)?.is_bold())
    }

    pub fn is_column_underlined(&self, col: u16) -> Result<bool> {
        Ok(self.column_format(col)?.is_underlined())
    }

    pub fn is_column_struckthrough(&self, col: u16) -> Result<bool> {
        Ok(self.column_format(col)?.is_strikethrough())
    }

    pub fn column_border(&self, col: u16, side: BorderSide) -> Result<Option<BorderLineStyle>> {
        Ok(self.column_format(col)?.border_style(side))
    }

    pub fn column_border_color(&self, col: u16, side: BorderSide) -> Result<Option<String>> {
        Ok(self.column_format(col)?.border_color(side))
    }

    pub fn column_alignment(&self, col: u16) -> Result<Option<Alignment>> {
        Ok(self.column_format(col)?.alignment().cloned())
    }

    pub fn column_horizontal_alignment(&self, col: u16) -> Result<Option<HorizontalAlignment>> {
        Ok(self.column_format(col)?.horizontal_alignment())
    }

    pub fn column_vertical_alignment(&self, col: u16) -> Result<Option<VerticalAlignment>> {
        Ok(self.column_format(col)?.vertical_alignment())
    }

    pub fn column_number_format(&self, col: u16) -> Result<String> {
        Ok(self.column_format(col)?.number_format().to_string())
    }

    /// Raw stored width, `None` if the column has no width
    pub fn column_width_raw(&self, col: u16) -> Result<Option<f64>> {
        self.attached()?;
        check_col(col)?;
        Ok(self.sheet.cols.width_of(col))
    }

    /// Width in characters; the configured default for columns without one
    pub fn column_width(&self, col: u16) -> Result<f64> {
        Ok(self
            .column_width_raw(col)?
            .map(raw_width_to_chars)
            .unwrap_or(self.settings.default_column_width))
    }

    // === Cells ===

    pub fn cell_fill(&self, row: u32, col: u16) -> Result<String> {
        Ok(self.cell_format(row, col)?.fill_color())
    }

    pub fn cell_font_name(&self, row: u32, col: u16) -> Result<Option<String>> {
        Ok(self.cell_format(row, col)?.font_name().map(str::to_string))
    }

    pub fn cell_font_size(&self, row: u32, col: u16) -> Result<Option<f64>> {
        Ok(self.cell_format(row, col)?.font_size())
    }

    pub fn cell_font_color(&self, row: u32, col: u16) -> Result<String> {
        Ok(self.cell_format(row, col)?.font_color())
    }

    pub fn is_cell_italicized(&self, row: u32, col: u16) -> Result<bool> {
        Ok(self.cell_format(row, col)?.is_italic())
    }

    pub fn is_cell_bolded(&self, row: u32, col: u16) -> Result<bool> {
        Ok(self.cell_format(row, col)?.is_bold())
    }

    pub fn is_cell_underlined(&self, row: u32, col: u16) -> Result<bool> {
        Ok(self.cell_format(row, col)?.is_underlined())
    }

    pub fn is_cell_struckthrough(&self, row: u32, col: u16) -> Result<bool> {
        Ok(self.cell_format(row, col)?.is_strikethrough())
    }

    pub fn cell_border(
        &self,
        row: u32,
        col: u16,
        side: BorderSide,
    ) -> Result<Option<BorderLineStyle>> {
        Ok(self.cell_format(row, col)?.border_style(side))
    }

    pub fn cell_border_color(&self, row: u32, col: u16, side: BorderSide) -> Result<Option<String>> {
        Ok(self.cell_format(row, col)?.border_color(side))
    }

    pub fn cell_alignment(&self, row: u32, col: u16) -> Result<Option<Alignment>> {
        Ok(self.cell_format(row, col)?.alignment().cloned())
    }

    pub fn cell_horizontal_alignment(
        &self,
        row: u32,
        col: u16,
    ) -> Result<Option<HorizontalAlignment>> {
        Ok(self.cell_format(row, col)?.horizontal_alignment())
    }

    pub fn cell_vertical_alignment(&self, row: u32, col: u16) -> Result<Option<VerticalAlignment>> {
        Ok(self.cell_format(row, col)?.vertical_alignment())
    }

    pub fn cell_text_wrap(&self, row: u32, col: u16) -> Result<bool> {
        Ok(self.cell_format(row, col)?.text_wrap())
    }

    pub fn cell_number_format(&self, row: u32, col: u16) -> Result<String> {
        Ok(self.cell_format(row, col)?.number_format().to_string())
    }
}
