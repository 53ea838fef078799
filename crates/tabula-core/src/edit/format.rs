//! Formatting changes on rows, columns and cells
//!
//! Row and column changes restyle the container default and then apply the
//! same change to every materialized cell in it. Cell overrides are not
//! tracked separately, so a row fill paints over a cell's own fill.

use super::{check_col, check_row, SheetEditor};
use crate::cell::CellInput;
use crate::column::chars_to_raw_width;
use crate::error::{Error, Result};
use crate::style::{
    Alignment, BorderLineStyle, BorderSide, Color, FontChange, HorizontalAlignment,
    StyleRegistry, VerticalAlignment,
};

/// One atomic formatting change, applied through the registry
enum StyleChange<'c> {
    Fill(Color),
    Font(FontChange),
    Border(BorderSide, BorderLineStyle),
    BorderColor(BorderSide, Color),
    Alignment(&'c dyn Fn(&mut Alignment)),
    NumberFormat(&'c str),
}

impl StyleChange<'_> {
    fn validate(&self) -> Result<()> {
        match self {
            StyleChange::Font(change) => change.validate(),
            StyleChange::NumberFormat(code) if code.is_empty() => {
                Err(Error::invalid("number format code cannot be empty"))
            }
            _ => Ok(()),
        }
    }

    /// Index of the format derived from `xf_index` by this change
    fn apply(&self, styles: &mut StyleRegistry, xf_index: u32) -> Result<u32> {
        match self {
            StyleChange::Fill(color) => styles.modify_fill(xf_index, *color),
            StyleChange::Font(change) => styles.modify_font(xf_index, change),
            StyleChange::Border(side, weight) => styles.modify_border(xf_index, *side, *weight),
            StyleChange::BorderColor(side, color) => {
                styles.modify_border_color(xf_index, *side, *color)
            }
            StyleChange::Alignment(f) => styles.modify_alignment(xf_index, |a| f(a)),
            StyleChange::NumberFormat(code) => styles.modify_number_format(xf_index, code),
        }
    }

    fn is_alignment(&self) -> bool {
        matches!(self, StyleChange::Alignment(_))
    }
}

impl<'a> SheetEditor<'a> {
    fn change_row_style(&mut self, row: u32, change: StyleChange<'_>) -> Result<()> {
        check_row(row)?;
        change.validate()?;
        let (sheet, styles) = self.parts()?;

        let current = sheet.row(row).and_then(|r| r.style_index).unwrap_or(0);
        styles.check_xf(current)?;
        if let Some(existing) = sheet.row(row) {
            for cell in existing.iter_cells() {
                styles.check_xf(cell.style_index)?;
            }
        }

        let derived = change.apply(styles, current)?;
        let target = sheet.sheet_data.ensure(row, 0);
        target.style_index = Some(derived);
        for cell in target.iter_cells_mut() {
            cell.style_index = change.apply(styles, cell.style_index)?;
        }
        Ok(())
    }

    fn change_column_style(&mut self, col: u16, change: StyleChange<'_>) -> Result<()> {
        check_col(col)?;
        change.validate()?;
        let default_width = chars_to_raw_width(self.settings.default_column_width);
        let (sheet, styles) = self.parts()?;

        let current = sheet.cols.style_of(col);
        styles.check_xf(current)?;
        for cell in sheet.sheet_data.iter().filter_map(|(_, r)| r.cell(col)) {
            styles.check_xf(cell.style_index)?;
        }

        sheet.sheet_data.ensure(0, col);
        let derived = change.apply(styles, current)?;
        let range = sheet.cols.get_range(col);
        range.style_index = Some(derived);
        if change.is_alignment() && range.width.is_none() {
            range.width = Some(default_width);
            range.custom_width = true;
        }

        for row in sheet.sheet_data.iter_rows_mut() {
            if let Some(cell) = row.cell_mut(col) {
                cell.style_index = change.apply(styles, cell.style_index)?;
            }
        }
        Ok(())
    }

    fn change_cell_style(&mut self, row: u32, col: u16, change: StyleChange<'_>) -> Result<()> {
        check_row(row)?;
        check_col(col)?;
        change.validate()?;
        let current = self.effective_cell_style(row, col)?;
        self.registry()?.check_xf(current)?;

        self.add_cell(row, col, CellInput::Empty, None, false)?;
        let (sheet, styles) = self.parts()?;
        let cell = sheet
            .sheet_data
            .cell_mut(row, col)
            .ok_or_else(|| Error::invalid(format!("no cell at ({row}, {col})")))?;
        cell.style_index = change.apply(styles, cell.style_index)?;
        Ok(())
    }

    // === Rows ===

    /// Fill row `row` (and every cell in it) with a solid `rgb` color
    pub fn change_row_fill(&mut self, row: u32, rgb: &str) -> Result<()> {
        let color = Color::parse_rgb(rgb)?;
        self.change_row_style(row, StyleChange::Fill(color))
    }

    pub fn change_row_font_name(&mut self, row: u32, name: &str) -> Result<()> {
        self.change_row_style(row, StyleChange::Font(FontChange::Name(name.to_string())))
    }

    pub fn change_row_font_size(&mut self, row: u32, size: f64) -> Result<()> {
        self.change_row_style(row, StyleChange::Font(FontChange::Size(size)))
    }

    pub fn change_row_font_color(&mut self, row: u32, rgb: &str) -> Result<()> {
        let color = Color::parse_rgb(rgb)?;
        self.change_row_style(row, StyleChange::Font(FontChange::Color(color)))
    }

    pub fn change_row_italics(&mut self, row: u32, italic: bool) -> Result<()> {
        self.change_row_style(row, StyleChange::Font(FontChange::Italic(italic)))
    }

    pub fn change_row_bold(&mut self, row: u32, bold: bool) -> Result<()> {
        self.change_row_style(row, StyleChange::Font(FontChange::Bold(bold)))
    }

    pub fn change_row_underline(&mut self, row: u32, underline: bool) -> Result<()> {
        self.change_row_style(row, StyleChange::Font(FontChange::Underline(underline)))
    }

    pub fn change_row_strikethrough(&mut self, row: u32, strike: bool) -> Result<()> {
        self.change_row_style(row, StyleChange::Font(FontChange::Strikethrough(strike)))
    }

    /// Set the line style of one border edge for a row and its cells
    pub fn change_row_border(
        &mut self,
        row: u32,
        side: BorderSide,
        weight: BorderLineStyle,
    ) -> Result<()> {
        self.change_row_style(row, StyleChange::Border(side, weight))
    }

    pub fn change_row_border_color(&mut self, row: u32, side: BorderSide, rgb: &str) -> Result<()> {
        let color = Color::parse_rgb(rgb)?;
        self.change_row_style(row, StyleChange::BorderColor(side, color))
    }

    /// Change the alignment of a row and its cells with `f`
    pub fn change_row_alignment<F>(&mut self, row: u32, f: F) -> Result<()>
    where
        F: Fn(&mut Alignment),
    {
        self.change_row_style(row, StyleChange::Alignment(&f))
    }

    pub fn change_row_horizontal_alignment(
        &mut self,
        row: u32,
        alignment: HorizontalAlignment,
    ) -> Result<()> {
        self.change_row_alignment(row, |a| a.horizontal = Some(alignment))
    }

    pub fn change_row_vertical_alignment(
        &mut self,
        row: u32,
        alignment: VerticalAlignment,
    ) -> Result<()> {
        self.change_row_alignment(row, |a| a.vertical = Some(alignment))
    }

    pub fn change_row_text_wrap(&mut self, row: u32, wrap: bool) -> Result<()> {
        self.change_row_alignment(row, |a| a.wrap_text = Some(wrap))
    }

    pub fn change_row_number_format(&mut self, row: u32, code: &str) -> Result<()> {
        self.change_row_style(row, StyleChange::NumberFormat(code))
    }

    /// Set a custom row height in points
    pub fn change_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        check_row(row)?;
        if !height.is_finite() || height < 0.0 {
            return Err(Error::invalid(format!("invalid row height {height}")));
        }
        self.attached()?;

        let target = self.sheet.sheet_data.ensure(row, 0);
        target.height = Some(height);
        target.custom_height = true;
        Ok(())
    }

    // === Columns ===

    /// Fill column `col` (and every cell in it) with a solid `rgb` color
    pub fn change_column_fill(&mut self, col: u16, rgb: &str) -> Result<()> {
        let color = Color::parse_rgb(rgb)?;
        self.change_column_style(col, StyleChange::Fill(color))
    }

    pub fn change_column_font_name(&mut self, col: u16, name: &str) -> Result<()> {
        self.change_column_style(col, StyleChange::Font(FontChange::Name(name.to_string())))
    }

    pub fn change_column_font_size(&mut self, col: u16, size: f64) -> Result<()> {
        self.change_column_style(col, StyleChange::Font(FontChange::Size(size)))
    }

    pub fn change_column_font_color(&mut self, col: u16, rgb: &str) -> Result<()> {
        let color = Color::parse_rgb(rgb)?;
        self.change_column_style(col, StyleChange::Font(FontChange::Color(color)))
    }

    pub fn change_column_italics(&mut self, col: u16, italic: bool) -> Result<()> {
        self.change_column_style(col, StyleChange::Font(FontChange::Italic(italic)))
    }

    pub fn change_column_bold(&mut self, col: u16, bold: bool) -> Result<()> {
        self.change_column_style(col, StyleChange::Font(FontChange::Bold(bold)))
    }

    pub fn change_column_underline(&mut self, col: u16, underline: bool) -> Result<()> {
        self.change_column_style(col, StyleChange::Font(FontChange::Underline(underline)))
    }

    pub fn change_column_strikethrough(&mut self, col: u16, strike: bool) -> Result<()> {
        self.change_column_style(col, StyleChange::Font(FontChange::Strikethrough(strike)))
    }

    pub fn change_column_border(
        &mut self,
        col: u16,
        side: BorderSide,
        weight: BorderLineStyle,
    ) -> Result<()> {
        self.change_column_style(col, StyleChange::Border(side, weight))
    }

    pub fn change_column_border_color(
        &mut self,
        col: u16,
        side: BorderSide,
        rgb: &str,
    ) -> Result<()> {
        let color = Color::parse_rgb(rgb)?;
        self.change_column_style(col, StyleChange::BorderColor(side, color))
    }

    /// Change the alignment of a column and its cells with `f`.
    ///
    /// A column without a width gets the default width set explicitly.
    pub fn change_column_alignment<F>(&mut self, col: u16, f: F) -> Result<()>
    where
        F: Fn(&mut Alignment),
    {
        self.change_column_style(col, StyleChange::Alignment(&f))
    }

    pub fn change_column_horizontal_alignment(
        &mut self,
        col: u16,
        alignment: HorizontalAlignment,
    ) -> Result<()> {
        self.change_column_alignment(col, |a| a.horizontal = Some(alignment))
    }

    pub fn change_column_vertical_alignment(
        &mut self,
        col: u16,
        alignment: VerticalAlignment,
    ) -> Result<()> {
        self.change_column_alignment(col, |a| a.vertical = Some(alignment))
    }

    pub fn change_column_text_wrap(&mut self, col: u16, wrap: bool) -> Result<()> {
        self.change_column_alignment(col, |a| a.wrap_text = Some(wrap))
    }

    pub fn change_column_number_format(&mut self, col: u16, code: &str) -> Result<()> {
        self.change_column_style(col, StyleChange::NumberFormat(code))
    }

    /// Set the raw stored width of a column
    pub fn change_column_width_raw(&mut self, col: u16, width: f64) -> Result<()> {
        check_col(col)?;
        if !width.is_finite() || width < 0.0 {
            return Err(Error::invalid(format!("invalid column width {width}")));
        }
        self.attached()?;

        let sheet = &mut *self.sheet;
        sheet.sheet_data.ensure(0, col);
        let range = sheet.cols.get_range(col);
        range.width = Some(width);
        range.custom_width = true;
        Ok(())
    }

    /// Set the width of a column in characters of the default font
    pub fn change_column_width(&mut self, col: u16, chars: f64) -> Result<()> {
        if !chars.is_finite() || chars < 0.0 {
            return Err(Error::invalid(format!("invalid column width {chars}")));
        }
        self.change_column_width_raw(col, chars_to_raw_width(chars))
    }

    // === Cells ===

    pub fn change_cell_fill(&mut self, row: u32, col: u16, rgb: &str) -> Result<()> {
        let color = Color::parse_rgb(rgb)?;
        self.change_cell_style(row, col, StyleChange::Fill(color))
    }

    pub fn change_cell_font_name(&mut self, row: u32, col: u16, name: &str) -> Result<()> {
        let change = FontChange::Name(name.to_string());
        self.change_cell_style(row, col, StyleChange::Font(change))
    }

    pub fn change_cell_font_size(&mut self, row: u32, col: u16, size: f64) -> Result<()> {
        self.change_cell_style(row, col, StyleChange::Font(FontChange::Size(size)))
    }

    pub fn change_cell_font_color(&mut self, row: u32, col: u16, rgb: &str) -> Result<()> {
        let color = Color::parse_rgb(rgb)?;
        self.change_cell_style(row, col, StyleChange::Font(FontChange::Color(color)))
    }

    pub fn change_cell_italics(&mut self, row: u32, col: u16, italic: bool) -> Result<()> {
        self.change_cell_style(row, col, StyleChange::Font(FontChange::Italic(italic)))
    }

    pub fn change_cell_bold(&mut self, row: u32, col: u16, bold: bool) -> Result<()> {
        self.change_cell_style(row, col, StyleChange::Font(FontChange::Bold(bold)))
    }

    pub fn change_cell_underline(&mut self, row: u32, col: u16, underline: bool) -> Result<()> {
        let change = FontChange::Underline(underline);
        self.change_cell_style(row, col, StyleChange::Font(change))
    }

    pub fn change_cell_strikethrough(&mut self, row: u32, col: u16, strike: bool) -> Result<()> {
        let change = FontChange::Strikethrough(strike);
        self.change_cell_style(row, col, StyleChange::Font(change))
    }

    pub fn change_cell_border(
        &mut self,
        row: u32,
        col: u16,
        side: BorderSide,
        weight: BorderLineStyle,
    ) -> Result<()> {
        self.change_cell_style(row, col, StyleChange::Border(side, weight))
    }

    pub fn change_cell_border_color(
        &mut self,
        row: u32,
        col: u16,
        side: BorderSide,
        rgb: &str,
    ) -> Result<()> {
        let color = Color::parse_rgb(rgb)?;
        self.change_cell_style(row, col, StyleChange::BorderColor(side, color))
    }

    /// Change the alignment of one cell with `f`
    pub fn change_cell_alignment<F>(&mut self, row: u32, col: u16, f: F) -> Result<()>
    where
        F: Fn(&mut Alignment),
    {
        self.change_cell_style(row, col, StyleChange::Alignment(&f))
    }

    pub fn change_cell_horizontal_alignment(
        &mut self,
        row: u32,
        col: u16,
        alignment: HorizontalAlignment,
    ) -> Result<()> {
        self.change_cell_alignment(row, col, |a| a.horizontal = Some(alignment))
    }

    pub fn change_cell_vertical_alignment(
        &mut self,
        row: u32,
        col: u16,
        alignment: VerticalAlignment,
    ) -> Result<()> {
        self.change_cell_alignment(row, col, |a| a.vertical = Some(alignment))
    }

    pub fn change_cell_text_wrap(&mut self, row: u32, col: u16, wrap: bool) -> Result<()> {
        self.change_cell_alignment(row, col, |a| a.wrap_text = Some(wrap))
    }

    /// Point a cell at the number format `code`, registering it if new
    pub fn set_cell_number_format(&mut self, row: u32, col: u16, code: &str) -> Result<()> {
        self.change_cell_style(row, col, StyleChange::NumberFormat(code))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::error::Error;
    use crate::style::{BorderLineStyle, BorderSide, HorizontalAlignment};
    use crate::workbook::Workbook;

    #[test]
    fn test_row_fill_reaches_cells() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.add_cell(1, 0, "a", None, true).unwrap();
        sheet.add_cell(1, 3, "b", None, true).unwrap();
        sheet.change_row_fill(1, "ff0000").unwrap();

        assert_eq!(sheet.row_fill(1).unwrap(), "ff0000");
        assert_eq!(sheet.cell_fill(1, 0).unwrap(), "ff0000");
        assert_eq!(sheet.cell_fill(1, 3).unwrap(), "ff0000");
        assert_eq!(sheet.row_fill(0).unwrap(), "ffffff");
    }

    #[test]
    fn test_row_change_keeps_other_cell_formatting() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.change_cell_bold(0, 1, true).unwrap();
        sheet.change_row_italics(0, true).unwrap();

        assert!(sheet.is_cell_bolded(0, 1).unwrap());
        assert!(sheet.is_cell_italicized(0, 1).unwrap());
        assert!(sheet.is_row_italicized(0).unwrap());
        assert!(!sheet.is_row_bolded(0).unwrap());
    }

    #[test]
    fn test_invalid_color_changes_nothing() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        assert!(matches!(
            sheet.change_row_fill(0, "red"),
            Err(Error::InvalidArgument(_))
        ));
        assert!(sheet.change_column_font_color(0, "ff00").is_err());
        assert!(sheet.change_cell_border_color(0, 0, BorderSide::Top, "#ff0000").is_err());
        assert!(sheet.sheet().sheet_data().is_empty());
        drop(sheet);
        assert_eq!(wb.styles().xf_count(), 1);
    }

    #[test]
    fn test_invalid_font_size_changes_nothing() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        assert!(sheet.change_row_font_size(2, 0.0).is_err());
        assert!(sheet.change_cell_font_size(2, 2, f64::INFINITY).is_err());
        assert!(sheet.sheet().sheet_data().is_empty());
    }

    #[test]
    fn test_column_alignment_sets_default_width() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        assert_eq!(sheet.column_width_raw(2).unwrap(), None);

        sheet
            .change_column_horizontal_alignment(2, HorizontalAlignment::Center)
            .unwrap();
        assert_eq!(sheet.column_width(2).unwrap(), 9.0);
        assert!(sheet.column_width_raw(2).unwrap().is_some());
        assert_eq!(
            sheet.column_horizontal_alignment(2).unwrap(),
            Some(HorizontalAlignment::Center)
        );

        // An explicit width survives later alignment changes
        sheet.change_column_width(3, 15.0).unwrap();
        sheet.change_column_text_wrap(3, true).unwrap();
        assert_eq!(sheet.column_width(3).unwrap(), 15.0);
    }

    #[test]
    fn test_column_change_stays_on_its_column() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.change_column_width(0, 12.0).unwrap();
        sheet.add_cell(4, 0, 1.0, None, true).unwrap();
        sheet.add_cell(4, 1, 1.0, None, true).unwrap();
        sheet.change_column_bold(0, true).unwrap();

        assert!(sheet.is_column_bolded(0).unwrap());
        assert!(!sheet.is_column_bolded(1).unwrap());
        assert!(sheet.is_cell_bolded(4, 0).unwrap());
        assert!(!sheet.is_cell_bolded(4, 1).unwrap());
        assert_eq!(sheet.column_width(0).unwrap(), 12.0);
        assert!(sheet.sheet().column_ranges().is_partition());
    }

    #[test]
    fn test_borders() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.add_cell(0, 0, "x", None, true).unwrap();
        sheet
            .change_row_border(0, BorderSide::Bottom, BorderLineStyle::Thick)
            .unwrap();
        sheet
            .change_row_border_color(0, BorderSide::Bottom, "00ff00")
            .unwrap();

        assert_eq!(
            sheet.row_border(0, BorderSide::Bottom).unwrap(),
            Some(BorderLineStyle::Thick)
        );
        assert_eq!(
            sheet.cell_border_color(0, 0, BorderSide::Bottom).unwrap().as_deref(),
            Some("00ff00")
        );
        assert_eq!(sheet.cell_border(0, 0, BorderSide::Top).unwrap(), None);
    }

    #[test]
    fn test_row_height() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        assert_eq!(sheet.row_height(4).unwrap(), 13.0);
        sheet.change_row_height(4, 30.5).unwrap();
        assert_eq!(sheet.row_height(4).unwrap(), 30.5);
        assert!(sheet.sheet().row(4).unwrap().custom_height);
        assert!(sheet.change_row_height(4, -1.0).is_err());
    }

    #[test]
    fn test_number_format() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.set_cell_number_format(0, 0, "0.000").unwrap();
        sheet.change_row_number_format(1, "0%").unwrap();

        assert_eq!(sheet.cell_number_format(0, 0).unwrap(), "0.000");
        assert_eq!(sheet.row_number_format(1).unwrap(), "0%");
        assert_eq!(sheet.cell_number_format(5, 5).unwrap(), "General");
    }

    #[test]
    fn test_cell_change_materializes_with_default_style() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        sheet.change_column_fill(2, "0000ff").unwrap();
        sheet.change_cell_underline(6, 2, true).unwrap();

        assert_eq!(sheet.cell_fill(6, 2).unwrap(), "0000ff");
        assert!(sheet.is_cell_underlined(6, 2).unwrap());
        assert!(sheet.sheet().cell(6, 2).is_some());
    }

    #[test]
    fn test_repeated_change_reuses_styles() {
        let mut wb = Workbook::new();
        let mut sheet = wb.sheet_editor(0).unwrap();
        for row in 0..50 {
            sheet.change_cell_font_name(row, 0, "Arial").unwrap();
        }
        drop(sheet);
        assert_eq!(wb.styles().font_count(), 2);
        assert_eq!(wb.styles().xf_count(), 2);
    }
}
