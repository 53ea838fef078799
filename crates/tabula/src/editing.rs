//! Workbook-level editing helpers

use log::debug;
use tabula_core::{Error, Result, SheetEditor, Workbook};

/// Extension trait for Workbook to reach sheets by name and to run a batch
/// of edits against one sheet
pub trait WorkbookEditExt {
    /// Editor for the worksheet called `name`
    fn sheet_editor_by_name(&mut self, name: &str) -> Result<SheetEditor<'_>>;

    /// Run `f` against the editor of worksheet `index`
    fn edit_sheet<T, F>(&mut self, index: usize, f: F) -> Result<T>
    where
        F: FnOnce(&mut SheetEditor<'_>) -> Result<T>;

    /// Run `f` against the editor of the worksheet called `name`
    fn edit_sheet_by_name<T, F>(&mut self, name: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut SheetEditor<'_>) -> Result<T>;
}

impl WorkbookEditExt for Workbook {
    fn sheet_editor_by_name(&mut self, name: &str) -> Result<SheetEditor<'_>> {
        let index = self
            .sheet_index(name)
            .ok_or_else(|| Error::invalid(format!("no worksheet named {name:?}")))?;
        self.sheet_editor(index)
    }

    fn edit_sheet<T, F>(&mut self, index: usize, f: F) -> Result<T>
    where
        F: FnOnce(&mut SheetEditor<'_>) -> Result<T>,
    {
        let mut editor = self.sheet_editor(index)?;
        debug!("editing sheet {:?}", editor.sheet().name());
        f(&mut editor)
    }

    fn edit_sheet_by_name<T, F>(&mut self, name: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut SheetEditor<'_>) -> Result<T>,
    {
        let mut editor = self.sheet_editor_by_name(name)?;
        f(&mut editor)
    }
}
