//! Workbook: the root of the document tree

use log::debug;

use crate::column::DEFAULT_COLUMN_WIDTH;
use crate::edit::SheetEditor;
use crate::error::{Error, Result};
use crate::style::StyleRegistry;
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// Characters a sheet name may not contain
const FORBIDDEN_NAME_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];

/// A spreadsheet document
///
/// Owns the ordered worksheets and the one [`StyleRegistry`] they all index
/// into. Worksheets are read through [`Workbook::worksheet`] and changed
/// through [`Workbook::sheet_editor`].
#[derive(Debug, Clone)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
    styles: StyleRegistry,
    settings: WorkbookSettings,
}

impl Workbook {
    /// A workbook holding a single empty `Sheet1`
    pub fn new() -> Self {
        Self::with_settings(WorkbookSettings::default())
    }

    pub fn with_settings(settings: WorkbookSettings) -> Self {
        Self {
            worksheets: vec![Worksheet::new("Sheet1")],
            styles: StyleRegistry::new(),
            settings,
        }
    }

    /// A workbook with no worksheets at all
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), StyleRegistry::new(), WorkbookSettings::default())
    }

    /// Assemble a workbook from parts read out of a file.
    ///
    /// Style indices inside the worksheets are taken to refer to `styles`;
    /// editing operations check them before use.
    pub fn from_parts(
        worksheets: Vec<Worksheet>,
        styles: StyleRegistry,
        settings: WorkbookSettings,
    ) -> Self {
        Self {
            worksheets,
            styles,
            settings,
        }
    }

    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.sheet_index(name).map(|i| &self.worksheets[i])
    }

    /// Position of the worksheet called `name` (exact match)
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.worksheets.iter().position(|ws| ws.name() == name)
    }

    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// The style registry shared by every worksheet
    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn settings(&self) -> &WorkbookSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut WorkbookSettings {
        &mut self.settings
    }

    /// Open an editor on the worksheet at `index`.
    ///
    /// The editor borrows the worksheet together with the style registry,
    /// so every mutation can register the styles it needs.
    pub fn sheet_editor(&mut self, index: usize) -> Result<SheetEditor<'_>> {
        let count = self.worksheets.len();
        let sheet = self
            .worksheets
            .get_mut(index)
            .ok_or(Error::SheetOutOfBounds(index, count))?;
        Ok(SheetEditor::new(sheet, &mut self.styles, &self.settings))
    }

    /// Append a worksheet named `SheetN` with the first free `N`
    pub fn add_worksheet(&mut self) -> Result<usize> {
        let name = (self.worksheets.len() + 1..)
            .map(|n| format!("Sheet{n}"))
            .find(|name| self.name_owner(name).is_none())
            .ok_or_else(|| Error::InvalidSheetName("no free default name".into()))?;
        self.add_worksheet_with_name(&name)
    }

    /// Append an empty worksheet called `name`
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.insert_worksheet(self.worksheets.len(), name)
    }

    /// Insert an empty worksheet called `name` at `index`
    pub fn insert_worksheet(&mut self, index: usize, name: &str) -> Result<usize> {
        if index > self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }
        self.check_new_name(name, None)?;
        self.worksheets.insert(index, Worksheet::new(name));
        debug!("added worksheet {name:?} at {index}");
        Ok(index)
    }

    /// Append a worksheet built elsewhere.
    ///
    /// Its style indices must refer to this workbook's registry.
    pub fn add_existing_worksheet(&mut self, worksheet: Worksheet) -> Result<usize> {
        self.check_new_name(worksheet.name(), None)?;
        self.worksheets.push(worksheet);
        Ok(self.worksheets.len() - 1)
    }

    /// Remove and return the worksheet at `index`.
    ///
    /// Style records it used stay in the registry.
    pub fn remove_worksheet(&mut self, index: usize) -> Result<Worksheet> {
        self.check_index(index)?;
        let worksheet = self.worksheets.remove(index);
        debug!("removed worksheet {:?}", worksheet.name());
        Ok(worksheet)
    }

    pub fn rename_worksheet(&mut self, index: usize, name: &str) -> Result<()> {
        self.check_index(index)?;
        self.check_new_name(name, Some(index))?;
        self.worksheets[index].set_name(name);
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.worksheets.len() {
            Ok(())
        } else {
            Err(Error::SheetOutOfBounds(index, self.worksheets.len()))
        }
    }

    /// Index of the sheet whose name matches `name` ignoring case
    fn name_owner(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();
        self.worksheets
            .iter()
            .position(|ws| ws.name().to_lowercase() == wanted)
    }

    /// `name` must be well-formed and not used by any sheet but `renaming`
    fn check_new_name(&self, name: &str, renaming: Option<usize>) -> Result<()> {
        check_sheet_name(name)?;
        match self.name_owner(name) {
            Some(owner) if Some(owner) != renaming => {
                Err(Error::DuplicateSheetName(name.to_string()))
            }
            _ => Ok(()),
        }
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

/// Check the naming rules every worksheet name follows
pub fn check_sheet_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if len == 0 || len > MAX_SHEET_NAME_LEN {
        return Err(Error::InvalidSheetName(format!(
            "{name:?} must be 1 to {MAX_SHEET_NAME_LEN} characters"
        )));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(Error::InvalidSheetName(format!("{name:?} contains {c:?}")));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(Error::InvalidSheetName(format!(
            "{name:?} cannot start or end with an apostrophe"
        )));
    }
    Ok(())
}

/// Workbook-level settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkbookSettings {
    /// Date system: false = 1900 (Windows), true = 1904 (Mac)
    pub date_1904: bool,
    /// Height in points reported for rows without a custom height
    pub default_row_height: f64,
    /// Width in characters reported for columns without a width
    pub default_column_width: f64,
}

impl Default for WorkbookSettings {
    fn default() -> Self {
        Self {
            date_1904: false,
            default_row_height: 13.0,
            default_column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}
