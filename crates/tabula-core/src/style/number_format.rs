//! Number format table

use ahash::AHashMap;

/// Custom number format ids start after the built-in range
pub const FIRST_CUSTOM_NUM_FMT_ID: u32 = 164;

/// Built-in format codes by id (the ids every spreadsheet application knows
/// without a `numFmt` record)
const BUILTIN_FORMATS: &[(u32, &str)] = &[
    (0, "General"),
    (1, "0"),
    (2, "0.00"),
    (3, "#,##0"),
    (4, "#,##0.00"),
    (9, "0%"),
    (10, "0.00%"),
    (11, "0.00E+00"),
    (12, "# ?/?"),
    (13, "# ??/??"),
    (14, "mm-dd-yy"),
    (15, "d-mmm-yy"),
    (16, "d-mmm"),
    (17, "mmm-yy"),
    (18, "h:mm AM/PM"),
    (19, "h:mm:ss AM/PM"),
    (20, "h:mm"),
    (21, "h:mm:ss"),
    (22, "m/d/yy h:mm"),
    (37, "#,##0 ;(#,##0)"),
    (38, "#,##0 ;[Red](#,##0)"),
    (39, "#,##0.00;(#,##0.00)"),
    (40, "#,##0.00;[Red](#,##0.00)"),
    (45, "mm:ss"),
    (46, "[h]:mm:ss"),
    (47, "mmss.0"),
    (48, "##0.0E+0"),
    (49, "@"),
];

/// Built-in format code for `id`
pub fn builtin_format_code(id: u32) -> Option<&'static str> {
    BUILTIN_FORMATS
        .iter()
        .find(|(builtin, _)| *builtin == id)
        .map(|(_, code)| *code)
}

/// Built-in id for a format code
pub fn builtin_format_id(code: &str) -> Option<u32> {
    BUILTIN_FORMATS
        .iter()
        .find(|(_, builtin)| *builtin == code)
        .map(|(id, _)| *id)
}

/// A custom number format record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberFormat {
    pub id: u32,
    pub code: String,
}

/// Custom number formats of a workbook
///
/// Unlike fonts or fills these records are addressed by their `id`, not by
/// position, so the table keeps its own id allocator.
#[derive(Debug, Clone, Default)]
pub struct NumberFormats {
    formats: Vec<NumberFormat>,
    by_code: AHashMap<String, u32>,
}

impl NumberFormats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record loaded from a file.
    ///
    /// The first record for a code wins lookups; later duplicates are kept
    /// so their ids stay resolvable.
    pub fn insert(&mut self, format: NumberFormat) {
        self.by_code
            .entry(format.code.clone())
            .or_insert(format.id);
        self.formats.push(format);
    }

    /// Find or allocate the id for a format code.
    ///
    /// Built-in codes resolve to their built-in id without adding a record.
    pub fn register(&mut self, code: &str) -> u32 {
        if let Some(id) = builtin_format_id(code) {
            return id;
        }
        if let Some(&id) = self.by_code.get(code) {
            return id;
        }

        let id = self
            .formats
            .iter()
            .map(|f| f.id + 1)
            .max()
            .unwrap_or(FIRST_CUSTOM_NUM_FMT_ID)
            .max(FIRST_CUSTOM_NUM_FMT_ID);
        log::trace!("registered number format {id}: {code:?}");
        self.insert(NumberFormat {
            id,
            code: code.to_string(),
        });
        id
    }

    /// Format code for an id, built-in or custom
    pub fn code(&self, id: u32) -> Option<&str> {
        self.formats
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.code.as_str())
            .or_else(|| builtin_format_code(id))
    }

    /// Number of custom records
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Iterate over custom records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &NumberFormat> {
        self.formats.iter()
    }
}
