//! Error types for tabula-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tabula-core
///
/// Every operation validates its arguments before the first mutation, so an
/// `Err` always means the document was left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An argument was rejected (bad shift option, out-of-range index,
    /// malformed color, unknown enum name, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation needs a workbook (style registry) the target is not
    /// attached to
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// A style index that does not exist in the registry
    #[error("Invalid style index: {0}")]
    InvalidStyleIndex(u32),

    /// Sheet index out of bounds
    #[error("Sheet index {0} out of bounds (count: {1})")]
    SheetOutOfBounds(usize, usize),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),
}

impl Error {
    /// Create an [`Error::InvalidArgument`] from a message
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Error returned by every operation on a detached worksheet
    pub(crate) fn detached() -> Self {
        Error::PreconditionFailed("worksheet is not attached to a workbook".into())
    }
}
