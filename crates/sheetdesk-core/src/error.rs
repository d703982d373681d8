//! Error types for sheetdesk-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetdesk-core
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name within one file
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// A relationship reference field was left empty
    #[error("Relationship field `{field}` must not be empty")]
    IncompleteRelationship {
        /// Dotted name of the empty field (e.g. `source.column_name`)
        field: &'static str,
    },
}

impl Error {
    /// Whether this error is a caller-side validation failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidSheetName(_)
                | Error::DuplicateSheetName(_)
                | Error::IncompleteRelationship { .. }
        )
    }
}
