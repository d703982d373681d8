//! Workspace error types

use thiserror::Error;

/// Result type for workspace operations
pub type WorkspaceResult<T> = std::result::Result<T, WorkspaceError>;

/// Errors raised by [`Workspace`](crate::Workspace) operations
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Upload without a file name
    #[error("No file provided")]
    MissingFileName,

    /// Upload without content, or content without sheets
    #[error("File {0} is empty")]
    EmptyUpload(String),

    /// Upload over the size limit
    #[error("File {name} is {size} bytes, the limit is {limit}")]
    FileTooLarge { name: String, size: usize, limit: usize },

    /// No decoder for this file type
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// The session does not exist (any more)
    #[error("File session not found: {0}")]
    SessionNotFound(String),

    /// Validation or sheet-building error
    #[error(transparent)]
    Core(#[from] sheetdesk_core::Error),

    /// Decoding or export error
    #[error("Error processing file: {0}")]
    Csv(#[from] sheetdesk_csv::CsvError),

    /// Persistence error
    #[error("Store error: {0}")]
    Store(#[from] sheetdesk_store::StoreError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkspaceError {
    /// Whether the caller can fix this by changing its input
    pub fn is_user_error(&self) -> bool {
        match self {
            WorkspaceError::MissingFileName
            | WorkspaceError::EmptyUpload(_)
            | WorkspaceError::FileTooLarge { .. }
            | WorkspaceError::UnsupportedFormat(_)
            | WorkspaceError::SessionNotFound(_) => true,
            WorkspaceError::Core(err) => err.is_validation(),
            _ => false,
        }
    }
}
