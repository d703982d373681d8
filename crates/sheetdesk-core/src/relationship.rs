//! Relationship definitions
//!
//! A relationship links a column of one sheet to a column of another, like a
//! foreign key. It is metadata only: both ends are stored as
//! `(file id, sheet name, column name)` references and are looked up again
//! whenever they are displayed. Files, sheets and columns may disappear or be
//! renamed after the link was made, so every lookup may come back empty.

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::session::FileSession;

/// Reference to one column of one sheet of one file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnRef {
    /// Id of the referenced file session
    pub file_id: String,
    /// Sheet name inside that file
    pub sheet_name: String,
    /// Header name of the column
    pub column_name: String,
}

impl ColumnRef {
    /// Create a new column reference
    pub fn new(
        file_id: impl Into<String>,
        sheet_name: impl Into<String>,
        column_name: impl Into<String>,
    ) -> Self {
        Self {
            file_id: file_id.into(),
            sheet_name: sheet_name.into(),
            column_name: column_name.into(),
        }
    }

    /// Look the reference up among the loaded sessions
    ///
    /// Returns `None` when the file, the sheet or the column no longer exists.
    /// With duplicate header names the first matching column wins.
    pub fn resolve<'a>(&self, sessions: &'a [FileSession]) -> Option<ResolvedColumn<'a>> {
        let session = sessions.iter().find(|s| s.id == self.file_id)?;
        let sheet = session.sheets.iter().find(|s| s.name == self.sheet_name)?;
        let column_index = sheet.grid.column_index(&self.column_name)?;
        Some(ResolvedColumn {
            session,
            sheet_name: &sheet.name,
            grid: &sheet.grid,
            column_index,
        })
    }

    fn first_empty_field(&self, prefix: Side) -> Option<&'static str> {
        let names = match prefix {
            Side::Source => ["source.file_id", "source.sheet_name", "source.column_name"],
            Side::Target => ["target.file_id", "target.sheet_name", "target.column_name"],
        };
        [&self.file_id, &self.sheet_name, &self.column_name]
            .iter()
            .position(|field| field.is_empty())
            .map(|i| names[i])
    }
}

#[derive(Clone, Copy)]
enum Side {
    Source,
    Target,
}

/// A column reference that was found
#[derive(Debug, Clone, Copy)]
pub struct ResolvedColumn<'a> {
    /// The referenced session
    pub session: &'a FileSession,
    /// The referenced sheet name
    pub sheet_name: &'a str,
    /// The referenced sheet
    pub grid: &'a Grid,
    /// Index of the referenced column in the header
    pub column_index: usize,
}

/// A relationship that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewRelationship {
    /// Referencing column
    pub source: ColumnRef,
    /// Referenced column
    pub target: ColumnRef,
}

impl NewRelationship {
    /// Create a new relationship draft
    pub fn new(source: ColumnRef, target: ColumnRef) -> Self {
        Self { source, target }
    }

    /// Check that all six reference fields are filled in
    pub fn validate(&self) -> Result<()> {
        let empty = self
            .source
            .first_empty_field(Side::Source)
            .or_else(|| self.target.first_empty_field(Side::Target));
        match empty {
            Some(field) => Err(Error::IncompleteRelationship { field }),
            None => Ok(()),
        }
    }
}

/// A stored relationship
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relationship {
    /// Store-assigned identifier
    pub id: String,
    /// Referencing column
    pub source: ColumnRef,
    /// Referenced column
    pub target: ColumnRef,
    /// Creation time, assigned by the store
    pub created_at: Option<DateTime<Utc>>,
}

impl Relationship {
    /// Whether both ends currently resolve
    pub fn is_resolved(&self, sessions: &[FileSession]) -> bool {
        self.source.resolve(sessions).is_some() && self.target.resolve(sessions).is_some()
    }
}

/// Display name of a file id, `N/A` when the file is gone
pub fn file_name_or_na<'a>(file_id: &str, sessions: &'a [FileSession]) -> &'a str {
    sessions
        .iter()
        .find(|s| s.id == file_id)
        .map(|s| s.file_name.as_str())
        .unwrap_or("N/A")
}
