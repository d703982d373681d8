//! File sessions - one uploaded workbook and its sheets

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::grid::Grid;

/// A named sheet inside a file
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sheet {
    /// Sheet name, unique within its file
    pub name: String,
    /// Sheet contents
    pub grid: Grid,
}

/// Ordered mapping of sheet name to grid
///
/// Sheets keep the order in which they were inserted (the workbook order).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Sheets {
    sheets: Vec<Sheet>,
}

impl Sheets {
    /// Create an empty sheet set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet
    ///
    /// Fails on an empty name or a name already present in this set.
    pub fn insert<S: Into<String>>(&mut self, name: S, grid: Grid) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if self.contains(&name) {
            return Err(Error::DuplicateSheetName(name));
        }
        self.sheets.push(Sheet { name, grid });
        Ok(())
    }

    /// Build a sheet set from `(name, grid)` pairs, in order
    pub fn try_from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Grid)>,
        S: Into<String>,
    {
        let mut sheets = Sheets::new();
        for (name, grid) in pairs {
            sheets.insert(name, grid)?;
        }
        Ok(sheets)
    }

    /// Get a sheet's grid by name
    pub fn get(&self, name: &str) -> Option<&Grid> {
        self.sheets.iter().find(|s| s.name == name).map(|s| &s.grid)
    }

    /// Check if a sheet with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.sheets.iter().any(|s| s.name == name)
    }

    /// Sheet names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|s| s.name.as_str())
    }

    /// Name of the first sheet
    pub fn first_name(&self) -> Option<&str> {
        self.sheets.first().map(|s| s.name.as_str())
    }

    /// Iterate over sheets in order
    pub fn iter(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter()
    }

    /// Number of sheets
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Check if there are no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl IntoIterator for Sheets {
    type Item = Sheet;
    type IntoIter = std::vec::IntoIter<Sheet>;

    fn into_iter(self) -> Self::IntoIter {
        self.sheets.into_iter()
    }
}

/// Decoded upload, not yet persisted
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Upload {
    /// Original file name
    pub file_name: String,
    /// Decoded sheets
    pub sheets: Sheets,
}

impl Upload {
    /// Create a new upload
    pub fn new<S: Into<String>>(file_name: S, sheets: Sheets) -> Self {
        Self {
            file_name: file_name.into(),
            sheets,
        }
    }
}

/// A persisted upload
///
/// `id` and `uploaded_at` are assigned by the store. `file_name` may be
/// renamed later; the sheets never change.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileSession {
    /// Store-assigned identifier
    pub id: String,
    /// Display name
    pub file_name: String,
    /// Sheets in workbook order
    pub sheets: Sheets,
    /// Upload time, absent until persisted
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl FileSession {
    /// Get a sheet's grid by name
    pub fn sheet(&self, name: &str) -> Option<&Grid> {
        self.sheets.get(name)
    }

    /// Number of data rows across all sheets
    pub fn total_rows(&self) -> usize {
        self.sheets.iter().map(|s| s.grid.row_count()).sum()
    }
}
