//! Case-insensitive row search

use sheetdesk_core::{Grid, Row};

/// A search term, folded once for repeated matching
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchTerm {
    folded: String,
}

impl SearchTerm {
    /// Fold a raw search term
    pub fn new(term: &str) -> Self {
        Self {
            folded: term.to_lowercase(),
        }
    }

    /// Check if the term is empty (matches everything when filtering)
    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    /// The folded term
    pub fn as_str(&self) -> &str {
        &self.folded
    }

    /// Whether any cell of the row contains the term
    ///
    /// Null cells never match. An empty term matches every row.
    pub fn matches(&self, row: &Row) -> bool {
        self.is_empty() || row.contains_folded(&self.folded)
    }
}

impl From<&str> for SearchTerm {
    fn from(term: &str) -> Self {
        SearchTerm::new(term)
    }
}

/// Data rows of a grid that match the term, in grid order
///
/// The header is never filtered. An empty term returns every data row.
pub fn filter_rows(grid: &Grid, term: &SearchTerm) -> Vec<Row> {
    grid.data_rows()
        .iter()
        .filter(|row| term.matches(row))
        .cloned()
        .collect()
}
