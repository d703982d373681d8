//! Row types

use crate::cell::CellValue;

static NULL_CELL: CellValue = CellValue::Null;

/// One row of a grid
///
/// Rows of the same grid may differ in length. Reads past the end of a short
/// row yield [`CellValue::Null`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Row(Vec<CellValue>);

impl Row {
    /// Create a row from its cells
    pub fn new(cells: Vec<CellValue>) -> Self {
        Row(cells)
    }

    /// Get a cell by column index, null when the row is too short
    pub fn cell(&self, col: usize) -> &CellValue {
        self.0.get(col).unwrap_or(&NULL_CELL)
    }

    /// The stored cells
    pub fn cells(&self) -> &[CellValue] {
        &self.0
    }

    /// Iterate over the stored cells
    pub fn iter(&self) -> std::slice::Iter<'_, CellValue> {
        self.0.iter()
    }

    /// Number of stored cells
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the row stores no cells at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if no cell in the row is present (null or empty strings only)
    pub fn is_blank(&self) -> bool {
        !self.0.iter().any(CellValue::is_present)
    }

    /// Check whether any cell contains the already lower-cased needle
    pub fn contains_folded(&self, folded_needle: &str) -> bool {
        self.0.iter().any(|cell| cell.contains_folded(folded_needle))
    }

    /// Consume the row, returning its cells
    pub fn into_cells(self) -> Vec<CellValue> {
        self.0
    }
}

impl From<Vec<CellValue>> for Row {
    fn from(cells: Vec<CellValue>) -> Self {
        Row(cells)
    }
}

impl<V: Into<CellValue>> FromIterator<V> for Row {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Row(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a CellValue;
    type IntoIter = std::slice::Iter<'a, CellValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
