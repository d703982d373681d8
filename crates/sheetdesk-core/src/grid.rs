//! Grid type - one parsed sheet

use crate::cell::CellValue;
use crate::row::Row;

/// The cells of one sheet, header first
///
/// Row 0 is the header, every following row is data in upload order. A grid
/// without any rows is a valid, empty sheet. Grids are never edited after
/// they are built; every query returns fresh values.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    /// Create an empty grid (no header, no data)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid from all of its rows, header first
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// The header row, if the grid has one
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Header cells, empty when the grid has no header
    pub fn header_cells(&self) -> &[CellValue] {
        self.header().map(Row::cells).unwrap_or(&[])
    }

    /// Header names in string form (duplicates preserved)
    pub fn column_names(&self) -> Vec<String> {
        self.header_cells().iter().map(ToString::to_string).collect()
    }

    /// Number of header columns
    pub fn width(&self) -> usize {
        self.header_cells().len()
    }

    /// Data rows (everything after the header)
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// All rows including the header
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Check if the grid has no rows at all, not even a header
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column across the data rows (null for short rows)
    pub fn column(&self, col: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.data_rows().iter().map(move |row| row.cell(col))
    }

    /// Index of the first header cell whose string form equals `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header_cells()
            .iter()
            .position(|cell| cell.to_string() == name)
    }
}

impl From<Vec<Row>> for Grid {
    fn from(rows: Vec<Row>) -> Self {
        Grid::from_rows(rows)
    }
}

impl From<Vec<Vec<CellValue>>> for Grid {
    fn from(rows: Vec<Vec<CellValue>>) -> Self {
        Grid::from_rows(rows.into_iter().map(Row::new).collect())
    }
}

impl FromIterator<Row> for Grid {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Grid::from_rows(iter.into_iter().collect())
    }
}
