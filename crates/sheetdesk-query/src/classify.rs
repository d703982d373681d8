//! Full-scan column classification and statistics
//!
//! Every data row of a column is inspected. A column is numeric when more
//! than [`NUMERIC_THRESHOLD`] of its present values parse as numbers.
//! The chart crate has its own, sampling-based detection; the two are
//! allowed to disagree.

use ahash::AHashSet;
use sheetdesk_core::{CellValue, Grid};

/// Fraction of present values that must be numeric for a numeric column
pub const NUMERIC_THRESHOLD: f64 = 0.7;

/// Inferred type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColumnKind {
    /// Mostly numbers
    Numeric,
    /// Has present values, not mostly numbers
    Text,
    /// No present values at all
    Empty,
}

/// Aggregates over the numeric values of a numeric column
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub sum: f64,
    /// Number of values that parsed as numbers
    pub count: usize,
}

impl NumericStats {
    /// Compute aggregates, `None` for an empty slice
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sum: f64 = values.iter().sum();
        Some(Self {
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            avg: sum / values.len() as f64,
            sum,
            count: values.len(),
        })
    }
}

/// Statistics of one column
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnStats {
    /// Column index in the header
    pub index: usize,
    /// Header text
    pub name: String,
    /// Inferred type
    pub kind: ColumnKind,
    /// Distinct present values, compared by string form
    pub unique_values: usize,
    /// Data rows where the column is null or an empty string
    pub null_count: usize,
    /// Only set for numeric columns
    pub numeric: Option<NumericStats>,
}

impl ColumnStats {
    pub fn min(&self) -> Option<f64> {
        self.numeric.map(|n| n.min)
    }

    pub fn max(&self) -> Option<f64> {
        self.numeric.map(|n| n.max)
    }

    pub fn avg(&self) -> Option<f64> {
        self.numeric.map(|n| n.avg)
    }

    pub fn sum(&self) -> Option<f64> {
        self.numeric.map(|n| n.sum)
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnKind::Numeric
    }
}

/// Classify every header column of a grid
///
/// A grid without a header yields no columns. A grid with a header but no
/// data rows yields one zeroed [`ColumnKind::Text`] entry per header cell.
pub fn classify_columns(grid: &Grid) -> Vec<ColumnStats> {
    (0..grid.width())
        .map(|index| classify_column(grid, index))
        .collect()
}

/// Classify a single column by index
///
/// Indexes past the header are classified like any other column; their name
/// is empty.
pub fn classify_column(grid: &Grid, index: usize) -> ColumnStats {
    let name = grid
        .header_cells()
        .get(index)
        .map(ToString::to_string)
        .unwrap_or_default();

    if grid.row_count() == 0 {
        return ColumnStats {
            index,
            name,
            kind: ColumnKind::Text,
            unique_values: 0,
            null_count: 0,
            numeric: None,
        };
    }

    let mut present = 0usize;
    let mut distinct = AHashSet::new();
    let mut numbers = Vec::new();

    for cell in grid.column(index).filter(|c| c.is_present()) {
        present += 1;
        distinct.insert(cell.to_string());
        if let Some(n) = cell.as_number() {
            numbers.push(n);
        }
    }

    let kind = kind_of(numbers.len(), present);
    let numeric = match kind {
        ColumnKind::Numeric => NumericStats::from_values(&numbers),
        _ => None,
    };

    ColumnStats {
        index,
        name,
        kind,
        unique_values: distinct.len(),
        null_count: grid.row_count() - present,
        numeric,
    }
}

/// Indexes of the columns the full scan marks numeric
pub fn numeric_columns(grid: &Grid) -> Vec<usize> {
    classify_columns(grid)
        .into_iter()
        .filter(ColumnStats::is_numeric)
        .map(|c| c.index)
        .collect()
}

/// Parsed numeric values of a column, skipping everything that does not parse
pub fn numeric_values(grid: &Grid, index: usize) -> Vec<f64> {
    grid.column(index).filter_map(CellValue::as_number).collect()
}

fn kind_of(numeric: usize, present: usize) -> ColumnKind {
    if numeric as f64 > NUMERIC_THRESHOLD * present as f64 {
        ColumnKind::Numeric
    } else if present > 0 {
        ColumnKind::Text
    } else {
        ColumnKind::Empty
    }
}
