//! Sampling-based chartable-column detection
//!
//! Only the first few data rows of each column are looked at. This is not
//! the full-scan column classification used for statistics and the two may
//! disagree on the same column.

use sheetdesk_core::Grid;

use crate::options::ChartOptions;

/// Column indices split by their sampled type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartableColumns {
    /// Columns usable as categories
    pub category_columns: Vec<usize>,
    /// Columns usable as values
    pub numeric_columns: Vec<usize>,
}

impl ChartableColumns {
    /// Check if at least one category and one value column exist
    pub fn can_chart(&self) -> bool {
        !self.category_columns.is_empty() && !self.numeric_columns.is_empty()
    }
}

/// Detect chartable columns with default options
pub fn detect_chartable_columns(grid: &Grid) -> ChartableColumns {
    detect_chartable_columns_with(grid, &ChartOptions::default())
}

/// Detect chartable columns
///
/// A column is numeric when at least `numeric_threshold` of its sampled
/// present values parse as numbers. Columns with no present sampled value are
/// categories. A grid without data rows has no chartable columns.
pub fn detect_chartable_columns_with(grid: &Grid, options: &ChartOptions) -> ChartableColumns {
    let mut columns = ChartableColumns::default();
    if grid.data_rows().is_empty() {
        return columns;
    }

    let sample = &grid.data_rows()[..options.sample_rows.min(grid.row_count())];
    for index in 0..grid.width() {
        let present: Vec<_> = sample
            .iter()
            .map(|row| row.cell(index))
            .filter(|cell| cell.is_present())
            .collect();
        let numeric = present.iter().filter(|c| c.as_number().is_some()).count();

        if !present.is_empty() && numeric as f64 >= options.numeric_threshold * present.len() as f64 {
            columns.numeric_columns.push(index);
        } else {
            columns.category_columns.push(index);
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetdesk_core::{CellValue, Row};

    #[test]
    fn test_detects_numbers_and_categories() {
        let grid = Grid::from(vec![
            vec!["name".into(), "qty".into(), "blank".into()],
            vec!["a".into(), 1.into()],
            vec!["b".into(), "2".into()],
            vec!["c".into(), "".into()],
        ]);
        assert_eq!(
            detect_chartable_columns(&grid),
            ChartableColumns {
                category_columns: vec![0, 2],
                numeric_columns: vec![1],
            }
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // 7 of 10 numeric
        let mut rows = vec![Row::new(vec![CellValue::text("v")])];
        rows.extend((0..7).map(|n| Row::new(vec![CellValue::Number(n as f64)])));
        rows.extend((0..3).map(|_| Row::new(vec![CellValue::text("x")])));
        let columns = detect_chartable_columns(&Grid::from_rows(rows));
        assert_eq!(columns.numeric_columns, vec![0]);
    }

    #[test]
    fn test_only_samples_leading_rows() {
        let mut rows = vec![Row::new(vec![CellValue::text("v")])];
        rows.extend((0..10).map(|_| Row::new(vec![CellValue::text("label")])));
        rows.extend((0..50).map(|n| Row::new(vec![CellValue::Number(n as f64)])));
        let grid = Grid::from_rows(rows);

        assert_eq!(detect_chartable_columns(&grid).category_columns, vec![0]);

        let wide = ChartOptions {
            sample_rows: 60,
            ..ChartOptions::default()
        };
        assert_eq!(detect_chartable_columns_with(&grid, &wide).numeric_columns, vec![0]);
    }

    #[test]
    fn test_no_data_rows() {
        assert_eq!(detect_chartable_columns(&Grid::new()), ChartableColumns::default());
        let header_only = Grid::from(vec![vec![CellValue::text("a")]]);
        assert!(!detect_chartable_columns(&header_only).can_chart());
    }
}
