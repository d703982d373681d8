//! Sheet and workspace summaries

use sheetdesk_core::{FileSession, Grid, Row};

use crate::classify::{classify_columns, ColumnKind};

/// Shape and completeness of one sheet
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetSummary {
    pub total_rows: usize,
    pub total_columns: usize,
    pub numeric_columns: usize,
    /// Every column that is not numeric
    pub text_columns: usize,
    /// Data rows without a single present cell
    pub empty_rows: usize,
    /// Percentage of non-empty data rows, 0 when there are no rows
    pub completeness: f64,
}

/// Summarize a sheet, `None` when it has no header
pub fn sheet_summary(grid: &Grid) -> Option<SheetSummary> {
    grid.header()?;

    let total_rows = grid.row_count();
    let total_columns = grid.width();
    let numeric_columns = classify_columns(grid)
        .iter()
        .filter(|c| c.kind == ColumnKind::Numeric)
        .count();
    let empty_rows = blank_rows(grid.data_rows());
    let completeness = if total_rows > 0 {
        (total_rows - empty_rows) as f64 / total_rows as f64 * 100.0
    } else {
        0.0
    };

    Some(SheetSummary {
        total_rows,
        total_columns,
        numeric_columns,
        text_columns: total_columns - numeric_columns,
        empty_rows,
        completeness,
    })
}

/// Totals across all loaded sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Overview {
    pub total_files: usize,
    pub total_sheets: usize,
    /// Data rows, headers excluded
    pub total_rows: usize,
}

/// Count files, sheets and data rows
pub fn overview(sessions: &[FileSession]) -> Overview {
    Overview {
        total_files: sessions.len(),
        total_sheets: sessions.iter().map(|s| s.sheets.len()).sum(),
        total_rows: sessions.iter().map(FileSession::total_rows).sum(),
    }
}

/// Count of data rows with no present cell
pub fn blank_rows(rows: &[Row]) -> usize {
    rows.iter().filter(|r| r.is_blank()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetdesk_core::{CellValue, Sheets};

    #[test]
    fn test_sheet_summary() {
        let grid = Grid::from(vec![
            vec!["name".into(), "qty".into(), "note".into()],
            vec!["a".into(), 1.into()],
            vec![CellValue::Null, "".into()],
            vec!["c".into(), "3".into(), "x".into()],
            vec!["d".into(), 4.into()],
        ]);
        let summary = sheet_summary(&grid).unwrap();

        assert_eq!(summary.total_rows, 4);
        assert_eq!(summary.total_columns, 3);
        assert_eq!(summary.numeric_columns, 1);
        assert_eq!(summary.text_columns, 2);
        assert_eq!(summary.empty_rows, 1);
        assert_eq!(summary.completeness, 75.0);
    }

    #[test]
    fn test_summary_edge_cases() {
        assert_eq!(sheet_summary(&Grid::new()), None);

        let header_only = Grid::from(vec![vec![CellValue::text("a")]]);
        let summary = sheet_summary(&header_only).unwrap();
        assert_eq!(summary.total_rows, 0);
        assert_eq!(summary.completeness, 0.0);
        assert_eq!(summary.text_columns, 1);
    }

    #[test]
    fn test_overview() {
        let grid = Grid::from(vec![
            vec![CellValue::text("h")],
            vec![CellValue::text("1")],
            vec![CellValue::text("2")],
        ]);
        let sessions = vec![
            FileSession {
                id: "a".into(),
                file_name: "a.csv".into(),
                sheets: Sheets::try_from_pairs([("S1", grid.clone()), ("S2", Grid::new())])
                    .unwrap(),
                uploaded_at: None,
            },
            FileSession {
                id: "b".into(),
                file_name: "b.csv".into(),
                sheets: Sheets::try_from_pairs([("S1", grid)]).unwrap(),
                uploaded_at: None,
            },
        ];

        assert_eq!(
            overview(&sessions),
            Overview {
                total_files: 2,
                total_sheets: 3,
                total_rows: 4,
            }
        );
        assert_eq!(overview(&[]), Overview::default());
    }
}
