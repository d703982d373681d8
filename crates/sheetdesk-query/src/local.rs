//! Single-sheet view: filter, then sort
//!
//! Ordering rule for sorting, ascending: absent cells (null or empty string)
//! first, then cells that parse as numbers compared numerically, then all
//! other cells compared by their string form, case-sensitively.

use std::cmp::Ordering;

use sheetdesk_core::{CellValue, Grid, Row};

use crate::search::{filter_rows, SearchTerm};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

impl SortState {
    /// Ascending sort on a column
    pub fn ascending(column: usize) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on a column
    pub fn descending(column: usize) -> Self {
        Self {
            column,
            direction: SortDirection::Descending,
        }
    }

    /// Next sort state after the user picks `column`
    ///
    /// Picking the current column flips the direction, any other column
    /// starts ascending.
    pub fn toggle(current: Option<SortState>, column: usize) -> SortState {
        match current {
            Some(state) if state.column == column => SortState {
                column,
                direction: state.direction.toggled(),
            },
            _ => SortState::ascending(column),
        }
    }
}

/// Compare two cells for sorting
///
/// Total order over all cells.
pub fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (SortKey::of(a), SortKey::of(b)) {
        (SortKey::Absent, SortKey::Absent) => Ordering::Equal,
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(&y),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(&y),
        (x, y) => x.rank().cmp(&y.rank()),
    }
}

enum SortKey {
    Absent,
    Number(f64),
    Text(String),
}

impl SortKey {
    fn of(cell: &CellValue) -> Self {
        if !cell.is_present() {
            SortKey::Absent
        } else if let Some(n) = cell.as_number() {
            SortKey::Number(n)
        } else {
            SortKey::Text(cell.to_string())
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Absent => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

/// Stable sort of rows by one column
pub fn sort_rows(rows: &mut [Row], sort: SortState) {
    rows.sort_by(|a, b| {
        let ord = compare_cells(a.cell(sort.column), b.cell(sort.column));
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

/// Filtered and sorted rows of one sheet, with its header
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableView {
    pub headers: Vec<CellValue>,
    pub rows: Vec<Row>,
}

impl TableView {
    /// Number of rows in the view
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the view has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Search and sort settings of the active sheet
///
/// Callers keep one of these per active sheet and call [`LocalQuery::reset`]
/// whenever another sheet or file becomes active.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocalQuery {
    search: String,
    sort: Option<SortState>,
}

impl LocalQuery {
    /// No search, no sort
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term
    pub fn with_search<S: Into<String>>(mut self, term: S) -> Self {
        self.search = term.into();
        self
    }

    /// Set the sort state
    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Current search term
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current sort state
    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    /// Replace the search term
    pub fn set_search<S: Into<String>>(&mut self, term: S) {
        self.search = term.into();
    }

    /// Apply a header click on `column`
    pub fn toggle_sort(&mut self, column: usize) -> SortState {
        let next = SortState::toggle(self.sort, column);
        self.sort = Some(next);
        next
    }

    /// Forget search and sort (another sheet became active)
    pub fn reset(&mut self) {
        self.search.clear();
        self.sort = None;
    }

    /// Run this query against a grid
    pub fn run(&self, grid: &Grid) -> TableView {
        local_query(grid, &SearchTerm::new(&self.search), self.sort)
    }
}

/// Filter the data rows of a grid, then sort them
///
/// The grid is left untouched; the view owns copies of the rows.
pub fn local_query(grid: &Grid, term: &SearchTerm, sort: Option<SortState>) -> TableView {
    let mut rows = filter_rows(grid, term);
    if let Some(sort) = sort {
        sort_rows(&mut rows, sort);
    }
    TableView {
        headers: grid.header_cells().to_vec(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid() -> Grid {
        Grid::from(vec![
            vec!["name".into(), "qty".into()],
            vec!["pear".into(), "10".into()],
            vec!["Apple".into(), 9.into()],
            vec!["banana".into(), "100".into()],
            vec!["apple pie".into()],
        ])
    }

    fn names(view: &TableView) -> Vec<String> {
        view.rows.iter().map(|r| r.cell(0).to_string()).collect()
    }

    #[test]
    fn test_toggle_same_column_flips() {
        let first = SortState::toggle(None, 1);
        assert_eq!(first, SortState::ascending(1));

        let second = SortState::toggle(Some(first), 1);
        assert_eq!(second, SortState::descending(1));

        let third = SortState::toggle(Some(second), 1);
        assert_eq!(third, SortState::ascending(1));
    }

    #[test]
    fn test_new_column_resets_to_ascending() {
        let next = SortState::toggle(Some(SortState::descending(0)), 1);
        assert_eq!(next, SortState::ascending(1));
    }

    #[test]
    fn test_numeric_sort_mixes_text_and_numbers() {
        let view = local_query(&grid(), &SearchTerm::default(), Some(SortState::ascending(1)));
        // Missing qty sorts first
        assert_eq!(names(&view), ["apple pie", "Apple", "pear", "banana"]);
    }

    #[test]
    fn test_text_sort_is_case_sensitive() {
        let view = local_query(&grid(), &SearchTerm::default(), Some(SortState::ascending(0)));
        assert_eq!(names(&view), ["Apple", "apple pie", "banana", "pear"]);

        let view = local_query(&grid(), &SearchTerm::default(), Some(SortState::descending(0)));
        assert_eq!(names(&view), ["pear", "banana", "apple pie", "Apple"]);
    }

    #[test]
    fn test_filter_before_sort() {
        let query = LocalQuery::new()
            .with_search("APPLE")
            .with_sort(SortState::descending(0));
        let view = query.run(&grid());

        assert_eq!(view.headers, vec![CellValue::text("name"), CellValue::text("qty")]);
        assert_eq!(names(&view), ["apple pie", "Apple"]);
    }

    #[test]
    fn test_source_grid_is_untouched() {
        let g = grid();
        let before = g.clone();
        let _ = local_query(&g, &SearchTerm::new("a"), Some(SortState::descending(1)));
        assert_eq!(g, before);
    }

    #[test]
    fn test_numbers_sort_before_text() {
        let g = Grid::from(vec![
            vec!["v".into()],
            vec!["5x".into()],
            vec![10.into()],
            vec!["".into()],
            vec!["9".into()],
        ]);
        let view = local_query(&g, &SearchTerm::default(), Some(SortState::ascending(0)));
        let values: Vec<String> = view.rows.iter().map(|r| r.cell(0).to_string()).collect();
        assert_eq!(values, ["", "9", "10", "5x"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let g = Grid::from(vec![
            vec!["k".into(), "tag".into()],
            vec![1.into(), "first".into()],
            vec![0.into(), "zero".into()],
            vec![1.into(), "second".into()],
        ]);
        let asc = local_query(&g, &SearchTerm::default(), Some(SortState::ascending(0)));
        let tags: Vec<String> = asc.rows.iter().map(|r| r.cell(1).to_string()).collect();
        assert_eq!(tags, ["zero", "first", "second"]);

        let desc = local_query(&g, &SearchTerm::default(), Some(SortState::descending(0)));
        let tags: Vec<String> = desc.rows.iter().map(|r| r.cell(1).to_string()).collect();
        assert_eq!(tags, ["first", "second", "zero"]);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut query = LocalQuery::new().with_search("x");
        query.toggle_sort(2);
        query.reset();
        assert_eq!(query, LocalQuery::new());
    }

    #[test]
    fn test_empty_and_header_only_grids() {
        let query = LocalQuery::new()
            .with_search("a")
            .with_sort(SortState::ascending(0));

        let view = query.run(&Grid::new());
        assert!(view.headers.is_empty());
        assert!(view.is_empty());

        let view = query.run(&Grid::from(vec![vec![CellValue::text("a")]]));
        assert_eq!(view.headers.len(), 1);
        assert!(view.is_empty());
    }
}
