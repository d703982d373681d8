//! # sheetdesk-query
//!
//! In-memory queries over sheetdesk grids.
//!
//! - [`classify_columns`] - full-scan column types and statistics
//! - [`LocalQuery`] / [`local_query`] - search then sort one sheet
//! - [`global_search`] - search every sheet of every loaded file
//! - [`sheet_summary`] / [`overview`] - shape and totals
//! - [`calculate`] - single-column aggregates for the calculator
//!
//! Every function here is pure: grids are borrowed, never changed, and
//! nothing is cached between calls.

mod calculator;
mod classify;
mod global;
mod local;
mod search;
mod summary;

pub use calculator::{
    calculate, calculator_columns, Calculation, CalculationHistory, CalculatorColumn, Operation,
    UnknownOperation, HISTORY_LIMIT,
};
pub use classify::{
    classify_column, classify_columns, numeric_columns, numeric_values, ColumnKind, ColumnStats,
    NumericStats, NUMERIC_THRESHOLD,
};
pub use global::{global_search, matching_sessions, SearchHit};
pub use local::{
    compare_cells, local_query, sort_rows, LocalQuery, SortDirection, SortState, TableView,
};
pub use search::{filter_rows, SearchTerm};
pub use summary::{blank_rows, overview, sheet_summary, Overview, SheetSummary};
