//! # sheetdesk
//!
//! Upload spreadsheet files, browse their sheets, search within and across
//! them, link columns between files and get quick statistics and charts.
//!
//! ## Features
//!
//! - CSV upload, with a pluggable [`UploadDecoder`] for other formats
//! - Per-sheet search and click-to-sort, cross-file search
//! - Column classification, sheet summaries, a small calculator
//! - Chart data and a dashboard chart plan
//! - Column relationships between files
//! - In-memory or JSON file persistence
//! - CSV and JSON export
//!
//! ## Example
//!
//! ```rust
//! use sheetdesk::prelude::*;
//!
//! let mut workspace = Workspace::open(MemoryStore::new())?;
//! let id = workspace.upload(&CsvDecoder::new(), "people.csv", b"name,age\nAlice,30\nBob,25\n")?;
//!
//! workspace.toggle_sort(1);
//! let view = workspace.local_view();
//! assert_eq!(view.rows[0].cell(0), &CellValue::text("Bob"));
//!
//! let hits = workspace.global_search("alice");
//! assert_eq!(hits[0].file_id, id);
//! # Ok::<(), sheetdesk::WorkspaceError>(())
//! ```

mod decoder;
mod error;
mod export;
pub mod prelude;
mod workspace;

pub use decoder::{CsvDecoder, UploadDecoder};
pub use error::{WorkspaceError, WorkspaceResult};
pub use export::{export_rows, ExportFormat, GridExt};
pub use workspace::{RelationshipView, Workspace, WorkspaceOptions, MAX_UPLOAD_BYTES};

// Re-export core types
pub use sheetdesk_core::{
    file_name_or_na, parse_number, CellValue, ColumnRef, Error, FileSession, Grid,
    NewRelationship, Relationship, ResolvedColumn, Result, Row, Sheet, Sheets, Upload,
};

// Re-export query types
pub use sheetdesk_query::{
    calculate, calculator_columns, classify_columns, global_search, local_query,
    matching_sessions, overview, sheet_summary, Calculation, CalculationHistory,
    CalculatorColumn, ColumnKind, ColumnStats, LocalQuery, NumericStats, Operation, Overview,
    SearchHit, SearchTerm, SheetSummary, SortDirection, SortState, TableView,
};

// Re-export chart types
pub use sheetdesk_chart::{
    chart_data, chart_data_with, dashboard_charts, detect_chartable_columns, uploads_over_time,
    Chart, ChartOptions, ChartPoint, ChartType, ChartableColumns, DashboardOptions,
    DEFAULT_MAX_ITEMS,
};

// Re-export I/O types
pub use sheetdesk_csv::{
    CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter, JsonWriter, LineTerminator,
};
pub use sheetdesk_store::{
    JsonFileStore, MemoryStore, RelationshipStore, SessionStore, SessionUpdate, StoreError,
};
