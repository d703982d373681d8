//! # sheetdesk-core
//!
//! Core data structures for the sheetdesk spreadsheet viewer.
//!
//! This crate provides the fundamental types used throughout sheetdesk:
//! - [`CellValue`] - Loosely-typed cell scalars, with [`parse_number`] as the
//!   single numeric test
//! - [`Row`] and [`Grid`] - One sheet, header row first
//! - [`Sheets`] and [`FileSession`] - An uploaded workbook
//! - [`Relationship`] and [`ColumnRef`] - Column links between sheets
//!
//! ## Example
//!
//! ```rust
//! use sheetdesk_core::{CellValue, Grid};
//!
//! let grid = Grid::from(vec![
//!     vec![CellValue::text("name"), CellValue::text("age")],
//!     vec![CellValue::text("Alice"), CellValue::text("30")],
//! ]);
//!
//! assert_eq!(grid.column_names(), vec!["name", "age"]);
//! assert_eq!(grid.data_rows()[0].cell(1).as_number(), Some(30.0));
//! ```

pub mod cell;
pub mod error;
pub mod grid;
pub mod relationship;
pub mod row;
pub mod session;

// Re-exports for convenience
pub use cell::{parse_number, CellValue};
pub use error::{Error, Result};
pub use grid::Grid;
pub use relationship::{file_name_or_na, ColumnRef, NewRelationship, Relationship, ResolvedColumn};
pub use row::Row;
pub use session::{FileSession, Sheet, Sheets, Upload};
