//! # sheetdesk-csv
//!
//! CSV import and CSV/JSON export for sheetdesk grids.
//!
//! ## Example
//!
//! ```rust
//! use sheetdesk_csv::{CsvReadOptions, CsvReader, JsonWriter};
//!
//! let grid = CsvReader::read("city,pop\nOslo,709000\n".as_bytes(), &CsvReadOptions::default())?;
//! let json = JsonWriter::to_value(&grid)?;
//! assert_eq!(json[0]["pop"], 709000);
//! # Ok::<(), sheetdesk_csv::CsvError>(())
//! ```

mod error;
mod json;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use json::JsonWriter;
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
