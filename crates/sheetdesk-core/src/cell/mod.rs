//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The loosely-typed scalar stored in a grid cell
//! - [`parse_number`] - The one numeric parse shared by every consumer

mod value;

pub use value::{parse_number, CellValue};
