//! JSON export
//!
//! A grid becomes an array with one object per data row, keyed by the string
//! form of the header cells. Keys keep header order. When two headers render
//! the same, the later column's value wins and the key stays where it first
//! appeared.

use std::io::Write;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use sheetdesk_core::{CellValue, Grid, Row};

use crate::error::CsvResult;

/// JSON exporter
pub struct JsonWriter;

impl JsonWriter {
    /// Write a grid as a pretty-printed JSON array
    pub fn write<W: Write>(grid: &Grid, writer: W) -> CsvResult<()> {
        serde_json::to_writer_pretty(writer, &Records::new(grid.header_cells(), grid.data_rows()))?;
        Ok(())
    }

    /// Write a header and a set of rows, e.g. a filtered view
    pub fn write_view<W: Write>(headers: &[CellValue], rows: &[Row], writer: W) -> CsvResult<()> {
        serde_json::to_writer_pretty(writer, &Records::new(headers, rows))?;
        Ok(())
    }

    /// Render a grid as a JSON value
    pub fn to_value(grid: &Grid) -> CsvResult<serde_json::Value> {
        Ok(serde_json::to_value(Records::new(
            grid.header_cells(),
            grid.data_rows(),
        ))?)
    }
}

struct Records<'a> {
    keys: Vec<String>,
    /// Column feeding each key
    columns: Vec<usize>,
    rows: &'a [Row],
}

impl<'a> Records<'a> {
    fn new(headers: &[CellValue], rows: &'a [Row]) -> Self {
        let mut keys: Vec<String> = Vec::with_capacity(headers.len());
        let mut columns = Vec::with_capacity(headers.len());
        for (col, header) in headers.iter().enumerate() {
            let key = header.to_string();
            match keys.iter().position(|k| *k == key) {
                Some(slot) => columns[slot] = col,
                None => {
                    keys.push(key);
                    columns.push(col);
                }
            }
        }
        // No header, no records
        let rows = if headers.is_empty() { &rows[..0] } else { rows };
        Self { keys, columns, rows }
    }
}

impl Serialize for Records<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows {
            seq.serialize_element(&Record { records: self, row })?;
        }
        seq.end()
    }
}

struct Record<'a> {
    records: &'a Records<'a>,
    row: &'a Row,
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.keys.len()))?;
        for (key, &col) in self.records.keys.iter().zip(&self.records.columns) {
            map.serialize_entry(key, &JsonCell(self.row.cell(col)))?;
        }
        map.end()
    }
}

struct JsonCell<'a>(&'a CellValue);

impl Serialize for JsonCell<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            CellValue::Null => serializer.serialize_none(),
            CellValue::Boolean(b) => serializer.serialize_bool(*b),
            // Whole numbers print without a fraction
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                serializer.serialize_i64(*n as i64)
            }
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_objects_keyed_by_header() {
        let grid = Grid::from(vec![
            vec!["name".into(), "age".into(), "ok".into()],
            vec!["Alice".into(), 30.into(), true.into()],
            vec!["Bob".into(), 2.5.into()],
        ]);
        assert_eq!(
            JsonWriter::to_value(&grid).unwrap(),
            json!([
                {"name": "Alice", "age": 30, "ok": true},
                {"name": "Bob", "age": 2.5, "ok": null},
            ])
        );
    }

    #[test]
    fn test_duplicate_headers_keep_last_value() {
        let grid = Grid::from(vec![
            vec!["id".into(), "x".into(), "id".into()],
            vec![1.into(), "a".into(), 2.into()],
        ]);
        let mut buf = Vec::new();
        JsonWriter::write(&grid, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&text).unwrap(),
            json!([{"id": 2, "x": "a"}])
        );
        assert!(text.find("\"id\"").unwrap() < text.find("\"x\"").unwrap());
    }

    #[test]
    fn test_no_header_exports_empty_array() {
        assert_eq!(JsonWriter::to_value(&Grid::new()).unwrap(), json!([]));
        let header_only = Grid::from(vec![vec![CellValue::text("a")]]);
        assert_eq!(JsonWriter::to_value(&header_only).unwrap(), json!([]));
    }
}
