//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use sheetdesk_core::{parse_number, CellValue, Grid, Row, Sheets};

/// CSV file reader
///
/// Every record becomes a row, the first one included: the header is just
/// row 0 of the grid. Records may have different lengths.
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a grid
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Grid> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a grid
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Grid> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .trim(if options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(reader);

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let row: Row = record
                .iter()
                .map(|field| {
                    if options.auto_detect_types {
                        Self::detect_type(field)
                    } else if field.is_empty() {
                        CellValue::Null
                    } else {
                        CellValue::text(field)
                    }
                })
                .collect();
            rows.push(row);
        }

        log::debug!("read {} CSV records", rows.len());
        Ok(Grid::from_rows(rows))
    }

    /// Read CSV into a sheet set holding one sheet named by the options
    pub fn read_sheets<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Sheets> {
        let grid = Self::read(reader, options)?;
        let mut sheets = Sheets::new();
        sheets.insert(options.sheet_name.clone(), grid)?;
        Ok(sheets)
    }

    /// Detect the type of a field value
    ///
    /// Blank fields are null, `true`/`false` in any case are booleans, finite
    /// numbers are numbers. Anything else is kept as text, untrimmed.
    pub fn detect_type(field: &str) -> CellValue {
        let trimmed = field.trim();

        if trimmed.is_empty() {
            return CellValue::Null;
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Boolean(false);
        }

        if let Some(n) = parse_number(trimmed) {
            return CellValue::Number(n);
        }

        CellValue::text(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detect_type() {
        assert_eq!(CsvReader::detect_type(""), CellValue::Null);
        assert_eq!(CsvReader::detect_type("   "), CellValue::Null);
        assert_eq!(CsvReader::detect_type("TRUE"), CellValue::Boolean(true));
        assert_eq!(CsvReader::detect_type("false"), CellValue::Boolean(false));
        assert_eq!(CsvReader::detect_type(" 42 "), CellValue::Number(42.0));
        assert_eq!(CsvReader::detect_type("-1.5e2"), CellValue::Number(-150.0));
        assert_eq!(CsvReader::detect_type("inf"), CellValue::text("inf"));
        assert_eq!(CsvReader::detect_type("yes"), CellValue::text("yes"));
        assert_eq!(CsvReader::detect_type(" Oslo"), CellValue::text(" Oslo"));
    }

    #[test]
    fn test_read_keeps_header_as_first_row() {
        let data = "name,age,active\nAlice,30,true\nBob,,FALSE\n";
        let grid = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap();

        assert_eq!(grid.column_names(), vec!["name", "age", "active"]);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(
            grid.data_rows()[0].cells(),
            &[
                CellValue::text("Alice"),
                CellValue::Number(30.0),
                CellValue::Boolean(true),
            ]
        );
        assert_eq!(grid.data_rows()[1].cell(1), &CellValue::Null);
    }

    #[test]
    fn test_ragged_rows() {
        let data = "a,b,c\n1\n1,2,3,4\n";
        let grid = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap();
        assert_eq!(grid.data_rows()[0].len(), 1);
        assert_eq!(grid.data_rows()[1].len(), 4);
    }

    #[test]
    fn test_without_type_detection() {
        let options = CsvReadOptions {
            auto_detect_types: false,
            ..Default::default()
        };
        let grid = CsvReader::read("n\n42\n\n".as_bytes(), &options).unwrap();
        assert_eq!(grid.data_rows()[0].cell(0), &CellValue::text("42"));
    }

    #[test]
    fn test_delimiter_trim_and_quotes() {
        let options = CsvReadOptions {
            delimiter: b';',
            trim: true,
            ..Default::default()
        };
        let data = "city ; note\n Oslo ;\"a;b\"\n";
        let grid = CsvReader::read(data.as_bytes(), &options).unwrap();
        assert_eq!(grid.column_names(), vec!["city", "note"]);
        assert_eq!(
            grid.data_rows()[0].cells(),
            &[CellValue::text("Oslo"), CellValue::text("a;b")]
        );
    }

    #[test]
    fn test_read_sheets_uses_sheet_name() {
        let options = CsvReadOptions::default().sheet_name("Data");
        let sheets = CsvReader::read_sheets("x\n1\n".as_bytes(), &options).unwrap();
        assert_eq!(sheets.names().collect::<Vec<_>>(), vec!["Data"]);
        assert_eq!(sheets.get("Data").unwrap().row_count(), 1);
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.csv");
        std::fs::write(&path, "name\nAlice\n").unwrap();

        let grid = CsvReader::read_file(&path, &CsvReadOptions::default()).unwrap();
        assert_eq!(grid.data_rows()[0].cell(0), &CellValue::text("Alice"));
    }
}
