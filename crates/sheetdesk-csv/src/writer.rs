//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use sheetdesk_core::{CellValue, Grid, Row};
use sheetdesk_query::CalculationHistory;

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a grid to a CSV file
    pub fn write_file<P: AsRef<Path>>(grid: &Grid, path: P, options: &CsvWriteOptions) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(grid, file, options)
    }

    /// Write a grid to a writer, header first
    ///
    /// Null cells become empty fields and short rows stay short.
    pub fn write<W: Write>(grid: &Grid, writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        Self::write_rows(grid.rows(), writer, options)
    }

    /// Write a header and a set of rows, e.g. a filtered view
    pub fn write_view<W: Write>(
        headers: &[CellValue],
        rows: &[Row],
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let mut csv_writer = Self::builder(options).from_writer(writer);
        csv_writer.write_record(headers.iter().map(|c| c.to_string()))?;
        for row in rows {
            csv_writer.write_record(row.iter().map(|c| c.to_string()))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Render a grid as a CSV string
    pub fn to_string(grid: &Grid, options: &CsvWriteOptions) -> CsvResult<String> {
        let mut buf = Vec::new();
        Self::write(grid, &mut buf, options)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write calculator history as `Operation,Column,Result,Count`, newest first
    pub fn write_calculations<W: Write>(
        history: &CalculationHistory,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let mut csv_writer = Self::builder(options).from_writer(writer);
        csv_writer.write_record(["Operation", "Column", "Result", "Count"])?;
        for calc in history.iter() {
            csv_writer.write_record([
                calc.operation.to_string(),
                calc.column.clone(),
                calc.result.to_string(),
                calc.count.to_string(),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    fn write_rows<W: Write>(rows: &[Row], writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        let mut csv_writer = Self::builder(options).from_writer(writer);
        for row in rows {
            csv_writer.write_record(row.iter().map(|c| c.to_string()))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    fn builder(options: &CsvWriteOptions) -> csv::WriterBuilder {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .flexible(true);
        builder
    }
}
