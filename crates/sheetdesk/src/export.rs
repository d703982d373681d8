//! Grid export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use sheetdesk_core::{CellValue, Grid, Row};
use sheetdesk_csv::{CsvWriteOptions, CsvWriter, JsonWriter};

use crate::decoder::extension;
use crate::error::{WorkspaceError, WorkspaceResult};

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Format matching a path's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .to_str()
            .and_then(extension)
            .and_then(|e| e.parse().ok())
    }
}

impl FromStr for ExportFormat {
    type Err = WorkspaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(WorkspaceError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Write a header and rows in the given format
pub fn export_rows<W: Write>(
    headers: &[CellValue],
    rows: &[Row],
    format: ExportFormat,
    writer: W,
) -> WorkspaceResult<()> {
    match format {
        ExportFormat::Csv => {
            CsvWriter::write_view(headers, rows, writer, &CsvWriteOptions::default())?
        }
        ExportFormat::Json => JsonWriter::write_view(headers, rows, writer)?,
    }
    Ok(())
}

/// Extension trait for saving grids to files
pub trait GridExt {
    /// Save to a file, picking the format from its extension
    fn save<P: AsRef<Path>>(&self, path: P) -> WorkspaceResult<()>;
}

impl GridExt for Grid {
    fn save<P: AsRef<Path>>(&self, path: P) -> WorkspaceResult<()> {
        let path = path.as_ref();
        let format = ExportFormat::from_path(path)
            .ok_or_else(|| WorkspaceError::UnsupportedFormat(path.display().to_string()))?;

        let mut writer = BufWriter::new(File::create(path)?);
        export_rows(self.header_cells(), self.data_rows(), format, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid() -> Grid {
        Grid::from(vec![
            vec!["name".into(), "n".into()],
            vec!["Alice".into(), 3.into()],
        ])
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path("a/b.JSON"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_path("out.csv"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_path("out.pdf"), None);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_save_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("out.csv");
        grid().save(&csv_path).unwrap();
        assert_eq!(std::fs::read_to_string(&csv_path).unwrap(), "name,n\nAlice,3\n");

        let json_path = dir.path().join("out.json");
        grid().save(&json_path).unwrap();
        let text = std::fs::read_to_string(&json_path).unwrap();
        assert!(text.contains("\"name\": \"Alice\""));

        assert!(grid().save(dir.path().join("out.pdf")).is_err());
    }
}
