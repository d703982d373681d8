//! Upload decoding
//!
//! Turning uploaded bytes into sheets is pluggable: a [`Workspace`] only
//! talks to an [`UploadDecoder`]. CSV ships with the crate; workbook formats
//! can be added by implementing the trait.
//!
//! [`Workspace`]: crate::Workspace

use std::path::Path;

use sheetdesk_core::Sheets;
use sheetdesk_csv::{CsvReadOptions, CsvReader};

use crate::error::{WorkspaceError, WorkspaceResult};

/// Decodes uploaded bytes into named sheets
pub trait UploadDecoder {
    /// Whether this decoder handles the given file name
    fn accepts(&self, file_name: &str) -> bool;

    /// Decode file contents into sheets, in workbook order
    fn decode(&self, file_name: &str, bytes: &[u8]) -> WorkspaceResult<Sheets>;
}

/// Decoder for `.csv` uploads, producing a single sheet
#[derive(Debug, Clone, Default)]
pub struct CsvDecoder {
    options: CsvReadOptions,
}

impl CsvDecoder {
    /// Create a decoder with default CSV options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with custom CSV options
    pub fn with_options(options: CsvReadOptions) -> Self {
        Self { options }
    }
}

impl UploadDecoder for CsvDecoder {
    fn accepts(&self, file_name: &str) -> bool {
        extension(file_name).as_deref() == Some("csv")
    }

    fn decode(&self, file_name: &str, bytes: &[u8]) -> WorkspaceResult<Sheets> {
        if !self.accepts(file_name) {
            return Err(WorkspaceError::UnsupportedFormat(file_name.to_string()));
        }
        Ok(CsvReader::read_sheets(bytes, &self.options)?)
    }
}

/// Lower-cased extension of a file name
pub(crate) fn extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_decoder() {
        let decoder = CsvDecoder::new();
        assert!(decoder.accepts("People.CSV"));
        assert!(!decoder.accepts("people.xlsx"));
        assert!(!decoder.accepts("csv"));

        let sheets = decoder.decode("people.csv", b"name\nAlice\n").unwrap();
        assert_eq!(sheets.first_name(), Some("Sheet1"));
        assert_eq!(sheets.get("Sheet1").unwrap().row_count(), 1);

        assert!(matches!(
            decoder.decode("people.xlsx", b"x"),
            Err(WorkspaceError::UnsupportedFormat(_))
        ));
    }
}
