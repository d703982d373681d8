//! Search across every loaded file and sheet

use sheetdesk_core::{CellValue, FileSession, Row};

use crate::search::SearchTerm;

/// Matching rows of one sheet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchHit {
    pub file_id: String,
    pub file_name: String,
    pub sheet_name: String,
    /// Header of the sheet, for display (never matched against)
    pub header_row: Vec<CellValue>,
    /// Non-empty, in sheet order
    pub matching_rows: Vec<Row>,
}

/// Search the data rows of every sheet of every session
///
/// One hit per sheet with at least one matching row, ordered by session then
/// by sheet. Sheets without matches and sheets without rows are left out. An
/// empty term returns no hits.
pub fn global_search(sessions: &[FileSession], term: &str) -> Vec<SearchHit> {
    let term = SearchTerm::new(term);
    if term.is_empty() {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for session in sessions {
        for sheet in session.sheets.iter() {
            let matching_rows: Vec<Row> = sheet
                .grid
                .data_rows()
                .iter()
                .filter(|row| term.matches(row))
                .cloned()
                .collect();

            if !matching_rows.is_empty() {
                hits.push(SearchHit {
                    file_id: session.id.clone(),
                    file_name: session.file_name.clone(),
                    sheet_name: sheet.name.clone(),
                    header_row: sheet.grid.header_cells().to_vec(),
                    matching_rows,
                });
            }
        }
    }
    hits
}

/// Sessions whose file name or any cell (headers included) contains the term
///
/// An empty term matches nothing.
pub fn matching_sessions<'a>(sessions: &'a [FileSession], term: &str) -> Vec<&'a FileSession> {
    let term = SearchTerm::new(term);
    if term.is_empty() {
        return Vec::new();
    }

    sessions
        .iter()
        .filter(|session| {
            session.file_name.to_lowercase().contains(term.as_str())
                || session
                    .sheets
                    .iter()
                    .any(|sheet| sheet.grid.rows().iter().any(|row| term.matches(row)))
        })
        .collect()
}
