//! End-to-end tests for the workspace (upload -> select -> query -> mutate)

use pretty_assertions::assert_eq;
use sheetdesk::prelude::*;
use sheetdesk::{ChartType, SheetSummary, Sheets};

const PEOPLE: &[u8] = b"name,city,age\nAlice,Oslo,30\nBob,Bergen,25\nCarol,Oslo,41\n,,\n";
const ORDERS: &[u8] = b"order,customer,total\n1,Alice,99.5\n2,Carol,12\n";

/// Decoder standing in for a workbook format with several sheets
struct TwoSheetDecoder;

impl UploadDecoder for TwoSheetDecoder {
    fn accepts(&self, file_name: &str) -> bool {
        file_name.ends_with(".xlsx")
    }

    fn decode(&self, _file_name: &str, _bytes: &[u8]) -> WorkspaceResult<Sheets> {
        let first = Grid::from(vec![
            vec![CellValue::text("sku"), CellValue::text("qty")],
            vec![CellValue::text("A-1"), CellValue::Number(4.0)],
        ]);
        let second = Grid::from(vec![vec![CellValue::text("note")]]);
        Ok(Sheets::try_from_pairs([("Stock", first), ("Notes", second)])?)
    }
}

fn workspace() -> Workspace<MemoryStore> {
    Workspace::open(MemoryStore::new()).unwrap()
}

/// Upload activates the new file and its first sheet
#[test]
fn test_upload_activates_file() {
    let mut ws = workspace();
    let id = ws.upload(&CsvDecoder::new(), "people.csv", PEOPLE).unwrap();

    assert_eq!(ws.sessions().len(), 1);
    assert_eq!(ws.active_session().unwrap().id, id);
    assert_eq!(ws.active_sheet_name(), Some("Sheet1"));
    assert!(ws.sessions()[0].uploaded_at.is_some());

    let view = ws.local_view();
    assert_eq!(view.headers.len(), 3);
    assert_eq!(view.len(), 4);
}

/// Newest upload is listed first and selected
#[test]
fn test_newest_upload_first() {
    let mut ws = workspace();
    ws.upload(&CsvDecoder::new(), "people.csv", PEOPLE).unwrap();
    let orders = ws.upload(&CsvDecoder::new(), "orders.csv", ORDERS).unwrap();

    let names: Vec<&str> = ws.sessions().iter().map(|s| s.file_name.as_str()).collect();
    assert_eq!(names, vec!["orders.csv", "people.csv"]);
    assert_eq!(ws.active_session().unwrap().id, orders);
}

/// Upload validation happens before anything is stored
#[test]
fn test_upload_validation() {
    let mut ws = workspace();
    let csv = CsvDecoder::new();

    assert!(matches!(
        ws.upload(&csv, "  ", PEOPLE),
        Err(WorkspaceError::MissingFileName)
    ));
    assert!(matches!(
        ws.upload(&csv, "empty.csv", b""),
        Err(WorkspaceError::EmptyUpload(_))
    ));
    assert!(matches!(
        ws.upload(&csv, "people.xlsx", PEOPLE),
        Err(WorkspaceError::UnsupportedFormat(_))
    ));

    let mut small = Workspace::with_options(
        MemoryStore::new(),
        sheetdesk::WorkspaceOptions {
            max_upload_bytes: 8,
            ..Default::default()
        },
    )
    .unwrap();
    let err = small.upload(&csv, "people.csv", PEOPLE).unwrap_err();
    assert!(matches!(err, WorkspaceError::FileTooLarge { limit: 8, .. }));
    assert!(err.is_user_error());

    assert!(ws.sessions().is_empty());
    assert!(ws.store().list_sessions().unwrap().is_empty());
}

/// Search and sort apply to the active sheet and reset on selection change
#[test]
fn test_local_query_resets_on_selection() {
    let mut ws = workspace();
    let people = ws.upload(&CsvDecoder::new(), "people.csv", PEOPLE).unwrap();
    ws.upload(&TwoSheetDecoder, "stock.xlsx", b"bytes").unwrap();

    assert!(ws.select_file(&people));
    ws.set_local_search("oslo");
    assert_eq!(ws.toggle_sort(2), SortState::ascending(2));
    assert_eq!(ws.toggle_sort(2), SortState::descending(2));

    let names: Vec<String> = ws
        .local_view()
        .rows
        .iter()
        .map(|r| r.cell(0).to_string())
        .collect();
    assert_eq!(names, vec!["Carol", "Alice"]);

    assert!(ws.select_sheet("Sheet1"));
    assert_eq!(ws.local_query().search(), "");
    assert_eq!(ws.local_query().sort(), None);
    assert!(!ws.select_sheet("Missing"));
    assert!(!ws.select_file("missing"));
}

/// Selecting a multi-sheet file picks the first sheet in workbook order
#[test]
fn test_select_sheet_of_workbook() {
    let mut ws = workspace();
    ws.upload(&TwoSheetDecoder, "stock.xlsx", b"bytes").unwrap();

    assert_eq!(ws.active_sheet_name(), Some("Stock"));
    assert!(ws.select_sheet("Notes"));
    assert_eq!(ws.active_grid().unwrap().row_count(), 0);
    assert!(ws.local_view().is_empty());
}

/// Global search spans files and sheets and ignores headers
#[test]
fn test_global_search() {
    let mut ws = workspace();
    ws.upload(&CsvDecoder::new(), "people.csv", PEOPLE).unwrap();
    ws.upload(&CsvDecoder::new(), "orders.csv", ORDERS).unwrap();

    let hits = ws.global_search("carol");
    let files: Vec<&str> = hits.iter().map(|h| h.file_name.as_str()).collect();
    assert_eq!(files, vec!["orders.csv", "people.csv"]);

    assert!(ws.global_search("customer").is_empty());
    assert!(ws.global_search("").is_empty());

    ws.set_global_search("bergen");
    assert_eq!(ws.global_results().len(), 1);
    ws.upload(&CsvDecoder::new(), "more.csv", ORDERS).unwrap();
    assert_eq!(ws.global_term(), "");

    let by_name: Vec<&str> = ws
        .matching_sessions("ORDERS")
        .iter()
        .map(|s| s.file_name.as_str())
        .collect();
    assert_eq!(by_name, vec!["orders.csv"]);
}

/// Statistics, summary, dashboard and calculator on the active sheet
#[test]
fn test_analytics() {
    let mut ws = workspace();
    assert!(ws.column_stats().is_empty());
    assert_eq!(ws.sheet_summary(), None);

    ws.upload(&CsvDecoder::new(), "people.csv", PEOPLE).unwrap();

    let stats = ws.column_stats();
    assert_eq!(stats.len(), 3);
    assert!(stats[2].is_numeric());
    assert_eq!(stats[2].sum(), Some(96.0));
    assert_eq!(stats[0].null_count, 1);

    assert_eq!(
        ws.sheet_summary(),
        Some(SheetSummary {
            total_rows: 4,
            total_columns: 3,
            numeric_columns: 1,
            text_columns: 2,
            empty_rows: 1,
            completeness: 75.0,
        })
    );

    let charts = ws.dashboard();
    assert!(!charts.is_empty());
    assert_eq!(charts[0].chart_type, ChartType::Bar);
    assert_eq!(charts[0].title.as_deref(), Some("name vs age"));

    let avg = ws.calculate(2, Operation::Average).unwrap();
    assert_eq!(avg.result, 32.0);
    assert_eq!(ws.calculate(0, Operation::Sum), None);
    assert_eq!(ws.history().len(), 1);

    let overview = ws.overview();
    assert_eq!(overview.total_files, 1);
    assert_eq!(overview.total_rows, 4);
    assert_eq!(ws.uploads_over_time().data.len(), 1);
}

/// Rename and delete keep the loaded snapshot and the store in step
#[test]
fn test_rename_and_delete() {
    let mut ws = workspace();
    let id = ws.upload(&CsvDecoder::new(), "people.csv", PEOPLE).unwrap();

    ws.rename_file(&id, "  staff.csv ").unwrap();
    assert_eq!(ws.session(&id).unwrap().file_name, "staff.csv");
    assert_eq!(
        ws.store().get_session(&id).unwrap().unwrap().file_name,
        "staff.csv"
    );
    assert!(matches!(
        ws.rename_file("missing", "x.csv"),
        Err(WorkspaceError::SessionNotFound(_))
    ));
    assert!(matches!(
        ws.rename_file(&id, " "),
        Err(WorkspaceError::MissingFileName)
    ));

    assert!(ws.delete_file(&id).unwrap());
    assert!(ws.active_session().is_none());
    assert_eq!(ws.active_sheet_name(), None);
    assert!(ws.sessions().is_empty());
    assert!(!ws.delete_file(&id).unwrap());
}

/// A file store keeps everything across workspace instances
#[test]
fn test_file_store_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheetdesk.json");

    let id = {
        let mut ws = Workspace::open(JsonFileStore::open(&path).unwrap()).unwrap();
        ws.upload(&CsvDecoder::new(), "people.csv", PEOPLE).unwrap()
    };

    let mut ws = Workspace::open(JsonFileStore::open(&path).unwrap()).unwrap();
    assert!(ws.active_session().is_none());
    assert!(ws.select_file(&id));
    assert_eq!(ws.active_grid().unwrap().row_count(), 4);
    assert_eq!(ws.active_grid().unwrap().data_rows()[0].cell(2), &CellValue::Number(30.0));
}
