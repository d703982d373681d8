//! sheetdesk CLI - upload, browse, search and chart spreadsheet files

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sheetdesk::prelude::*;
use sheetdesk::{
    calculator_columns, chart_data_with, export_rows, ChartOptions, ChartPoint, CsvReadOptions,
    DEFAULT_MAX_ITEMS,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sheetdesk")]
#[command(author, version, about = "Spreadsheet upload, search and analytics tool")]
struct Cli {
    /// Store document
    #[arg(long, env = "SHEETDESK_STORE", default_value = "sheetdesk.json", global = true)]
    store: PathBuf,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a CSV file
    Upload {
        /// Input CSV file
        input: PathBuf,

        /// Name of the sheet the file becomes
        #[arg(long, default_value = "Sheet1")]
        sheet_name: String,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// List uploaded files, most recent first
    #[command(alias = "ls")]
    List,

    /// Show a sheet, optionally filtered and sorted
    Show {
        /// File id
        id: String,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Only rows containing this text
        #[arg(long)]
        search: Option<String>,

        /// Sort by this column (0-based)
        #[arg(long)]
        sort: Option<usize>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },

    /// Rename a file
    Rename {
        /// File id
        id: String,

        /// New file name
        name: String,
    },

    /// Delete a file
    #[command(alias = "rm")]
    Delete {
        /// File id
        id: String,
    },

    /// Search every sheet of every file
    Search {
        /// Text to look for (case-insensitive)
        term: String,
    },

    /// Sheet summary and column statistics
    Stats {
        /// File id
        id: String,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// Totals across files and uploads per day
    Overview,

    /// Chart data for one category/value pair, or the dashboard plan
    Chart {
        /// File id
        id: String,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Category column (0-based)
        #[arg(long, requires = "value")]
        category: Option<usize>,

        /// Value column (0-based)
        #[arg(long, requires = "category")]
        value: Option<usize>,

        /// Maximum number of points
        #[arg(long, default_value_t = DEFAULT_MAX_ITEMS)]
        max: usize,
    },

    /// Sum, average, count, min or max of a column
    Calc {
        /// File id
        id: String,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Column (0-based); lists numeric columns when omitted
        #[arg(short, long)]
        column: Option<usize>,

        /// Operation: sum, avg, count, min, max
        #[arg(long, default_value = "sum")]
        op: Operation,
    },

    /// Export a sheet as CSV or JSON
    Export {
        /// File id
        id: String,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Output format (default: from the output extension, else csv)
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Only rows containing this text
        #[arg(long)]
        search: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage column relationships
    Relate {
        #[command(subcommand)]
        command: RelateCommands,
    },
}

#[derive(Subcommand)]
enum RelateCommands {
    /// Link two columns, each given as FILE_ID:SHEET:COLUMN
    Add {
        /// Referencing column
        #[arg(value_parser = parse_column_ref)]
        source: ColumnRef,

        /// Referenced column
        #[arg(value_parser = parse_column_ref)]
        target: ColumnRef,
    },

    /// List relationships, newest first
    List,

    /// Delete a relationship
    Delete {
        /// Relationship id
        id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    log::debug!("using store {}", cli.store.display());
    let store = JsonFileStore::open(&cli.store)
        .with_context(|| format!("Failed to open store '{}'", cli.store.display()))?;
    let mut ws = Workspace::open(store).context("Failed to load workspace")?;

    match cli.command {
        Commands::Upload {
            input,
            sheet_name,
            delimiter,
        } => upload(&mut ws, &input, sheet_name, delimiter),
        Commands::List => list_files(&ws),
        Commands::Show {
            id,
            sheet,
            search,
            sort,
            desc,
        } => show(&mut ws, &id, sheet.as_deref(), search.as_deref(), sort, desc),
        Commands::Rename { id, name } => {
            ws.rename_file(&id, &name)
                .with_context(|| format!("Failed to rename '{}'", id))?;
            eprintln!("Renamed {} to '{}'", id, name.trim());
            Ok(())
        }
        Commands::Delete { id } => {
            if !ws.delete_file(&id).context("Failed to delete file")? {
                bail!("File '{}' not found", id);
            }
            eprintln!("Deleted {}", id);
            Ok(())
        }
        Commands::Search { term } => search(&ws, &term),
        Commands::Stats { id, sheet } => stats(&mut ws, &id, sheet.as_deref()),
        Commands::Overview => show_overview(&ws),
        Commands::Chart {
            id,
            sheet,
            category,
            value,
            max,
        } => chart(&mut ws, &id, sheet.as_deref(), category.zip(value), max),
        Commands::Calc {
            id,
            sheet,
            column,
            op,
        } => calc(&mut ws, &id, sheet.as_deref(), column, op),
        Commands::Export {
            id,
            sheet,
            format,
            search,
            output,
        } => export(
            &mut ws,
            &id,
            sheet.as_deref(),
            format,
            search.as_deref(),
            output.as_deref(),
        ),
        Commands::Relate { command } => relate(&mut ws, command),
    }
}

fn parse_column_ref(s: &str) -> std::result::Result<ColumnRef, String> {
    let mut parts = s.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(file), Some(sheet), Some(column)) => Ok(ColumnRef::new(file, sheet, column)),
        _ => Err(format!("expected FILE_ID:SHEET:COLUMN, got '{}'", s)),
    }
}

/// Make a file and sheet active, failing on unknown names
fn select<S: SessionStore + RelationshipStore>(
    ws: &mut Workspace<S>,
    id: &str,
    sheet: Option<&str>,
) -> Result<()> {
    if !ws.select_file(id) {
        bail!("File '{}' not found", id);
    }
    if let Some(sheet) = sheet {
        if !ws.select_sheet(sheet) {
            bail!("Sheet '{}' not found in file '{}'", sheet, id);
        }
    }
    if ws.active_grid().is_none() {
        bail!("File '{}' has no sheets", id);
    }
    Ok(())
}

fn upload<S: SessionStore + RelationshipStore>(
    ws: &mut Workspace<S>,
    input: &Path,
    sheet_name: String,
    delimiter: char,
) -> Result<()> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character");
    }
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read '{}'", input.display()))?;
    let file_name = input
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid file name '{}'", input.display()))?;

    let decoder = CsvDecoder::with_options(
        CsvReadOptions::default()
            .delimiter(delimiter as u8)
            .sheet_name(sheet_name),
    );
    let id = ws
        .upload(&decoder, file_name, &bytes)
        .with_context(|| format!("Failed to upload '{}'", input.display()))?;

    let rows = ws.active_session().map_or(0, FileSession::total_rows);
    eprintln!("Uploaded '{}' ({} rows)", file_name, rows);
    println!("{}", id);
    Ok(())
}

fn list_files<S: SessionStore + RelationshipStore>(ws: &Workspace<S>) -> Result<()> {
    for session in ws.sessions() {
        let uploaded = session
            .uploaded_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "{}\t{}\t{} sheets\t{} rows\t{}",
            session.id,
            session.file_name,
            session.sheets.len(),
            session.total_rows(),
            uploaded
        );
    }
    Ok(())
}

fn show<S: SessionStore + RelationshipStore>(
    ws: &mut Workspace<S>,
    id: &str,
    sheet: Option<&str>,
    search: Option<&str>,
    sort: Option<usize>,
    desc: bool,
) -> Result<()> {
    select(ws, id, sheet)?;
    if let Some(term) = search {
        ws.set_local_search(term);
    }
    if let Some(column) = sort {
        ws.toggle_sort(column);
        if desc {
            ws.toggle_sort(column);
        }
    }

    let view = ws.local_view();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_row(&mut out, &view.headers)?;
    for row in &view.rows {
        write_row(&mut out, row.cells())?;
    }
    eprintln!("{} rows", view.len());
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[CellValue]) -> Result<()> {
    let line: Vec<String> = cells.iter().map(ToString::to_string).collect();
    writeln!(out, "{}", line.join("\t")).context("Failed to write to stdout")
}

fn search<S: SessionStore + RelationshipStore>(ws: &Workspace<S>, term: &str) -> Result<()> {
    let hits = ws.global_search(term);
    if hits.is_empty() {
        eprintln!("No matches");
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for hit in &hits {
        writeln!(
            out,
            "{} / {} ({} rows) [{}]",
            hit.file_name,
            hit.sheet_name,
            hit.matching_rows.len(),
            hit.file_id
        )?;
        write_row(&mut out, &hit.header_row)?;
        for row in &hit.matching_rows {
            write_row(&mut out, row.cells())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn stats<S: SessionStore + RelationshipStore>(
    ws: &mut Workspace<S>,
    id: &str,
    sheet: Option<&str>,
) -> Result<()> {
    select(ws, id, sheet)?;

    if let Some(summary) = ws.sheet_summary() {
        println!("Rows: {}", summary.total_rows);
        println!(
            "Columns: {} ({} numeric, {} text)",
            summary.total_columns, summary.numeric_columns, summary.text_columns
        );
        println!("Empty rows: {}", summary.empty_rows);
        println!("Completeness: {:.1}%", summary.completeness);
    }

    for column in ws.column_stats() {
        println!();
        println!("  Column {}: \"{}\" ({:?})", column.index, column.name, column.kind);
        println!(
            "    Unique: {}  Empty: {}",
            column.unique_values, column.null_count
        );
        if let Some(numeric) = column.numeric {
            println!(
                "    Min: {}  Max: {}  Avg: {:.2}  Sum: {}",
                numeric.min, numeric.max, numeric.avg, numeric.sum
            );
        }
    }
    Ok(())
}

fn show_overview<S: SessionStore + RelationshipStore>(ws: &Workspace<S>) -> Result<()> {
    let overview = ws.overview();
    println!("Files: {}", overview.total_files);
    println!("Sheets: {}", overview.total_sheets);
    println!("Rows: {}", overview.total_rows);

    let timeline = ws.uploads_over_time();
    if !timeline.is_empty() {
        println!();
        print_points(&timeline.data);
    }
    Ok(())
}

fn chart<S: SessionStore + RelationshipStore>(
    ws: &mut Workspace<S>,
    id: &str,
    sheet: Option<&str>,
    columns: Option<(usize, usize)>,
    max: usize,
) -> Result<()> {
    select(ws, id, sheet)?;

    if let Some((category, value)) = columns {
        let grid = ws.active_grid().context("No active sheet")?;
        let options = ChartOptions::new().max_items(max);
        print_points(&chart_data_with(grid, category, value, &options));
        return Ok(());
    }

    let charts = ws.dashboard();
    if charts.is_empty() {
        eprintln!("Nothing to chart: need a text and a numeric column");
    }
    for chart in charts {
        println!(
            "{} [{}]",
            chart.title.as_deref().unwrap_or_default(),
            chart.chart_type.as_str()
        );
        print_points(&chart.data);
        println!();
    }
    Ok(())
}

fn print_points(points: &[ChartPoint]) {
    for point in points {
        println!("{}\t{}", point.name, point.value);
    }
}

fn calc<S: SessionStore + RelationshipStore>(
    ws: &mut Workspace<S>,
    id: &str,
    sheet: Option<&str>,
    column: Option<usize>,
    op: Operation,
) -> Result<()> {
    select(ws, id, sheet)?;

    let Some(column) = column else {
        let grid = ws.active_grid().context("No active sheet")?;
        for c in calculator_columns(grid) {
            println!("{}\t{}\t{} values", c.index, c.header, c.numeric_count);
        }
        return Ok(());
    };

    match ws.calculate(column, op) {
        Some(calc) => println!(
            "{}({}) = {}  [{} values]",
            calc.operation, calc.column, calc.result, calc.count
        ),
        None => bail!("Column {} has no numeric values", column),
    }
    Ok(())
}

fn export<S: SessionStore + RelationshipStore>(
    ws: &mut Workspace<S>,
    id: &str,
    sheet: Option<&str>,
    format: Option<ExportFormat>,
    search: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    select(ws, id, sheet)?;
    if let Some(term) = search {
        ws.set_local_search(term);
    }

    let format = format
        .or_else(|| output.and_then(ExportFormat::from_path))
        .unwrap_or(ExportFormat::Csv);
    let view = ws.local_view();

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create '{}'", path.display()))?;
            let mut writer = BufWriter::new(file);
            export_rows(&view.headers, &view.rows, format, &mut writer)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            writer.flush()?;
            eprintln!("Wrote {} rows to '{}'", view.len(), path.display());
        }
        None => {
            export_rows(&view.headers, &view.rows, format, io::stdout().lock())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

fn relate<S: SessionStore + RelationshipStore>(
    ws: &mut Workspace<S>,
    command: RelateCommands,
) -> Result<()> {
    match command {
        RelateCommands::Add { source, target } => {
            let id = ws
                .add_relationship(NewRelationship::new(source, target))
                .context("Failed to add relationship")?;
            println!("{}", id);
        }
        RelateCommands::List => {
            for view in ws.relationship_views() {
                let rel = view.relationship;
                println!(
                    "{}\t{} / {} / {}\t->\t{} / {} / {}{}",
                    rel.id,
                    view.source_file,
                    rel.source.sheet_name,
                    rel.source.column_name,
                    view.target_file,
                    rel.target.sheet_name,
                    rel.target.column_name,
                    if view.resolved { "" } else { "\t(unresolved)" }
                );
            }
        }
        RelateCommands::Delete { id } => {
            if !ws.delete_relationship(&id).context("Failed to delete relationship")? {
                bail!("Relationship '{}' not found", id);
            }
            eprintln!("Deleted relationship {}", id);
        }
    }
    Ok(())
}
