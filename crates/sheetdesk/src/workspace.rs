//! Workspace: loaded files, the active sheet and its query state

use sheetdesk_chart::{dashboard_charts, uploads_over_time, Chart, DashboardOptions};
use sheetdesk_core::{file_name_or_na, FileSession, Grid, NewRelationship, Relationship, Upload};
use sheetdesk_query::{
    calculate, classify_columns, global_search, matching_sessions, overview, sheet_summary,
    Calculation, CalculationHistory, ColumnStats, LocalQuery, Operation, Overview, SearchHit,
    SheetSummary, SortState, TableView,
};
use sheetdesk_store::{RelationshipStore, SessionStore, SessionUpdate};

use crate::decoder::UploadDecoder;
use crate::error::{WorkspaceError, WorkspaceResult};

/// Largest accepted upload (10 MiB)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Workspace options
#[derive(Debug, Clone)]
pub struct WorkspaceOptions {
    /// Upload size limit in bytes (default: 10 MiB)
    pub max_upload_bytes: usize,
    /// Dashboard chart plan
    pub dashboard: DashboardOptions,
}

impl Default for WorkspaceOptions {
    fn default() -> Self {
        Self {
            max_upload_bytes: MAX_UPLOAD_BYTES,
            dashboard: DashboardOptions::default(),
        }
    }
}

/// A relationship with both ends looked up against the loaded files
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipView<'a> {
    pub relationship: &'a Relationship,
    /// Source file name, `N/A` when the file is gone
    pub source_file: &'a str,
    /// Target file name, `N/A` when the file is gone
    pub target_file: &'a str,
    /// Whether both columns still exist
    pub resolved: bool,
}

/// Session state over a store
///
/// Holds the files and relationships loaded from the store, which file and
/// sheet are active, and the search/sort settings of the active sheet. All
/// queries run against the loaded snapshot; only uploads, renames, deletes
/// and relationship changes go to the store.
pub struct Workspace<S> {
    store: S,
    options: WorkspaceOptions,
    sessions: Vec<FileSession>,
    relationships: Vec<Relationship>,
    active_file: Option<String>,
    active_sheet: Option<String>,
    local: LocalQuery,
    global_term: String,
    history: CalculationHistory,
}

impl<S: SessionStore + RelationshipStore> Workspace<S> {
    /// Open a workspace and load everything from the store
    pub fn open(store: S) -> WorkspaceResult<Self> {
        Self::with_options(store, WorkspaceOptions::default())
    }

    /// Open a workspace with custom options
    pub fn with_options(store: S, options: WorkspaceOptions) -> WorkspaceResult<Self> {
        let mut workspace = Self {
            store,
            options,
            sessions: Vec::new(),
            relationships: Vec::new(),
            active_file: None,
            active_sheet: None,
            local: LocalQuery::new(),
            global_term: String::new(),
            history: CalculationHistory::new(),
        };
        workspace.refresh()?;
        Ok(workspace)
    }

    /// Reload sessions and relationships from the store
    ///
    /// The active file is kept if it still exists, otherwise cleared.
    pub fn refresh(&mut self) -> WorkspaceResult<()> {
        self.sessions = self.store.list_sessions()?;
        self.relationships = self.store.list_relationships()?;

        let still_there = self
            .active_file
            .as_deref()
            .map_or(false, |id| self.sessions.iter().any(|s| s.id == id));
        if !still_there {
            self.clear_selection();
        }
        log::debug!(
            "loaded {} sessions, {} relationships",
            self.sessions.len(),
            self.relationships.len()
        );
        Ok(())
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loaded sessions, most recent first
    pub fn sessions(&self) -> &[FileSession] {
        &self.sessions
    }

    /// Loaded relationships, newest first
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Look up a loaded session
    pub fn session(&self, id: &str) -> Option<&FileSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Decode, persist and activate an upload
    ///
    /// The new session becomes active with its first sheet selected, and
    /// both search terms are cleared.
    pub fn upload<D: UploadDecoder + ?Sized>(
        &mut self,
        decoder: &D,
        file_name: &str,
        bytes: &[u8],
    ) -> WorkspaceResult<String> {
        if file_name.trim().is_empty() {
            return Err(WorkspaceError::MissingFileName);
        }
        if bytes.is_empty() {
            return Err(WorkspaceError::EmptyUpload(file_name.to_string()));
        }
        if bytes.len() > self.options.max_upload_bytes {
            return Err(WorkspaceError::FileTooLarge {
                name: file_name.to_string(),
                size: bytes.len(),
                limit: self.options.max_upload_bytes,
            });
        }
        if !decoder.accepts(file_name) {
            return Err(WorkspaceError::UnsupportedFormat(file_name.to_string()));
        }

        let sheets = decoder.decode(file_name, bytes)?;
        if sheets.is_empty() {
            return Err(WorkspaceError::EmptyUpload(file_name.to_string()));
        }

        let id = self.store.save_session(&Upload::new(file_name, sheets))?;
        let session = self
            .store
            .get_session(&id)?
            .ok_or_else(|| WorkspaceError::SessionNotFound(id.clone()))?;
        log::info!(
            "uploaded {} as {} ({} sheets)",
            file_name,
            id,
            session.sheets.len()
        );

        self.sessions.insert(0, session);
        self.select_file(&id);
        self.global_term.clear();
        Ok(id)
    }

    /// Make a file active, selecting its first sheet
    ///
    /// Returns `false` (and changes nothing) for an unknown id.
    pub fn select_file(&mut self, id: &str) -> bool {
        let Some(session) = self.session(id) else {
            return false;
        };
        let first = session.sheets.first_name().map(str::to_string);
        self.active_file = Some(id.to_string());
        self.active_sheet = first;
        self.local.reset();
        true
    }

    /// Make a sheet of the active file active
    ///
    /// Returns `false` when no file is active or it has no such sheet.
    pub fn select_sheet(&mut self, name: &str) -> bool {
        let exists = self
            .active_session()
            .map_or(false, |s| s.sheets.contains(name));
        if exists {
            self.active_sheet = Some(name.to_string());
            self.local.reset();
        }
        exists
    }

    /// The active session
    pub fn active_session(&self) -> Option<&FileSession> {
        self.active_file.as_deref().and_then(|id| self.session(id))
    }

    /// Name of the active sheet
    pub fn active_sheet_name(&self) -> Option<&str> {
        self.active_sheet.as_deref()
    }

    /// Grid of the active sheet
    pub fn active_grid(&self) -> Option<&Grid> {
        let sheet = self.active_sheet.as_deref()?;
        self.active_session()?.sheet(sheet)
    }

    /// Rename a file
    ///
    /// The name is trimmed; renaming to the current name is a no-op.
    pub fn rename_file(&mut self, id: &str, new_name: &str) -> WorkspaceResult<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(WorkspaceError::MissingFileName);
        }
        if self.session(id).map_or(false, |s| s.file_name == new_name) {
            return Ok(());
        }

        if !self.store.update_session(id, &SessionUpdate::rename(new_name))? {
            return Err(WorkspaceError::SessionNotFound(id.to_string()));
        }
        if let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) {
            session.file_name = new_name.to_string();
        }
        log::info!("renamed {} to {}", id, new_name);
        Ok(())
    }

    /// Delete a file, returning whether it existed
    ///
    /// Deleting the active file clears the selection. Relationships pointing
    /// at the file are kept and show as unresolved.
    pub fn delete_file(&mut self, id: &str) -> WorkspaceResult<bool> {
        let removed = self.store.delete_session(id)?;
        self.sessions.retain(|s| s.id != id);
        if self.active_file.as_deref() == Some(id) {
            self.clear_selection();
        }
        if removed {
            log::info!("deleted file {}", id);
        }
        Ok(removed)
    }

    /// Validate and persist a relationship
    ///
    /// Nothing reaches the store unless all six reference fields are filled.
    pub fn add_relationship(&mut self, relationship: NewRelationship) -> WorkspaceResult<String> {
        relationship.validate()?;
        let id = self.store.save_relationship(&relationship)?;
        self.relationships = self.store.list_relationships()?;
        log::info!("added relationship {}", id);
        Ok(id)
    }

    /// Delete a relationship, returning whether it existed
    pub fn delete_relationship(&mut self, id: &str) -> WorkspaceResult<bool> {
        let removed = self.store.delete_relationship(id)?;
        self.relationships.retain(|r| r.id != id);
        Ok(removed)
    }

    /// Relationships with file names and resolution status
    pub fn relationship_views(&self) -> Vec<RelationshipView<'_>> {
        self.relationships
            .iter()
            .map(|relationship| RelationshipView {
                relationship,
                source_file: file_name_or_na(&relationship.source.file_id, &self.sessions),
                target_file: file_name_or_na(&relationship.target.file_id, &self.sessions),
                resolved: relationship.is_resolved(&self.sessions),
            })
            .collect()
    }

    /// Set the search term of the active sheet
    pub fn set_local_search(&mut self, term: &str) {
        self.local.set_search(term);
    }

    /// Click on a column header of the active sheet
    pub fn toggle_sort(&mut self, column: usize) -> SortState {
        self.local.toggle_sort(column)
    }

    /// Current search and sort settings
    pub fn local_query(&self) -> &LocalQuery {
        &self.local
    }

    /// Filtered and sorted view of the active sheet
    ///
    /// Empty when nothing is active.
    pub fn local_view(&self) -> TableView {
        self.active_grid()
            .map(|grid| self.local.run(grid))
            .unwrap_or_default()
    }

    /// Set the cross-file search term
    pub fn set_global_search(&mut self, term: &str) {
        self.global_term = term.to_string();
    }

    /// Current cross-file search term
    pub fn global_term(&self) -> &str {
        &self.global_term
    }

    /// Results for the current cross-file search term
    pub fn global_results(&self) -> Vec<SearchHit> {
        global_search(&self.sessions, &self.global_term)
    }

    /// Search every sheet of every loaded file
    pub fn global_search(&self, term: &str) -> Vec<SearchHit> {
        global_search(&self.sessions, term)
    }

    /// Loaded files whose name or content matches
    pub fn matching_sessions(&self, term: &str) -> Vec<&FileSession> {
        matching_sessions(&self.sessions, term)
    }

    /// Column statistics of the active sheet
    pub fn column_stats(&self) -> Vec<ColumnStats> {
        self.active_grid().map(classify_columns).unwrap_or_default()
    }

    /// Summary of the active sheet
    pub fn sheet_summary(&self) -> Option<SheetSummary> {
        self.active_grid().and_then(sheet_summary)
    }

    /// Totals over all loaded files
    pub fn overview(&self) -> Overview {
        overview(&self.sessions)
    }

    /// Dashboard charts of the active sheet
    pub fn dashboard(&self) -> Vec<Chart> {
        self.active_grid()
            .map(|grid| dashboard_charts(grid, &self.options.dashboard))
            .unwrap_or_default()
    }

    /// Uploads per day over all loaded files
    pub fn uploads_over_time(&self) -> Chart {
        uploads_over_time(&self.sessions)
    }

    /// Run a calculation on the active sheet and record it
    pub fn calculate(&mut self, column: usize, operation: Operation) -> Option<Calculation> {
        let result = calculate(self.active_grid()?, column, operation)?;
        self.history.push(result.clone());
        Some(result)
    }

    /// Recent calculations, newest first
    pub fn history(&self) -> &CalculationHistory {
        &self.history
    }

    fn clear_selection(&mut self) {
        self.active_file = None;
        self.active_sheet = None;
        self.local.reset();
    }
}
