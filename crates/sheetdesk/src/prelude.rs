//! Prelude module - common imports for sheetdesk users
//!
//! ```rust
//! use sheetdesk::prelude::*;
//! ```

pub use crate::{
    // Data model
    CellValue,
    ColumnRef,
    // Uploads
    CsvDecoder,
    ExportFormat,
    FileSession,
    Grid,
    // Extension traits
    GridExt,
    JsonFileStore,
    // Stores
    MemoryStore,
    NewRelationship,
    Operation,
    RelationshipStore,
    Row,
    SessionStore,
    SortDirection,
    SortState,
    UploadDecoder,
    // Workspace
    Workspace,
    WorkspaceError,
    WorkspaceResult,
};
