//! # sheetdesk-store
//!
//! Persistence for uploaded files and relationships.
//!
//! [`SessionStore`] and [`RelationshipStore`] are the seams the workspace
//! talks to. Two implementations are provided:
//! - [`MemoryStore`] - process memory, for tests and one-off runs
//! - [`JsonFileStore`] - a single JSON document on disk
//!
//! Both assign ids (UUID v4) and timestamps, list newest first, and keep each
//! sheet as an opaque JSON blob that is decoded on read.

mod document;
mod error;
mod file;
mod memory;
mod traits;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::{RelationshipStore, SessionStore, SessionUpdate};
