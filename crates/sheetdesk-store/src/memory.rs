//! In-memory store

use sheetdesk_core::{FileSession, NewRelationship, Relationship, Upload};

use crate::document::StoreDocument;
use crate::error::StoreResult;
use crate::traits::{RelationshipStore, SessionStore, SessionUpdate};

/// Store that keeps everything in process memory
///
/// Sheets still go through the same JSON encoding as the file store, so both
/// behave the same on read.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    doc: StoreDocument,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn save_session(&mut self, upload: &Upload) -> StoreResult<String> {
        self.doc.insert_session(upload)
    }

    fn list_sessions(&self) -> StoreResult<Vec<FileSession>> {
        Ok(self.doc.sessions())
    }

    fn get_session(&self, id: &str) -> StoreResult<Option<FileSession>> {
        Ok(self.doc.session(id))
    }

    fn update_session(&mut self, id: &str, update: &SessionUpdate) -> StoreResult<bool> {
        Ok(self.doc.update_session(id, update))
    }

    fn delete_session(&mut self, id: &str) -> StoreResult<bool> {
        Ok(self.doc.remove_session(id))
    }
}

impl RelationshipStore for MemoryStore {
    fn save_relationship(&mut self, relationship: &NewRelationship) -> StoreResult<String> {
        Ok(self.doc.insert_relationship(relationship))
    }

    fn list_relationships(&self) -> StoreResult<Vec<Relationship>> {
        Ok(self.doc.relationships())
    }

    fn delete_relationship(&mut self, id: &str) -> StoreResult<bool> {
        Ok(self.doc.remove_relationship(id))
    }
}
