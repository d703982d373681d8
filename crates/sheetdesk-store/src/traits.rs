//! Store interfaces

use sheetdesk_core::{FileSession, NewRelationship, Relationship, Upload};

use crate::error::StoreResult;

/// Changes applied by [`SessionStore::update_session`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUpdate {
    /// New display name
    pub file_name: Option<String>,
}

impl SessionUpdate {
    /// Rename only
    pub fn rename<S: Into<String>>(file_name: S) -> Self {
        Self {
            file_name: Some(file_name.into()),
        }
    }
}

/// Persistence of uploaded files
pub trait SessionStore {
    /// Persist an upload, returning the new session id
    fn save_session(&mut self, upload: &Upload) -> StoreResult<String>;

    /// All sessions, most recent upload first
    fn list_sessions(&self) -> StoreResult<Vec<FileSession>>;

    /// One session by id
    fn get_session(&self, id: &str) -> StoreResult<Option<FileSession>>;

    /// Apply an update, returning whether the session exists
    fn update_session(&mut self, id: &str, update: &SessionUpdate) -> StoreResult<bool>;

    /// Remove a session, returning whether it existed
    fn delete_session(&mut self, id: &str) -> StoreResult<bool>;
}

/// Persistence of relationships
///
/// Stores do not validate relationships; callers do that before saving.
pub trait RelationshipStore {
    /// Persist a relationship, returning its id
    fn save_relationship(&mut self, relationship: &NewRelationship) -> StoreResult<String>;

    /// All relationships, newest first
    fn list_relationships(&self) -> StoreResult<Vec<Relationship>>;

    /// Remove a relationship, returning whether it existed
    fn delete_relationship(&mut self, id: &str) -> StoreResult<bool>;
}
