//! JSON file store

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use sheetdesk_core::{FileSession, NewRelationship, Relationship, Upload};
use tempfile::NamedTempFile;

use crate::document::StoreDocument;
use crate::error::StoreResult;
use crate::traits::{RelationshipStore, SessionStore, SessionUpdate};

/// Store backed by a single JSON document on disk
///
/// The whole document is loaded on open and rewritten after every change.
/// Writes go to a temporary file in the same directory which then replaces
/// the document, so a crash never leaves a half-written store behind.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    doc: StoreDocument,
}

impl JsonFileStore {
    /// Open a store, starting empty if the file does not exist yet
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let doc = if path.exists() {
            let text = fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                StoreDocument::default()
            } else {
                serde_json::from_str(&text)?
            }
        } else {
            StoreDocument::default()
        };
        log::debug!(
            "opened store {} ({} sessions, {} relationships)",
            path.display(),
            doc.sessions.len(),
            doc.relationships.len()
        );
        Ok(Self { path, doc })
    }

    /// Location of the document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `doc` to disk, then make it the loaded document
    ///
    /// On error the loaded document is left as it was.
    fn commit(&mut self, doc: StoreDocument) -> StoreResult<()> {
        write_document(&self.path, &doc)?;
        self.doc = doc;
        Ok(())
    }
}

fn write_document(path: &Path, doc: &StoreDocument) -> StoreResult<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, doc)?;
        writer.flush()?;
    }
    tmp.persist(path)?;
    log::debug!("wrote store {}", path.display());
    Ok(())
}

impl SessionStore for JsonFileStore {
    fn save_session(&mut self, upload: &Upload) -> StoreResult<String> {
        let mut doc = self.doc.clone();
        let id = doc.insert_session(upload)?;
        self.commit(doc)?;
        Ok(id)
    }

    fn list_sessions(&self) -> StoreResult<Vec<FileSession>> {
        Ok(self.doc.sessions())
    }

    fn get_session(&self, id: &str) -> StoreResult<Option<FileSession>> {
        Ok(self.doc.session(id))
    }

    fn update_session(&mut self, id: &str, update: &SessionUpdate) -> StoreResult<bool> {
        let mut doc = self.doc.clone();
        let found = doc.update_session(id, update);
        if found {
            self.commit(doc)?;
        }
        Ok(found)
    }

    fn delete_session(&mut self, id: &str) -> StoreResult<bool> {
        let mut doc = self.doc.clone();
        let found = doc.remove_session(id);
        if found {
            self.commit(doc)?;
        }
        Ok(found)
    }
}

impl RelationshipStore for JsonFileStore {
    fn save_relationship(&mut self, relationship: &NewRelationship) -> StoreResult<String> {
        let mut doc = self.doc.clone();
        let id = doc.insert_relationship(relationship);
        self.commit(doc)?;
        Ok(id)
    }

    fn list_relationships(&self) -> StoreResult<Vec<Relationship>> {
        Ok(self.doc.relationships())
    }

    fn delete_relationship(&mut self, id: &str) -> StoreResult<bool> {
        let mut doc = self.doc.clone();
        let found = doc.remove_relationship(id);
        if found {
            self.commit(doc)?;
        }
        Ok(found)
    }
}
