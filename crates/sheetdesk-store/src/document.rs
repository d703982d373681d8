//! Store document: the stored form of sessions and relationships
//!
//! Sheets are kept as JSON text, one blob per sheet, and only decoded when a
//! session is read back. A blob that no longer decodes turns into an empty
//! sheet instead of failing the whole session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sheetdesk_core::{ColumnRef, FileSession, Grid, NewRelationship, Relationship, Sheets, Upload};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::traits::SessionUpdate;

/// Stored form of one sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SheetBlob {
    pub name: String,
    /// JSON text of the grid
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionRecord {
    pub id: String,
    pub file_name: String,
    pub sheets: Vec<SheetBlob>,
    pub uploaded_at: DateTime<Utc>,
    /// Insertion counter, breaks timestamp ties
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RelationshipRecord {
    pub id: String,
    pub source: ColumnRef,
    pub target: ColumnRef,
    pub created_at: DateTime<Utc>,
    pub seq: u64,
}

/// Everything a store holds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoreDocument {
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
    #[serde(default)]
    pub relationships: Vec<RelationshipRecord>,
    #[serde(default)]
    pub next_seq: u64,
}

impl StoreDocument {
    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    pub fn insert_session(&mut self, upload: &Upload) -> StoreResult<String> {
        let sheets = encode_sheets(&upload.sheets)?;
        let id = Uuid::new_v4().to_string();
        let seq = self.next_seq();
        self.sessions.push(SessionRecord {
            id: id.clone(),
            file_name: upload.file_name.clone(),
            sheets,
            uploaded_at: Utc::now(),
            seq,
        });
        log::debug!("stored session {} ({})", id, upload.file_name);
        Ok(id)
    }

    pub fn sessions(&self) -> Vec<FileSession> {
        let mut records: Vec<&SessionRecord> = self.sessions.iter().collect();
        records.sort_by(|a, b| (b.uploaded_at, b.seq).cmp(&(a.uploaded_at, a.seq)));
        records.into_iter().map(SessionRecord::to_session).collect()
    }

    pub fn session(&self, id: &str) -> Option<FileSession> {
        self.sessions
            .iter()
            .find(|r| r.id == id)
            .map(SessionRecord::to_session)
    }

    pub fn update_session(&mut self, id: &str, update: &SessionUpdate) -> bool {
        let Some(record) = self.sessions.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        if let Some(name) = &update.file_name {
            record.file_name = name.clone();
        }
        log::debug!("updated session {}", id);
        true
    }

    pub fn remove_session(&mut self, id: &str) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|r| r.id != id);
        let removed = self.sessions.len() != before;
        if removed {
            log::debug!("deleted session {}", id);
        }
        removed
    }

    pub fn insert_relationship(&mut self, relationship: &NewRelationship) -> String {
        let id = Uuid::new_v4().to_string();
        let seq = self.next_seq();
        self.relationships.push(RelationshipRecord {
            id: id.clone(),
            source: relationship.source.clone(),
            target: relationship.target.clone(),
            created_at: Utc::now(),
            seq,
        });
        log::debug!("stored relationship {}", id);
        id
    }

    pub fn relationships(&self) -> Vec<Relationship> {
        let mut records: Vec<&RelationshipRecord> = self.relationships.iter().collect();
        records.sort_by(|a, b| (b.created_at, b.seq).cmp(&(a.created_at, a.seq)));
        records
            .into_iter()
            .map(|r| Relationship {
                id: r.id.clone(),
                source: r.source.clone(),
                target: r.target.clone(),
                created_at: Some(r.created_at),
            })
            .collect()
    }

    pub fn remove_relationship(&mut self, id: &str) -> bool {
        let before = self.relationships.len();
        self.relationships.retain(|r| r.id != id);
        let removed = self.relationships.len() != before;
        if removed {
            log::debug!("deleted relationship {}", id);
        }
        removed
    }
}

impl SessionRecord {
    fn to_session(&self) -> FileSession {
        FileSession {
            id: self.id.clone(),
            file_name: self.file_name.clone(),
            sheets: decode_sheets(&self.id, &self.sheets),
            uploaded_at: Some(self.uploaded_at),
        }
    }
}

pub(crate) fn encode_sheets(sheets: &Sheets) -> StoreResult<Vec<SheetBlob>> {
    sheets
        .iter()
        .map(|sheet| {
            Ok(SheetBlob {
                name: sheet.name.clone(),
                data: serde_json::to_string(&sheet.grid)?,
            })
        })
        .collect()
}

pub(crate) fn decode_sheets(session_id: &str, blobs: &[SheetBlob]) -> Sheets {
    let mut sheets = Sheets::new();
    for blob in blobs {
        let grid = match serde_json::from_str::<Grid>(&blob.data) {
            Ok(grid) => grid,
            Err(err) => {
                log::warn!(
                    "session {}: sheet {:?} failed to decode, showing it empty: {}",
                    session_id,
                    blob.name,
                    err
                );
                Grid::new()
            }
        };
        if let Err(err) = sheets.insert(blob.name.clone(), grid) {
            log::warn!("session {}: skipping sheet: {}", session_id, err);
        }
    }
    sheets
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetdesk_core::CellValue;

    fn upload(name: &str) -> Upload {
        let grid = Grid::from(vec![
            vec![CellValue::text("a"), CellValue::text("b")],
            vec![CellValue::Number(1.0), CellValue::Null],
        ]);
        Upload::new(name, Sheets::try_from_pairs([("S1", grid)]).unwrap())
    }

    #[test]
    fn test_sheets_survive_encoding() {
        let up = upload("x.csv");
        let blobs = encode_sheets(&up.sheets).unwrap();
        assert_eq!(blobs[0].data, r#"[["a","b"],[1.0,null]]"#);
        assert_eq!(decode_sheets("id", &blobs), up.sheets);
    }

    #[test]
    fn test_bad_blob_decodes_empty() {
        let blobs = vec![
            SheetBlob {
                name: "Broken".into(),
                data: "{not json".into(),
            },
            SheetBlob {
                name: "Fine".into(),
                data: "[[\"h\"]]".into(),
            },
        ];
        let sheets = decode_sheets("id", &blobs);
        assert_eq!(sheets.get("Broken"), Some(&Grid::new()));
        assert_eq!(sheets.get("Fine").unwrap().width(), 1);
    }

    #[test]
    fn test_sessions_newest_first() {
        let mut doc = StoreDocument::default();
        let first = doc.insert_session(&upload("a.csv")).unwrap();
        let second = doc.insert_session(&upload("b.csv")).unwrap();

        let ids: Vec<String> = doc.sessions().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn test_update_and_remove_report_existence() {
        let mut doc = StoreDocument::default();
        let id = doc.insert_session(&upload("a.csv")).unwrap();

        assert!(doc.update_session(&id, &SessionUpdate::rename("renamed.csv")));
        assert_eq!(doc.session(&id).unwrap().file_name, "renamed.csv");
        assert!(!doc.update_session("missing", &SessionUpdate::rename("x")));

        assert!(doc.remove_session(&id));
        assert!(!doc.remove_session(&id));
        assert_eq!(doc.session(&id), None);
    }
}
