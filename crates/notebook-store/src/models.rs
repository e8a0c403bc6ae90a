//! Database models for the storage layer.
//!
//! These types map directly to database rows and are used for
//! sqlx queries. They are separate from the domain types in
//! notebook-core so the stored document shape can evolve on its own.

use chrono::{DateTime, Utc};
use notebook_core::{Note, NoteId, Notebook, NotebookId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

/// Database row for the `notebooks` table.
///
/// The notebook's notes are embedded in the `notes` JSONB column.
#[derive(Debug, Clone, FromRow)]
pub struct NotebookRow {
    pub id: String,
    pub title: String,
    pub notes: Json<Vec<NoteDocument>>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// A note as stored inside a notebook document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDocument {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub created: DateTime<Utc>,
}

impl From<&Note> for NoteDocument {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.as_str().to_string(),
            title: note.title.clone(),
            content: note.content.clone(),
            created: note.created,
        }
    }
}

impl From<NoteDocument> for Note {
    fn from(doc: NoteDocument) -> Self {
        Self {
            id: NoteId::from(doc.id),
            title: doc.title,
            content: doc.content,
            created: doc.created,
        }
    }
}

impl From<NotebookRow> for Notebook {
    fn from(row: NotebookRow) -> Self {
        Self {
            id: NotebookId::from(row.id),
            title: row.title,
            notes: row.notes.0.into_iter().map(Note::from).collect(),
            created: row.created,
            updated: row.updated,
        }
    }
}

impl From<&Notebook> for NotebookRow {
    fn from(notebook: &Notebook) -> Self {
        Self {
            id: notebook.id.as_str().to_string(),
            title: notebook.title.clone(),
            notes: Json(notebook.notes.iter().map(NoteDocument::from).collect()),
            created: notebook.created,
            updated: notebook.updated,
        }
    }
}
