//! Core data types for the notebook service.
//!
//! A [`Notebook`] is a titled container that exclusively owns an ordered list
//! of [`Note`]s. Both carry server-assigned opaque string ids.
//!
//! The `New*` / `*Update` types are the only way to feed caller input into a
//! mutation; their constructors run the validation rules in
//! [`crate::validation`], so a value of these types is always valid.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::validation::{ValidationError, require_id, require_title};

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a notebook.
///
/// Ids are opaque strings. Freshly generated ids are UUID v4 in simple
/// (32 hex character) form, but any non-blank string a caller sends is
/// accepted and simply looked up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotebookId(String);

impl NotebookId {
    /// Generates a new random NotebookId.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NotebookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotebookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NotebookId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for NotebookId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NotebookId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Unique identifier for a note.
///
/// Same format as [`NotebookId`]; note ids are unique across all notebooks so
/// a note can be fetched by id alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generates a new random NoteId.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NoteId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// ============================================================================
// Core Domain Types
// ============================================================================

/// A note: a titled piece of optional text owned by exactly one notebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier for this note.
    pub id: NoteId,

    /// Note title, never blank.
    pub title: String,

    /// Free-form body.
    #[serde(default)]
    pub content: Option<String>,

    /// When the note was added to its notebook.
    pub created: DateTime<Utc>,
}

/// A notebook and the notes it owns, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    /// Unique identifier for this notebook.
    pub id: NotebookId,

    /// Notebook title, never blank.
    pub title: String,

    /// Owned notes in the order they were added.
    #[serde(default)]
    pub notes: Vec<Note>,

    /// When the notebook was created.
    pub created: DateTime<Utc>,

    /// When the notebook was last changed (title update or note added).
    pub updated: DateTime<Utc>,
}

impl Notebook {
    /// Materializes a validated [`NewNotebook`] with a fresh id and no notes.
    #[must_use]
    pub fn create(new: NewNotebook) -> Self {
        let now = Utc::now();
        Self {
            id: NotebookId::new(),
            title: new.title,
            notes: Vec::new(),
            created: now,
            updated: now,
        }
    }

    /// Looks up an owned note.
    #[must_use]
    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| &n.id == id)
    }
}

impl Note {
    /// Materializes a validated [`NewNote`] with a fresh id.
    #[must_use]
    pub fn create(new: NewNote) -> Self {
        Self {
            id: NoteId::new(),
            title: new.title,
            content: new.content,
            created: Utc::now(),
        }
    }
}

// ============================================================================
// Validated Inputs
// ============================================================================

/// A validated request to create a notebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotebook {
    title: String,
}

impl NewNotebook {
    /// Validates the candidate title.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when `title` is absent or blank.
    pub fn new(title: Option<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            title: require_title(title)?,
        })
    }

    /// The validated title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// A validated request to retitle an existing notebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookUpdate {
    id: NotebookId,
    title: String,
}

impl NotebookUpdate {
    /// Validates the target id and the new title.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when `id` or `title` is absent or blank.
    /// The title is checked first.
    pub fn new(id: Option<String>, title: Option<String>) -> Result<Self, ValidationError> {
        let title = require_title(title)?;
        let id = require_id(id)?;
        Ok(Self {
            id: NotebookId::from(id),
            title,
        })
    }

    /// The notebook to update.
    #[must_use]
    pub fn id(&self) -> &NotebookId {
        &self.id
    }

    /// The validated new title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// A validated request to add a note to a notebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    title: String,
    content: Option<String>,
}

impl NewNote {
    /// Validates the candidate note. Content is optional and unchecked.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when `title` is absent or blank.
    pub fn new(title: Option<String>, content: Option<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            title: require_title(title)?,
            content,
        })
    }

    /// The validated title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The note body, if any.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_simple_uuids() {
        let id = NotebookId::new();
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(NotebookId::new(), NotebookId::new());
        assert_ne!(NoteId::new(), NoteId::new());
    }

    #[test]
    fn ids_are_transparent_strings_in_json() {
        let id = NotebookId::from("notebook_id");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""notebook_id""#);
        let parsed: NoteId = serde_json::from_str(r#""note_id""#).unwrap();
        assert_eq!(parsed.as_str(), "note_id");
    }

    #[test]
    fn notebook_create_assigns_id_and_keeps_title() {
        let notebook = Notebook::create(NewNotebook::new(Some("Groceries".into())).unwrap());
        assert!(!notebook.id.as_str().is_empty());
        assert_eq!(notebook.title, "Groceries");
        assert!(notebook.notes.is_empty());
        assert_eq!(notebook.created, notebook.updated);
    }

    #[test]
    fn note_lookup_within_notebook() {
        let mut notebook = Notebook::create(NewNotebook::new(Some("Groceries".into())).unwrap());
        let note = Note::create(NewNote::new(Some("Milk".into()), Some("2l".into())).unwrap());
        let note_id = note.id.clone();
        notebook.notes.push(note);

        assert_eq!(notebook.note(&note_id).unwrap().title, "Milk");
        assert!(notebook.note(&NoteId::from("missing")).is_none());
    }

    #[test]
    fn note_without_content_deserializes() {
        let json = r#"{"id":"n1","title":"Milk","created":"2024-01-01T00:00:00Z"}"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.content, None);
    }

    #[test]
    fn update_keeps_title_verbatim() {
        let update = NotebookUpdate::new(Some("id".into()), Some("  Spaced  ".into())).unwrap();
        assert_eq!(update.id().as_str(), "id");
        assert_eq!(update.title(), "  Spaced  ");
    }
}
