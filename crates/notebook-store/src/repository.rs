//! Repository layer providing domain-typed interfaces to the storage layer.
//!
//! [`NotebookRepository`] is the collection contract the notebook service
//! consumes: an id-keyed set of notebook documents with embedded notes.
//! It is implemented by the PostgreSQL [`Store`] and by
//! [`crate::MemoryStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use notebook_core::{Note, NoteId, Notebook, NotebookId};

use crate::Store;
use crate::error::StoreResult;
use crate::models::{NoteDocument, NotebookRow};

/// Id-keyed collection of notebook documents.
///
/// Not-found conditions are reported as
/// [`crate::StoreError::NotebookNotFound`] /
/// [`crate::StoreError::NoteNotFound`]. Implementations must make each call
/// atomic with respect to the notebook it touches.
#[async_trait]
pub trait NotebookRepository: Send + Sync {
    /// All notebooks, oldest first.
    async fn list_notebooks(&self) -> StoreResult<Vec<Notebook>>;

    /// A single notebook with its notes.
    async fn get_notebook(&self, id: &NotebookId) -> StoreResult<Notebook>;

    /// Store a new notebook. Fails with `DuplicateNotebook` if the id is taken.
    async fn insert_notebook(&self, notebook: &Notebook) -> StoreResult<()>;

    /// Replace the title of an existing notebook and return the result.
    async fn update_title(
        &self,
        id: &NotebookId,
        title: &str,
        updated: DateTime<Utc>,
    ) -> StoreResult<Notebook>;

    /// Remove a notebook and every note it owns.
    async fn delete_notebook(&self, id: &NotebookId) -> StoreResult<()>;

    /// Append a note to the end of a notebook's notes.
    async fn append_note(
        &self,
        notebook_id: &NotebookId,
        note: &Note,
        updated: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Find a note by id in whichever notebook owns it.
    async fn get_note(&self, id: &NoteId) -> StoreResult<Note>;
}

#[async_trait]
impl NotebookRepository for Store {
    async fn list_notebooks(&self) -> StoreResult<Vec<Notebook>> {
        let rows = Store::list_notebooks(self).await?;
        Ok(rows.into_iter().map(Notebook::from).collect())
    }

    async fn get_notebook(&self, id: &NotebookId) -> StoreResult<Notebook> {
        Store::get_notebook(self, id.as_str())
            .await
            .map(Notebook::from)
    }

    async fn insert_notebook(&self, notebook: &Notebook) -> StoreResult<()> {
        Store::insert_notebook(self, &NotebookRow::from(notebook)).await
    }

    async fn update_title(
        &self,
        id: &NotebookId,
        title: &str,
        updated: DateTime<Utc>,
    ) -> StoreResult<Notebook> {
        self.update_notebook_title(id.as_str(), title, updated)
            .await
            .map(Notebook::from)
    }

    async fn delete_notebook(&self, id: &NotebookId) -> StoreResult<()> {
        Store::delete_notebook(self, id.as_str()).await
    }

    async fn append_note(
        &self,
        notebook_id: &NotebookId,
        note: &Note,
        updated: DateTime<Utc>,
    ) -> StoreResult<()> {
        Store::append_note(self, notebook_id.as_str(), &NoteDocument::from(note), updated).await
    }

    async fn get_note(&self, id: &NoteId) -> StoreResult<Note> {
        Store::get_note(self, id.as_str()).await.map(Note::from)
    }
}
