//! In-memory notebook collection.
//!
//! Used when the server runs with `STORAGE_BACKEND=memory` and as the backing
//! store for end-to-end tests. Contents are lost on shutdown.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use notebook_core::{Note, NoteId, Notebook, NotebookId};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::repository::NotebookRepository;

/// Notebook collection held in process memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    notebooks: RwLock<Vec<Notebook>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notebooks.
    pub async fn len(&self) -> usize {
        self.notebooks.read().await.len()
    }

    /// Whether the store holds no notebooks.
    pub async fn is_empty(&self) -> bool {
        self.notebooks.read().await.is_empty()
    }
}

#[async_trait]
impl NotebookRepository for MemoryStore {
    async fn list_notebooks(&self) -> StoreResult<Vec<Notebook>> {
        Ok(self.notebooks.read().await.clone())
    }

    async fn get_notebook(&self, id: &NotebookId) -> StoreResult<Notebook> {
        self.notebooks
            .read()
            .await
            .iter()
            .find(|n| &n.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotebookNotFound(id.to_string()))
    }

    async fn insert_notebook(&self, notebook: &Notebook) -> StoreResult<()> {
        let mut notebooks = self.notebooks.write().await;
        if notebooks.iter().any(|n| n.id == notebook.id) {
            return Err(StoreError::DuplicateNotebook(notebook.id.to_string()));
        }
        notebooks.push(notebook.clone());
        Ok(())
    }

    async fn update_title(
        &self,
        id: &NotebookId,
        title: &str,
        updated: DateTime<Utc>,
    ) -> StoreResult<Notebook> {
        let mut notebooks = self.notebooks.write().await;
        let notebook = notebooks
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| StoreError::NotebookNotFound(id.to_string()))?;

        notebook.title = title.to_string();
        notebook.updated = updated;
        Ok(notebook.clone())
    }

    async fn delete_notebook(&self, id: &NotebookId) -> StoreResult<()> {
        let mut notebooks = self.notebooks.write().await;
        let position = notebooks
            .iter()
            .position(|n| &n.id == id)
            .ok_or_else(|| StoreError::NotebookNotFound(id.to_string()))?;

        notebooks.remove(position);
        Ok(())
    }

    async fn append_note(
        &self,
        notebook_id: &NotebookId,
        note: &Note,
        updated: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut notebooks = self.notebooks.write().await;
        let notebook = notebooks
            .iter_mut()
            .find(|n| &n.id == notebook_id)
            .ok_or_else(|| StoreError::NotebookNotFound(notebook_id.to_string()))?;

        notebook.notes.push(note.clone());
        notebook.updated = updated;
        Ok(())
    }

    async fn get_note(&self, id: &NoteId) -> StoreResult<Note> {
        self.notebooks
            .read()
            .await
            .iter()
            .find_map(|n| n.note(id))
            .cloned()
            .ok_or_else(|| StoreError::NoteNotFound(id.to_string()))
    }
}
