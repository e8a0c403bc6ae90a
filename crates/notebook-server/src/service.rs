//! Notebook service: the business operations the HTTP handlers delegate to.
//!
//! [`NotebookService`] is the contract. Handlers only see the trait, held as
//! `Arc<dyn NotebookService>` in [`crate::AppState`], so tests swap in a mock.
//! [`StoreNotebookService`] is the production implementation on top of a
//! [`NotebookRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use notebook_core::{
    NewNote, NewNotebook, Note, NoteId, Notebook, NotebookId, NotebookUpdate, ValidationError,
};
use notebook_store::{NotebookRepository, StoreError};

/// Errors raised by notebook service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No notebook with this id.
    #[error("notebook not found: {0}")]
    NotebookNotFound(NotebookId),

    /// No note with this id.
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotebookNotFound(id) => Self::NotebookNotFound(NotebookId::from(id)),
            StoreError::NoteNotFound(id) => Self::NoteNotFound(NoteId::from(id)),
            other => Self::Storage(other),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Notebook and note operations.
///
/// Inputs arrive as validated types from `notebook_core`, so validation has
/// already happened by the time an implementation is called. Unknown ids
/// produce [`ServiceError::NotebookNotFound`] / [`ServiceError::NoteNotFound`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotebookService: Send + Sync {
    /// All notebooks in creation order.
    async fn list(&self) -> ServiceResult<Vec<Notebook>>;

    /// Create a notebook with a fresh id and no notes.
    async fn create(&self, notebook: NewNotebook) -> ServiceResult<Notebook>;

    /// Replace the title of an existing notebook. Notes are kept.
    async fn update(&self, update: NotebookUpdate) -> ServiceResult<Notebook>;

    /// Delete a notebook and all of its notes.
    async fn delete(&self, id: &NotebookId) -> ServiceResult<()>;

    /// Fetch a notebook with its notes.
    async fn get_by_id(&self, id: &NotebookId) -> ServiceResult<Notebook>;

    /// Append a note with a fresh id to a notebook.
    async fn add_note(&self, notebook_id: &NotebookId, note: NewNote) -> ServiceResult<Note>;

    /// Fetch a note by its id.
    async fn get_note_by_id(&self, id: &NoteId) -> ServiceResult<Note>;
}

/// [`NotebookService`] backed by a [`NotebookRepository`].
#[derive(Clone)]
pub struct StoreNotebookService {
    repository: Arc<dyn NotebookRepository>,
}

impl StoreNotebookService {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<dyn NotebookRepository>) -> Self {
        Self { repository }
    }
}

impl std::fmt::Debug for StoreNotebookService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreNotebookService").finish_non_exhaustive()
    }
}

#[async_trait]
impl NotebookService for StoreNotebookService {
    async fn list(&self) -> ServiceResult<Vec<Notebook>> {
        Ok(self.repository.list_notebooks().await?)
    }

    async fn create(&self, notebook: NewNotebook) -> ServiceResult<Notebook> {
        let notebook = Notebook::create(notebook);
        self.repository.insert_notebook(&notebook).await?;

        tracing::info!(notebook_id = %notebook.id, "Notebook created");
        Ok(notebook)
    }

    async fn update(&self, update: NotebookUpdate) -> ServiceResult<Notebook> {
        let notebook = self
            .repository
            .update_title(update.id(), update.title(), Utc::now())
            .await?;

        tracing::info!(notebook_id = %notebook.id, "Notebook updated");
        Ok(notebook)
    }

    async fn delete(&self, id: &NotebookId) -> ServiceResult<()> {
        self.repository.delete_notebook(id).await?;

        tracing::info!(notebook_id = %id, "Notebook deleted");
        Ok(())
    }

    async fn get_by_id(&self, id: &NotebookId) -> ServiceResult<Notebook> {
        Ok(self.repository.get_notebook(id).await?)
    }

    async fn add_note(&self, notebook_id: &NotebookId, note: NewNote) -> ServiceResult<Note> {
        let note = Note::create(note);
        self.repository
            .append_note(notebook_id, &note, Utc::now())
            .await?;

        tracing::info!(notebook_id = %notebook_id, note_id = %note.id, "Note added");
        Ok(note)
    }

    async fn get_note_by_id(&self, id: &NoteId) -> ServiceResult<Note> {
        Ok(self.repository.get_note(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notebook_store::MemoryStore;

    fn service() -> (StoreNotebookService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (StoreNotebookService::new(store.clone()), store)
    }

    fn new_notebook(title: &str) -> NewNotebook {
        NewNotebook::new(Some(title.to_string())).unwrap()
    }

    fn new_note(title: &str) -> NewNote {
        NewNote::new(Some(title.to_string()), None).unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_unused_ids() {
        let (service, _) = service();

        let a = service.create(new_notebook("A")).await.unwrap();
        let b = service.create(new_notebook("B")).await.unwrap();

        assert!(!a.id.as_str().is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(a.title, "A");
    }

    #[tokio::test]
    async fn test_list_tracks_creates_and_deletes() {
        let (service, _) = service();
        assert!(service.list().await.unwrap().is_empty());

        let a = service.create(new_notebook("A")).await.unwrap();
        service.create(new_notebook("B")).await.unwrap();
        service.create(new_notebook("C")).await.unwrap();
        assert_eq!(service.list().await.unwrap().len(), 3);

        service.delete(&a.id).await.unwrap();
        let titles: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, ["B", "C"]);
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let (service, _) = service();
        let nb = service.create(new_notebook("A")).await.unwrap();

        service.delete(&nb.id).await.unwrap();
        let err = service.delete(&nb.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotebookNotFound(id) if id == nb.id));
    }

    #[tokio::test]
    async fn test_update_retitles_and_keeps_notes() {
        let (service, _) = service();
        let nb = service.create(new_notebook("Groceries")).await.unwrap();
        service.add_note(&nb.id, new_note("Milk")).await.unwrap();

        let update = NotebookUpdate::new(Some(nb.id.to_string()), Some("Shopping".into())).unwrap();
        let updated = service.update(update).await.unwrap();

        assert_eq!(updated.id, nb.id);
        assert_eq!(updated.title, "Shopping");
        assert_eq!(updated.notes.len(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let (service, _) = service();
        let update = NotebookUpdate::new(Some("missing".into()), Some("Title".into())).unwrap();

        let err = service.update(update).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotebookNotFound(_)));
    }

    #[tokio::test]
    async fn test_add_note_and_fetch_by_id() {
        let (service, _) = service();
        let nb = service.create(new_notebook("Groceries")).await.unwrap();

        let note = service.add_note(&nb.id, new_note("Milk")).await.unwrap();
        assert!(!note.id.as_str().is_empty());

        assert_eq!(service.get_note_by_id(&note.id).await.unwrap(), note);
        let fetched = service.get_by_id(&nb.id).await.unwrap();
        assert_eq!(fetched.notes, vec![note]);
        assert!(fetched.updated >= fetched.created);
    }

    #[tokio::test]
    async fn test_add_note_to_unknown_notebook_mutates_nothing() {
        let (service, store) = service();

        let err = service
            .add_note(&NotebookId::from("missing"), new_note("Milk"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotebookNotFound(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found_not_invalid() {
        let (service, _) = service();

        assert!(matches!(
            service.get_by_id(&NotebookId::from("nope")).await,
            Err(ServiceError::NotebookNotFound(_))
        ));
        assert!(matches!(
            service.get_note_by_id(&NoteId::from("nope")).await,
            Err(ServiceError::NoteNotFound(_))
        ));
    }

    #[test]
    fn test_store_errors_mapped() {
        assert!(matches!(
            ServiceError::from(StoreError::NotebookNotFound("x".into())),
            ServiceError::NotebookNotFound(id) if id.as_str() == "x"
        ));
        assert!(matches!(
            ServiceError::from(StoreError::ConfigError("bad".into())),
            ServiceError::Storage(_)
        ));
    }
}
