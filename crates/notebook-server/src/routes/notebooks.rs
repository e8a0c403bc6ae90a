//! Notebook and note routes.
//!
//! This module implements the notebook-related HTTP endpoints:
//! - GET /api/notebook - List notebooks (summaries)
//! - POST /api/notebook/create - Create a notebook
//! - PUT /api/notebook/update - Rename a notebook
//! - DELETE /api/notebook/{id} - Delete a notebook and its notes
//! - GET /api/notebook/{id} - Fetch a notebook with its notes
//! - POST /api/notebook/{id}/add-note - Add a note to a notebook
//! - GET /api/notebook/note/{id} - Fetch a note
//!
//! `GET` and `DELETE` on `/api/notebook/create` and `/api/notebook/update` treat
//! the literal segment as a notebook id, the same as any other `{id}`.
//!
//! Authentication and CSRF checks run in middleware before these handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{MethodRouter, get, post, put},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notebook_core::{NewNote, NewNotebook, Note, NoteId, Notebook, NotebookId, NotebookUpdate};

use crate::error::ApiResult;
use crate::extract::{JsonBody, RequestContext};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for create and update.
///
/// `id` is only read by update. Any `notes` the client sends are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct NotebookRequest {
    /// Notebook id (update only).
    #[serde(default)]
    pub id: Option<String>,
    /// Notebook title.
    #[serde(default)]
    pub title: Option<String>,
}

/// Request body for add-note.
#[derive(Debug, Default, Deserialize)]
pub struct NoteRequest {
    /// Note title.
    #[serde(default)]
    pub title: Option<String>,
    /// Note body.
    #[serde(default)]
    pub content: Option<String>,
}

/// Summary of a notebook in the list response.
#[derive(Debug, Serialize)]
pub struct NotebookSummary {
    /// Notebook ID.
    pub id: NotebookId,
    /// Notebook title.
    pub title: String,
    /// Number of notes in the notebook.
    pub note_count: usize,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated: DateTime<Utc>,
}

impl From<Notebook> for NotebookSummary {
    fn from(notebook: Notebook) -> Self {
        Self {
            note_count: notebook.notes.len(),
            id: notebook.id,
            title: notebook.title,
            created: notebook.created,
            updated: notebook.updated,
        }
    }
}

/// Response for DELETE /api/notebook/{id}.
#[derive(Debug, Serialize)]
pub struct DeleteNotebookResponse {
    /// ID of the deleted notebook.
    pub id: NotebookId,
    /// Confirmation message.
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/notebook - List all notebooks.
///
/// # Response
///
/// - 200 OK: `[{ "id", "title", "note_count", "created", "updated" }, ...]`
async fn list_notebooks(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> ApiResult<Json<Vec<NotebookSummary>>> {
    let notebooks = state.service().list().await?;

    tracing::debug!(
        user = %ctx.principal.username,
        request_id = ?ctx.request_id,
        count = notebooks.len(),
        "Listed notebooks"
    );

    Ok(Json(notebooks.into_iter().map(NotebookSummary::from).collect()))
}

/// POST /api/notebook/create - Create a notebook.
///
/// # Request
///
/// Body: `{ "title": "Groceries" }`
///
/// # Response
///
/// - 200 OK: the created notebook
/// - 400 Bad Request: missing or blank title, malformed body
async fn create_notebook(
    State(state): State<AppState>,
    ctx: RequestContext,
    JsonBody(request): JsonBody<NotebookRequest>,
) -> ApiResult<Json<Notebook>> {
    let new_notebook = NewNotebook::new(request.title)?;
    let notebook = state.service().create(new_notebook).await?;

    tracing::debug!(
        user = %ctx.principal.username,
        request_id = ?ctx.request_id,
        notebook_id = %notebook.id,
        "Create handled"
    );

    Ok(Json(notebook))
}

/// PUT /api/notebook/update - Rename a notebook.
///
/// # Request
///
/// Body: `{ "id": "...", "title": "Shopping" }`
///
/// # Response
///
/// - 200 OK: the updated notebook
/// - 400 Bad Request: missing or blank title or id, malformed body
/// - 404 Not Found: notebook doesn't exist
async fn update_notebook(
    State(state): State<AppState>,
    ctx: RequestContext,
    JsonBody(request): JsonBody<NotebookRequest>,
) -> ApiResult<Json<Notebook>> {
    let update = NotebookUpdate::new(request.id, request.title)?;
    let notebook = state.service().update(update).await?;

    tracing::debug!(
        user = %ctx.principal.username,
        request_id = ?ctx.request_id,
        notebook_id = %notebook.id,
        "Update handled"
    );

    Ok(Json(notebook))
}

/// DELETE /api/notebook/{id} - Delete a notebook and its notes.
///
/// # Response
///
/// - 200 OK: `{ "id": "...", "message": "Notebook deleted" }`
/// - 404 Not Found: notebook doesn't exist
async fn delete_notebook(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteNotebookResponse>> {
    remove_notebook(&state, &ctx, NotebookId::from(id)).await
}

async fn remove_notebook(
    state: &AppState,
    ctx: &RequestContext,
    id: NotebookId,
) -> ApiResult<Json<DeleteNotebookResponse>> {
    state.service().delete(&id).await?;

    tracing::debug!(
        user = %ctx.principal.username,
        request_id = ?ctx.request_id,
        notebook_id = %id,
        "Delete handled"
    );

    Ok(Json(DeleteNotebookResponse {
        id,
        message: "Notebook deleted".to_string(),
    }))
}

/// GET /api/notebook/{id} - Fetch a notebook with its notes.
async fn get_notebook(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> ApiResult<Json<Notebook>> {
    fetch_notebook(&state, &ctx, NotebookId::from(id)).await
}

async fn fetch_notebook(
    state: &AppState,
    ctx: &RequestContext,
    id: NotebookId,
) -> ApiResult<Json<Notebook>> {
    let notebook = state.service().get_by_id(&id).await?;

    tracing::debug!(
        user = %ctx.principal.username,
        request_id = ?ctx.request_id,
        notebook_id = %notebook.id,
        "Fetched notebook"
    );

    Ok(Json(notebook))
}

/// `GET` and `DELETE` for a static path whose last segment doubles as a notebook id.
fn literal_id_routes(segment: &'static str) -> MethodRouter<AppState> {
    get(move |State(state): State<AppState>, ctx: RequestContext| async move {
        fetch_notebook(&state, &ctx, NotebookId::from(segment)).await
    })
    .delete(move |State(state): State<AppState>, ctx: RequestContext| async move {
        remove_notebook(&state, &ctx, NotebookId::from(segment)).await
    })
}

/// POST /api/notebook/{id}/add-note - Add a note to a notebook.
///
/// # Request
///
/// Body: `{ "title": "Milk", "content": "2 litres" }`
///
/// # Response
///
/// - 200 OK: the created note
/// - 400 Bad Request: missing or blank title, malformed body
/// - 404 Not Found: notebook doesn't exist
async fn add_note(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(notebook_id): Path<String>,
    JsonBody(request): JsonBody<NoteRequest>,
) -> ApiResult<Json<Note>> {
    let notebook_id = NotebookId::from(notebook_id);
    let new_note = NewNote::new(request.title, request.content)?;
    let note = state.service().add_note(&notebook_id, new_note).await?;

    tracing::debug!(
        user = %ctx.principal.username,
        request_id = ?ctx.request_id,
        notebook_id = %notebook_id,
        note_id = %note.id,
        "Add note handled"
    );

    Ok(Json(note))
}

/// GET /api/notebook/note/{id} - Fetch a note.
async fn get_note(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> ApiResult<Json<Note>> {
    let note = state.service().get_note_by_id(&NoteId::from(id)).await?;

    tracing::debug!(
        user = %ctx.principal.username,
        request_id = ?ctx.request_id,
        note_id = %note.id,
        "Fetched note"
    );

    Ok(Json(note))
}

/// Build notebook routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/notebook", get(list_notebooks))
        .route(
            "/api/notebook/create",
            literal_id_routes("create").post(create_notebook),
        )
        .route(
            "/api/notebook/update",
            literal_id_routes("update").put(update_notebook),
        )
        .route(
            "/api/notebook/{id}",
            get(get_notebook).delete(delete_notebook),
        )
        .route("/api/notebook/{id}/add-note", post(add_note))
        .route("/api/notebook/note/{id}", get(get_note))
}

// ============================================================================
// Tests
// ============================================================================
