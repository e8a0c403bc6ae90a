//! Error types for the storage layer.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection or query error.
    #[error("database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    /// Notebook not found.
    #[error("notebook not found: {0}")]
    NotebookNotFound(String),

    /// Note not found.
    #[error("note not found: {0}")]
    NoteNotFound(String),

    /// A notebook with this id already exists.
    #[error("duplicate notebook: {0}")]
    DuplicateNotebook(String),

    /// Migration error.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl StoreError {
    /// Whether this error means the requested document does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotebookNotFound(_) | Self::NoteNotFound(_))
    }
}
