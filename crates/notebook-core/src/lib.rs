//! notebook-core: Core types and validation rules for the notebook service
//!
//! This crate provides:
//! - Domain types (Notebook, Note and their ids)
//! - Validated input types for create/update/add-note
//! - The validation rules those inputs are built with

pub mod types;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use types::{NewNote, NewNotebook, Note, NoteId, Notebook, NotebookId, NotebookUpdate};
pub use validation::ValidationError;
