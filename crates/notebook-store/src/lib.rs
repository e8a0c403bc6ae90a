//! notebook-store: Storage layer for the notebook service
//!
//! This crate provides:
//! - The [`NotebookRepository`] collection contract consumed by the service
//! - PostgreSQL storage of notebook documents with embedded notes
//! - An in-memory store for development and tests
//! - Migration management
//!
//! # Usage
//!
//! ```rust,ignore
//! use notebook_store::{NotebookRepository, Store, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let store = Store::connect(config).await?;
//!
//! let notebooks = NotebookRepository::list_notebooks(&store).await?;
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use models::{NoteDocument, NotebookRow};
pub use repository::NotebookRepository;
pub use store::{Store, StoreConfig};

// Re-export notebook-core for downstream crates
pub use notebook_core;
