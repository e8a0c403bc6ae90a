//! notebook-server: HTTP API server for the notebook service
//!
//! This crate provides:
//! - The [`NotebookService`](service::NotebookService) trait and its store-backed implementation
//! - REST endpoints for notebooks and notes under `/api/notebook`
//! - Bearer-token / dev-header authentication with a required role
//! - CSRF protection (double-submit cookie) for mutating requests
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation
//! - JSON error responses
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use notebook_server::{build_app, AppState, ServerConfig, StoreNotebookService};
//! use notebook_store::MemoryStore;
//!
//! let config = ServerConfig::from_env()?;
//! let service = StoreNotebookService::new(Arc::new(MemoryStore::new()));
//! let app = build_app(AppState::new(Arc::new(service), config));
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig, StorageBackend};
pub use error::{ApiError, ApiResult};
pub use service::{NotebookService, ServiceError, StoreNotebookService};
pub use state::AppState;

// Re-export dependent crates
pub use notebook_core;
pub use notebook_store;

/// Build the full application: routes plus request-id, CORS and trace layers.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(state.config());

    routes::build_router(state)
        .layer(axum::middleware::from_fn(middleware::propagate_request_id))
        .layer(middleware::request_id_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build CORS layer from configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match config.cors_origins() {
        None => cors.allow_origin(Any),
        Some(origins) => cors.allow_origin(origins),
    }
}
