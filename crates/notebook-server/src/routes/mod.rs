//! Route definitions for the HTTP API.

pub mod csrf;
pub mod health;
pub mod notebooks;

use axum::{Router, middleware::from_fn_with_state};

use crate::middleware::{authenticate, csrf_protection};
use crate::state::AppState;

/// Build the complete router with all routes.
///
/// `/health` and `/api/csrf` are public. The notebook routes run
/// authentication first, then the CSRF check, then the handler.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(notebooks::routes())
        .route_layer(from_fn_with_state(state.clone(), csrf_protection))
        .route_layer(from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .merge(health::routes())
        .merge(csrf::routes())
        .merge(api)
        .with_state(state)
}
