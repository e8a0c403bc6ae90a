//! Authentication middleware for the `/api` routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::resolve_principal;
use crate::error::ApiError;
use crate::extract::RequestContext;
use crate::middleware::request_id::REQUEST_ID_HEADER;
use crate::state::AppState;

/// Resolve the caller, check the required role and store a
/// [`RequestContext`] in the request extensions.
///
/// No credentials is `401`; a principal without the required role is `403`.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let config = state.config();

    let principal = resolve_principal(request.headers(), config).inspect_err(|e| {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            error = %e,
            "Rejected unauthenticated request"
        );
    })?;

    if !principal.has_role(&config.required_role) {
        tracing::warn!(
            user = %principal.username,
            required_role = %config.required_role,
            "Rejected request without required role"
        );
        return Err(ApiError::Forbidden(format!(
            "Role {} required",
            config.required_role
        )));
    }

    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    request.extensions_mut().insert(RequestContext {
        principal,
        request_id,
    });

    Ok(next.run(request).await)
}
