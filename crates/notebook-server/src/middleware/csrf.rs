//! CSRF protection using the double-submit cookie scheme.
//!
//! `GET /api/csrf` hands out a random token in the `XSRF-TOKEN` cookie. Mutating
//! requests must echo that value in the `X-XSRF-TOKEN` header.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use rand::RngCore;

use crate::error::ApiError;
use crate::state::AppState;

/// Cookie carrying the CSRF token.
pub const CSRF_COOKIE: &str = "XSRF-TOKEN";

/// Header that must echo the cookie value.
pub const CSRF_HEADER: &str = "X-XSRF-TOKEN";

/// Generate a fresh token: 32 random bytes, hex encoded.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Whether requests with this method must carry a token.
pub fn requires_token(method: &Method) -> bool {
    !matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
    )
}

/// Compare the cookie and header values. Both must be non-empty.
///
/// Compares BLAKE3 digests; `blake3::Hash` equality is constant-time.
pub fn tokens_match(cookie: &str, header: &str) -> bool {
    if cookie.is_empty() || header.is_empty() {
        return false;
    }
    blake3::hash(cookie.as_bytes()) == blake3::hash(header.as_bytes())
}

/// Reject mutating requests whose header token does not match the cookie.
pub async fn csrf_protection(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.config().csrf_protection || !requires_token(request.method()) {
        return Ok(next.run(request).await);
    }

    let cookie = jar.get(CSRF_COOKIE).map(|c| c.value()).unwrap_or_default();
    let header = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !tokens_match(cookie, header) {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            has_cookie = !cookie.is_empty(),
            has_header = !header.is_empty(),
            "Rejected request with invalid CSRF token"
        );
        return Err(ApiError::CsrfRejected(
            "missing or invalid CSRF token".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
