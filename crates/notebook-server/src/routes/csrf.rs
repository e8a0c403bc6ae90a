//! CSRF token issuing endpoint.

use axum::{Json, Router, routing::get};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

use crate::middleware::csrf::{CSRF_COOKIE, CSRF_HEADER, generate_token};
use crate::state::AppState;

/// Response for GET /api/csrf.
#[derive(Debug, Serialize)]
pub struct CsrfTokenResponse {
    /// The token to echo back.
    pub token: String,
    /// Header mutating requests must carry the token in.
    pub header_name: &'static str,
    /// Cookie the token was set in.
    pub cookie_name: &'static str,
}

/// GET /api/csrf - Issue a CSRF token.
///
/// Sets the `XSRF-TOKEN` cookie (readable by scripts, so the page can echo it)
/// and returns the same value in the body.
async fn issue_csrf_token(jar: CookieJar) -> (CookieJar, Json<CsrfTokenResponse>) {
    let token = generate_token();
    let cookie = Cookie::build((CSRF_COOKIE, token.clone()))
        .path("/")
        .same_site(SameSite::Strict)
        .http_only(false);

    (
        jar.add(cookie),
        Json(CsrfTokenResponse {
            token,
            header_name: CSRF_HEADER,
            cookie_name: CSRF_COOKIE,
        }),
    )
}

/// Build CSRF routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/csrf", get(issue_csrf_token))
}
