//! Caller identity: HS256 bearer tokens and the development `X-User` header.

use axum::http::{HeaderMap, header};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Development identity header (username).
pub const DEV_USER_HEADER: &str = "x-user";

/// Development roles header (comma-separated).
pub const DEV_ROLES_HEADER: &str = "x-user-roles";

/// Role granted to development identities that name no roles.
pub const DEFAULT_ROLE: &str = "USER";

/// JWT claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Username (subject).
    pub sub: String,
    /// Granted roles.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Expiration time (unix timestamp).
    pub exp: usize,
    /// Issued at (unix timestamp).
    pub iat: usize,
}

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Username.
    pub username: String,
    /// Granted roles, as issued.
    pub roles: Vec<String>,
}

impl Principal {
    /// Create a principal.
    pub fn new(username: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            username: username.into(),
            roles,
        }
    }

    /// Whether the principal holds `role`. A `ROLE_` prefix on either side is ignored.
    pub fn has_role(&self, role: &str) -> bool {
        let wanted = strip_role_prefix(role);
        self.roles.iter().any(|r| strip_role_prefix(r) == wanted)
    }
}

fn strip_role_prefix(role: &str) -> &str {
    let role = role.trim();
    role.strip_prefix("ROLE_").unwrap_or(role)
}

/// Create a signed token for a user.
pub fn issue_token(
    username: &str,
    roles: &[&str],
    secret: &str,
    expiry_hours: u64,
) -> Result<String, ApiError> {
    let now = chrono::Utc::now();
    let exp = (now + chrono::Duration::hours(expiry_hours as i64)).timestamp() as usize;

    let claims = Claims {
        sub: username.to_string(),
        roles: roles.iter().map(|r| (*r).to_string()).collect(),
        exp,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Failed to create token: {}", e)))
}

/// Validate a token and return its claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "Token validation failed");
        ApiError::Unauthorized(format!("Invalid token: {}", e))
    })?;

    Ok(token_data.claims)
}

/// Resolve the caller from request headers.
///
/// Priority:
/// 1. `Authorization: Bearer <jwt>`, checked against `JWT_SECRET`.
/// 2. `X-User` (with optional `X-User-Roles`), only when dev identity is allowed.
///
/// Anything else is `Unauthorized`.
pub fn resolve_principal(headers: &HeaderMap, config: &ServerConfig) -> Result<Principal, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header.to_str().map_err(|_| {
            ApiError::Unauthorized("Authorization header contains invalid characters".into())
        })?;

        let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("Authorization header must be Bearer <token>".into())
        })?;

        if config.jwt_secret.is_empty() {
            return Err(ApiError::Unauthorized(
                "Bearer authentication is not enabled".into(),
            ));
        }

        let claims = validate_token(token.trim(), &config.jwt_secret)?;
        return Ok(Principal::new(claims.sub, claims.roles));
    }

    if config.allow_dev_identity {
        if let Some(principal) = dev_principal(headers)? {
            tracing::debug!(user = %principal.username, "Using dev identity from X-User header");
            return Ok(principal);
        }
    }

    Err(ApiError::Unauthorized("Authentication required".into()))
}

fn dev_principal(headers: &HeaderMap) -> Result<Option<Principal>, ApiError> {
    let Some(value) = headers.get(DEV_USER_HEADER) else {
        return Ok(None);
    };
    let username = value
        .to_str()
        .map_err(|_| ApiError::Unauthorized("X-User header contains invalid characters".into()))?
        .trim();
    if username.is_empty() {
        return Ok(None);
    }

    let raw_roles = headers
        .get(DEV_ROLES_HEADER)
        .map(|v| v.to_str())
        .transpose()
        .map_err(|_| {
            ApiError::Unauthorized("X-User-Roles header contains invalid characters".into())
        })?;
    let mut roles: Vec<String> = raw_roles
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();
    if roles.is_empty() {
        roles.push(DEFAULT_ROLE.to_string());
    }

    Ok(Some(Principal::new(username, roles)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const SECRET: &str = "test_secret_key_12345";

    fn config(secret: &str, allow_dev: bool) -> ServerConfig {
        ServerConfig {
            jwt_secret: secret.to_string(),
            allow_dev_identity: allow_dev,
            ..ServerConfig::default()
        }
    }

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_issue_and_validate_token() {
        let token = issue_token("alice", &["USER", "ADMIN"], SECRET, 24).unwrap();
        let claims = validate_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.roles, ["USER", "ADMIN"]);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_validate_token_wrong_secret() {
        let token = issue_token("alice", &["USER"], "secret1", 24).unwrap();
        assert!(matches!(
            validate_token(&token, "secret2"),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_validate_token_expired() {
        let past = chrono::Utc::now().timestamp() as usize - 7200;
        let claims = Claims {
            sub: "alice".into(),
            roles: vec!["USER".into()],
            exp: past + 3600,
            iat: past,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_has_role_ignores_prefix() {
        let principal = Principal::new("alice", vec!["ROLE_USER".into()]);
        assert!(principal.has_role("USER"));
        assert!(principal.has_role("ROLE_USER"));
        assert!(!principal.has_role("ADMIN"));
    }

    #[test]
    fn test_resolve_bearer_token() {
        let token = issue_token("alice", &["USER"], SECRET, 1).unwrap();
        let auth = format!("Bearer {}", token);

        let principal =
            resolve_principal(&headers(&[("authorization", &auth)]), &config(SECRET, false))
                .unwrap();
        assert_eq!(principal.username, "alice");
        assert!(principal.has_role("USER"));
    }

    #[test]
    fn test_resolve_bearer_without_secret_rejected() {
        let token = issue_token("alice", &["USER"], SECRET, 1).unwrap();
        let auth = format!("Bearer {}", token);

        let result = resolve_principal(&headers(&[("authorization", &auth)]), &config("", true));
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_resolve_non_bearer_scheme_rejected() {
        let result = resolve_principal(
            &headers(&[("authorization", "Basic YWxpY2U6cHc=")]),
            &config(SECRET, true),
        );
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_resolve_dev_identity() {
        let principal = resolve_principal(
            &headers(&[("x-user", "bob"), ("x-user-roles", "USER, ADMIN")]),
            &config("", true),
        )
        .unwrap();
        assert_eq!(principal.username, "bob");
        assert_eq!(principal.roles, ["USER", "ADMIN"]);

        let principal =
            resolve_principal(&headers(&[("x-user", "carol")]), &config("", true)).unwrap();
        assert_eq!(principal.roles, [DEFAULT_ROLE]);
    }

    #[test]
    fn test_dev_roles_with_invalid_bytes_rejected() {
        let mut map = headers(&[("x-user", "bob")]);
        map.insert(
            DEV_ROLES_HEADER,
            HeaderValue::from_bytes(b"ADMIN\xff").unwrap(),
        );

        let result = resolve_principal(&map, &config("", true));
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_dev_identity_ignored_when_disabled() {
        let result = resolve_principal(&headers(&[("x-user", "bob")]), &config(SECRET, false));
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_no_credentials_unauthorized() {
        let result = resolve_principal(&HeaderMap::new(), &config(SECRET, true));
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }
}
