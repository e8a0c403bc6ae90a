//! Server configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

use http::HeaderValue;

/// Where notebooks are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL document store (needs `DATABASE_URL`).
    Postgres,
    /// Process memory; contents are lost on restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("expected \"postgres\" or \"memory\", got {:?}", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => f.write_str("postgres"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected \"pretty\" or \"json\", got {:?}", other)),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Storage backend for notebooks.
    pub storage: StorageBackend,
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// HS256 secret for bearer tokens. Empty disables bearer auth.
    pub jwt_secret: String,
    /// Accept the `X-User` header as identity (development only).
    pub allow_dev_identity: bool,
    /// Role a principal must hold to use the notebook API.
    pub required_role: String,
    /// Enforce the CSRF double-submit token on mutating requests.
    pub csrf_protection: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::Postgres,
            port: 3000,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            cors_allowed_origins: "*".to_string(),
            jwt_secret: String::new(),
            allow_dev_identity: false,
            required_role: "USER".to_string(),
            csrf_protection: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `DATABASE_URL`: only when the storage backend is postgres
    ///
    /// Optional:
    /// - `STORAGE_BACKEND`: "postgres" or "memory" (default: "postgres")
    /// - `PORT`: Server port (default: 3000)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `LOG_FORMAT`: "pretty" or "json" (default: "pretty")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `JWT_SECRET`: Bearer token secret (default: empty, bearer auth off)
    /// - `ALLOW_DEV_IDENTITY`: Accept `X-User` header (default: false)
    /// - `REQUIRED_ROLE`: Role needed for the API (default: "USER")
    /// - `CSRF_PROTECTION`: Enforce CSRF tokens (default: true)
    ///
    /// The remaining database settings are read by `notebook_store::StoreConfig`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let storage = parse_var(&lookup, "STORAGE_BACKEND")?.unwrap_or(defaults.storage);
        if storage == StorageBackend::Postgres && lookup("DATABASE_URL").is_none() {
            return Err(ConfigError::MissingEnvVar("DATABASE_URL".to_string()));
        }
        let port = parse_var(&lookup, "PORT")?.unwrap_or(defaults.port);
        let log_level = lookup("LOG_LEVEL").unwrap_or(defaults.log_level);
        let log_format = parse_var(&lookup, "LOG_FORMAT")?.unwrap_or(defaults.log_format);

        let cors_allowed_origins =
            lookup("CORS_ALLOWED_ORIGINS").unwrap_or(defaults.cors_allowed_origins);
        validate_origins(&cors_allowed_origins)?;

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_default();
        let allow_dev_identity =
            parse_bool(&lookup, "ALLOW_DEV_IDENTITY")?.unwrap_or(defaults.allow_dev_identity);
        let required_role = lookup("REQUIRED_ROLE").unwrap_or(defaults.required_role);
        let csrf_protection =
            parse_bool(&lookup, "CSRF_PROTECTION")?.unwrap_or(defaults.csrf_protection);

        Ok(Self {
            storage,
            port,
            log_level,
            log_format,
            cors_allowed_origins,
            jwt_secret,
            allow_dev_identity,
            required_role,
            csrf_protection,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// Parsed CORS origins, or `None` when every origin is allowed.
    pub fn cors_origins(&self) -> Option<Vec<HeaderValue>> {
        if self.cors_allowed_origins.trim() == "*" {
            return None;
        }
        Some(
            self.cors_allowed_origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect(),
        )
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    lookup(name)
        .map(|raw| {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
                name: name.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn parse_bool<F>(lookup: &F, name: &str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidValue {
                name: name.to_string(),
                reason: format!("expected a boolean, got {:?}", other),
            }),
        })
        .transpose()
}

fn validate_origins(origins: &str) -> Result<(), ConfigError> {
    if origins.trim() == "*" {
        return Ok(());
    }
    for origin in origins.split(',') {
        origin
            .trim()
            .parse::<HeaderValue>()
            .map_err(|e| ConfigError::InvalidValue {
                name: "CORS_ALLOWED_ORIGINS".to_string(),
                reason: format!("{:?}: {}", origin.trim(), e),
            })?;
    }
    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
