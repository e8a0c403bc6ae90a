//! Command implementations and the HTTP plumbing they share.

pub mod add_note;
pub mod create;
pub mod delete;
pub mod list;
pub mod note;
pub mod rename;
pub mod show;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use reqwest::header::{AUTHORIZATION, COOKIE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Cookie the server reads the CSRF token from.
const CSRF_COOKIE: &str = "XSRF-TOKEN";

/// Header the server expects the CSRF token in.
const CSRF_HEADER: &str = "X-XSRF-TOKEN";

/// Development identity header.
const DEV_USER_HEADER: &str = "x-user";

/// HTTP failures reported by the server or the transport.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The server answered with an error body.
    #[error("{status} {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// The server answered with a non-JSON error.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never got a response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ErrorDetails {
    code: String,
    message: String,
}

/// Client plus base URL for one CLI invocation.
pub struct Api {
    client: Client,
    base_url: String,
}

impl Api {
    /// Create an API handle with credentials applied to every request.
    pub fn new(base_url: &str, token: Option<&str>, user: Option<&str>) -> Result<Self> {
        Ok(Self {
            client: build_client(token, user)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for a server path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET request builder.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    /// Request builder for a mutating call, carrying a fresh CSRF token.
    pub async fn mutating(&self, method: reqwest::Method, path: &str) -> Result<RequestBuilder> {
        let token = self.fetch_csrf_token().await?;
        Ok(self
            .client
            .request(method, self.url(path))
            .header(COOKIE, format!("{}={}", CSRF_COOKIE, token))
            .header(CSRF_HEADER, token))
    }

    /// Fetch a CSRF token from `/api/csrf`.
    async fn fetch_csrf_token(&self) -> Result<String> {
        #[derive(Deserialize)]
        struct CsrfTokenResponse {
            token: String,
        }

        let response: CsrfTokenResponse = make_request(self.get("/api/csrf"))
            .await
            .context("Failed to obtain CSRF token")?;
        Ok(response.token)
    }
}

/// Build an HTTP client that sends the bearer token or dev identity.
pub fn build_client(token: Option<&str>, user: Option<&str>) -> Result<Client> {
    let mut headers = HeaderMap::new();

    if let Some(token) = token {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .context("Token contains invalid header characters")?;
        headers.insert(AUTHORIZATION, value);
    }

    if let Some(user) = user {
        let value =
            HeaderValue::from_str(user).context("User contains invalid header characters")?;
        headers.insert(DEV_USER_HEADER, value);
    }

    Client::builder()
        .default_headers(headers)
        .build()
        .context("Failed to build HTTP client")
}

/// Send a request and decode the JSON response, turning error statuses into [`CliError`].
pub async fn make_request<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, CliError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(error_from_body(status.as_u16(), body));
    }

    Ok(response.json().await?)
}

fn error_from_body(status: u16, body: String) -> CliError {
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) => CliError::Api {
            status,
            code: parsed.error.code,
            message: parsed.error.message,
        },
        Err(_) => CliError::Http { status, body },
    }
}

/// Types that can be printed for humans.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Print JSON (default) or the human-readable form.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Format a timestamp for human output.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Shorten text to at most `max` characters, adding an ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

// ============================================================================
// Shared response types
// ============================================================================

/// A note as returned by the server.
#[derive(Debug, Deserialize, Serialize)]
pub struct NoteResponse {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub created: DateTime<Utc>,
}

/// A notebook with its notes.
#[derive(Debug, Deserialize, Serialize)]
pub struct NotebookResponse {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub notes: Vec<NoteResponse>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl HumanReadable for NoteResponse {
    fn print_human(&self) {
        println!("{}", self.title.bold());
        println!("  {} {}", "ID:".cyan(), self.id);
        println!("  {} {}", "Created:".cyan(), format_timestamp(&self.created));
        if let Some(content) = &self.content {
            println!();
            println!("{}", content);
        }
    }
}

impl HumanReadable for NotebookResponse {
    fn print_human(&self) {
        println!("{}", self.title.green().bold());
        println!("{}", "=".repeat(80));
        println!("  {} {}", "ID:".cyan(), self.id);
        println!("  {} {}", "Created:".cyan(), format_timestamp(&self.created));
        println!("  {} {}", "Updated:".cyan(), format_timestamp(&self.updated));
        println!();

        if self.notes.is_empty() {
            println!("  {}", "(No notes)".dimmed());
            return;
        }

        for note in &self.notes {
            println!("  {} {}", "-".yellow(), note.title.bold());
            println!("    {} {}", "ID:".cyan(), note.id);
            if let Some(content) = &note.content {
                println!("    {}", truncate(content, 72).dimmed());
            }
        }
        println!();
        println!("  {} {}", "Notes:".cyan(), self.notes.len());
    }
}
