//! Error types for aptivara.

use thiserror::Error;

/// Errors surfaced by the client.
///
/// Every failure is terminal for the action that triggered it; nothing is
/// retried or queued.
#[derive(Debug, Error)]
pub enum AptivaraError {
    /// Configuration, path, or terminal setup problem.
    #[error("{0}")]
    Config(String),

    /// Filesystem or terminal I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON could not be parsed or produced.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The backend could not be reached.
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{detail} (HTTP {status})")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `detail` field of the error body, or a generic message.
        detail: String,
    },

    /// The backend rejected the bearer token.
    #[error("Session expired or invalid: {0}. Run `aptivara login` again")]
    Unauthorized(String),

    /// Login was refused.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No session token has been saved yet.
    #[error("Not logged in. Run `aptivara login` first")]
    NotLoggedIn,

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input rejected before any request was sent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AptivaraError {
    /// Map an HTTP status and optional FastAPI `detail` into an error.
    #[must_use]
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        let detail = detail.unwrap_or_else(|| default_detail(status).to_string());
        match status {
            401 => Self::Unauthorized(detail),
            404 => Self::NotFound(detail),
            _ => Self::Api { status, detail },
        }
    }
}

const fn default_detail(status: u16) -> &'static str {
    match status {
        400 => "Bad request",
        401 => "Invalid credentials",
        403 => "Forbidden",
        404 => "Resource not found",
        422 => "Validation failed",
        500..=599 => "Server error",
        _ => "Request failed",
    }
}
