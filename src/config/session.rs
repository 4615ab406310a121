//! Persisted login session.
//!
//! The bearer token from `POST /auth/login` is kept in
//! `~/.aptivara/session.json` until `aptivara logout` removes it.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AptivaraError;

/// A saved login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token.
    pub access_token: String,
    /// Email the token was issued for.
    #[serde(default)]
    pub email: Option<String>,
    /// Backend that issued the token.
    #[serde(default)]
    pub api_url: Option<String>,
    /// When the login happened.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// A session created now.
    #[must_use]
    pub fn new(access_token: String, email: Option<String>, api_url: Option<String>) -> Self {
        Self {
            access_token,
            email,
            api_url,
            created_at: Utc::now(),
        }
    }
}

/// File-backed session storage.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved session, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<Session>, AptivaraError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let session: Session = serde_json::from_str(&contents).map_err(|e| {
            AptivaraError::Config(format!(
                "Corrupt session file {}: {e}. Run `aptivara logout`",
                self.path.display()
            ))
        })?;
        Ok(Some(session))
    }

    /// Persist `session`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, session: &Session) -> Result<(), AptivaraError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(session)?;
        write_private(&self.path, contents.as_bytes())?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Remove the saved session.
    ///
    /// Returns `true` if a session existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<bool, AptivaraError> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)?;
        debug!(path = %self.path.display(), "session cleared");
        Ok(true)
    }
}

/// Write `contents` to a file only the owner can read. The mode is set at
/// creation, and tightened on an existing file before the token is written.
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> Result<(), AptivaraError> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)?;
    Ok(())
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> Result<(), AptivaraError> {
    std::fs::write(path, contents)?;
    Ok(())
}
