//! Path resolution for aptivara configuration and session files.
//!
//! All aptivara data is stored in `~/.aptivara/` (or `$APTIVARA_HOME`):
//! - `config.yaml` - Main configuration file
//! - `session.json` - Bearer token saved by `aptivara login`

use std::path::PathBuf;

use crate::error::AptivaraError;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "APTIVARA_HOME";

/// Paths to aptivara configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.aptivara/`
    pub root: PathBuf,
    /// Config file: `~/.aptivara/config.yaml`
    pub config_file: PathBuf,
    /// Session file: `~/.aptivara/session.json`
    pub session_file: PathBuf,
}

impl Paths {
    /// Resolve paths from `$APTIVARA_HOME`, falling back to `$HOME/.aptivara`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, AptivaraError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            AptivaraError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".aptivara")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            session_file: root.join("session.json"),
            root,
        }
    }
}
