//! Everything a command needs before it runs: config, paths, the saved
//! session and a client pointed at the right backend.

use std::time::Duration;

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::cli::args::{Cli, OutputFormat};
use crate::config::{Config, Paths, SessionStore};
use crate::error::AptivaraError;

/// Resolved runtime settings for one invocation.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration.
    pub config: Config,
    /// Data directory layout.
    pub paths: Paths,
    /// Saved login.
    pub sessions: SessionStore,
    /// Backend base URL after CLI/env overrides.
    pub api_url: String,
    /// Output format after CLI overrides.
    pub format: OutputFormat,
}

impl Context {
    /// Load config from the default location and apply CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be resolved or the
    /// config file is invalid.
    pub fn load(cli: &Cli) -> Result<Self, AptivaraError> {
        let paths = Paths::new()?;
        let config = Config::load_from_path(&paths.config_file)?;
        Ok(Self::from_parts(paths, config, cli.output, cli.api_url.clone()))
    }

    /// Build a context from already-resolved pieces.
    #[must_use]
    pub fn from_parts(
        paths: Paths,
        config: Config,
        output: Option<OutputFormat>,
        api_url: Option<String>,
    ) -> Self {
        config.general.color.apply();

        let api_url = api_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| config.api.base_url.clone());
        let format = output.unwrap_or(config.general.default_output);
        let sessions = SessionStore::new(paths.session_file.clone());

        Self {
            config,
            paths,
            sessions,
            api_url,
            format,
        }
    }

    /// Request timeout from the config.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.api.timeout_secs)
    }

    /// A client without credentials, for login and registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn anonymous_client(&self) -> Result<ApiClient, AptivaraError> {
        ApiClient::new(&self.api_url, self.timeout())
    }

    /// A client carrying the saved session token, if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file is unreadable or the HTTP
    /// client cannot be built.
    pub fn client(&self) -> Result<ApiClient, AptivaraError> {
        let session = self.sessions.load()?;

        if let Some(issuer) = session.as_ref().and_then(|s| s.api_url.as_deref()) {
            if issuer.trim_end_matches('/') != self.api_url.trim_end_matches('/') {
                warn!(
                    session = issuer,
                    current = %self.api_url,
                    "saved session was issued by a different backend"
                );
            }
        }

        debug!(api_url = %self.api_url, logged_in = session.is_some(), "client ready");
        Ok(self
            .anonymous_client()?
            .with_token(session.map(|s| s.access_token)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Session;
    use tempfile::TempDir;

    fn context(dir: &TempDir, config: Config, api_url: Option<&str>) -> Context {
        Context::from_parts(
            Paths::with_root(dir.path().to_path_buf()),
            config,
            None,
            api_url.map(str::to_string),
        )
    }

    #[test]
    fn test_config_values_used_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.api.base_url = "http://tracker.local:9000".to_string();
        config.general.default_output = OutputFormat::Json;

        let ctx = context(&temp_dir, config, None);
        assert_eq!(ctx.api_url, "http://tracker.local:9000");
        assert_eq!(ctx.format, OutputFormat::Json);
        assert_eq!(ctx.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_cli_overrides_config() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = Context::from_parts(
            Paths::with_root(temp_dir.path().to_path_buf()),
            Config::default(),
            Some(OutputFormat::Json),
            Some("http://override:1234".to_string()),
        );
        assert_eq!(ctx.api_url, "http://override:1234");
        assert_eq!(ctx.format, OutputFormat::Json);
    }

    #[test]
    fn test_blank_api_url_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir, Config::default(), Some("  "));
        assert_eq!(ctx.api_url, crate::api::DEFAULT_API_URL);
    }

    #[test]
    fn test_client_picks_up_saved_token() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir, Config::default(), None);
        assert!(!ctx.client().unwrap().has_token());

        ctx.sessions
            .save(&Session::new("tok".to_string(), None, Some(ctx.api_url.clone())))
            .unwrap();
        assert!(ctx.client().unwrap().has_token());
    }
}
