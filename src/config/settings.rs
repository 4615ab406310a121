//! Configuration settings for aptivara.
//!
//! Settings are loaded from `~/.aptivara/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_API_URL;
use crate::cli::args::OutputFormat;
use crate::error::AptivaraError;
use crate::features::focus::{MAX_MINUTES, PRESETS};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Backend connection settings.
    pub api: ApiConfig,
    /// Focus timer settings.
    pub focus: FocusConfig,
    /// Dashboard settings.
    pub dashboard: DashboardConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply the setting to the `colored` crate's global override.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the skill-tracker API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Focus timer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Session length used when none is given.
    #[serde(default = "default_focus_minutes")]
    pub default_minutes: u32,
    /// Session lengths offered by the TUI.
    #[serde(default = "default_presets")]
    pub presets: Vec<u32>,
    /// Ring the terminal bell when a session completes.
    #[serde(default = "default_true")]
    pub bell: bool,
}

/// Dashboard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Days of activity shown in the heatmap.
    #[serde(default = "default_heatmap_days")]
    pub heatmap_days: u32,
    /// Entries fetched for the leaderboard.
    #[serde(default = "default_leaderboard_limit")]
    pub leaderboard_limit: u32,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_focus_minutes() -> u32 {
    25
}

fn default_presets() -> Vec<u32> {
    PRESETS.to_vec()
}

const fn default_true() -> bool {
    true
}

const fn default_heatmap_days() -> u32 {
    90
}

const fn default_leaderboard_limit() -> u32 {
    10
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            default_minutes: default_focus_minutes(),
            presets: default_presets(),
            bell: default_true(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            heatmap_days: default_heatmap_days(),
            leaderboard_limit: default_leaderboard_limit(),
        }
    }
}

impl FocusConfig {
    /// Configured presets with zero-length and over-long entries dropped;
    /// the built-in presets if nothing usable remains.
    #[must_use]
    pub fn usable_presets(&self) -> Vec<u32> {
        let presets: Vec<u32> = self
            .presets
            .iter()
            .copied()
            .filter(|m| (1..=MAX_MINUTES).contains(m))
            .collect();
        if presets.is_empty() {
            default_presets()
        } else {
            presets
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, AptivaraError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            AptivaraError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            AptivaraError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.focus.default_minutes, 25);
        assert_eq!(config.focus.presets, vec![25, 45, 60]);
        assert!(config.focus.bell);
        assert_eq!(config.dashboard.heatmap_days, 90);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        // Should return defaults when file doesn't exist
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_written_config_loads() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.api.base_url = "https://skills.example.com".to_string();
        config.focus.presets = vec![15, 30];

        std::fs::write(&config_path, serde_yaml::to_string(&config).unwrap()).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.api.base_url, "https://skills.example.com");
        assert_eq!(loaded.focus.presets, vec![15, 30]);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r#"
focus:
  default_minutes: 45
dashboard:
  heatmap_days: 30
"#;
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.focus.default_minutes, 45);
        assert_eq!(config.dashboard.heatmap_days, 30);
        // Defaults should be used for missing fields
        assert_eq!(config.focus.presets, vec![25, 45, 60]);
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "focus: [not, a, map]").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(AptivaraError::Config(_))
        ));
    }

    #[test]
    fn test_usable_presets() {
        let mut focus = FocusConfig::default();
        focus.presets = vec![0, 20, 71_582_789];
        assert_eq!(focus.usable_presets(), vec![20]);

        focus.presets = vec![0];
        assert_eq!(focus.usable_presets(), vec![25, 45, 60]);
    }
}
