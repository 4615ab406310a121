//! Configuration management for aptivara.
//!
//! This module handles loading and saving configuration and the login
//! session from `~/.aptivara/`.

mod paths;
mod session;
mod settings;

pub use paths::Paths;
pub use session::{Session, SessionStore};
pub use settings::{ApiConfig, ColorSetting, Config, DashboardConfig, FocusConfig, GeneralConfig};
