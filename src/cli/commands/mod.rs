//! Command implementations for aptivara.
//!
//! Each command takes what it needs (usually a [`SkillTrackerApi`]) and
//! returns the text to print.
//!
//! [`SkillTrackerApi`]: crate::api::SkillTrackerApi

mod auth;
mod completions;
mod dashboard;
mod focus;
mod skill;
mod task;

pub use auth::{login, logout, register};
pub use completions::completions;
pub use dashboard::{heatmap, leaderboard, overview, progress, recommend, stats, weak_areas};
pub use focus::{focus, resolve_minutes, FocusReport};
pub use skill::{find_skill, skill};
pub use task::task;
