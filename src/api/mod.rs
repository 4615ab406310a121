//! Client for the skill-tracker backend.
//!
//! All XP, level, streak, heatmap and recommendation logic lives server-side;
//! this module only moves typed payloads over HTTP.

pub mod client;
pub mod types;

#[cfg(test)]
pub use client::MockSkillTrackerApi;
pub use client::{ApiClient, SkillTrackerApi, DEFAULT_API_URL};
pub use types::*;
