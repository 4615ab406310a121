//! Dashboard command implementations.

use crate::api::SkillTrackerApi;
use crate::cli::args::OutputFormat;
use crate::error::AptivaraError;
use crate::output::{
    format_heatmap, format_leaderboard, format_overview, format_recommendation,
    format_skills_progress, format_stats, format_weak_areas,
};

/// Execute overview command
///
/// # Errors
///
/// Returns an error if the backend call fails or output formatting fails.
pub fn overview(api: &impl SkillTrackerApi, format: OutputFormat) -> Result<String, AptivaraError> {
    let overview = api.overview()?;
    let stats = api.user_stats()?;
    format_overview(&overview, Some(&stats), format)
}

/// Execute stats command
///
/// # Errors
///
/// Returns an error if the backend call fails or output formatting fails.
pub fn stats(api: &impl SkillTrackerApi, format: OutputFormat) -> Result<String, AptivaraError> {
    format_stats(&api.user_stats()?, format)
}

/// Execute heatmap command
///
/// # Errors
///
/// Returns an error if `days` is zero, the backend call fails, or output
/// formatting fails.
pub fn heatmap(
    api: &impl SkillTrackerApi,
    days: u32,
    format: OutputFormat,
) -> Result<String, AptivaraError> {
    if days == 0 {
        return Err(AptivaraError::InvalidInput("--days must be at least 1".to_string()));
    }
    format_heatmap(&api.activity_heatmap(days)?, format)
}

/// Execute weak-areas command
///
/// # Errors
///
/// Returns an error if the backend call fails or output formatting fails.
pub fn weak_areas(api: &impl SkillTrackerApi, format: OutputFormat) -> Result<String, AptivaraError> {
    format_weak_areas(&api.weak_areas()?, format)
}

/// Execute recommend command
///
/// # Errors
///
/// Returns an error if the backend call fails or output formatting fails.
pub fn recommend(api: &impl SkillTrackerApi, format: OutputFormat) -> Result<String, AptivaraError> {
    format_recommendation(&api.ai_recommendation()?, format)
}

/// Execute leaderboard command
///
/// # Errors
///
/// Returns an error if `limit` is zero, the backend call fails, or output
/// formatting fails.
pub fn leaderboard(
    api: &impl SkillTrackerApi,
    limit: u32,
    format: OutputFormat,
) -> Result<String, AptivaraError> {
    if limit == 0 {
        return Err(AptivaraError::InvalidInput("--limit must be at least 1".to_string()));
    }
    format_leaderboard(&api.leaderboard(limit)?, format)
}

/// Execute progress command
///
/// # Errors
///
/// Returns an error if the backend call fails or output formatting fails.
pub fn progress(api: &impl SkillTrackerApi, format: OutputFormat) -> Result<String, AptivaraError> {
    format_skills_progress(&api.skills_progress()?, format)
}
