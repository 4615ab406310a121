//! Output formatting for aptivara.
//!
//! This module provides formatters for displaying backend data in various formats.

mod json;
mod pretty;

use crate::api::{
    Completion, DailyActivity, LeaderboardEntry, Overview, Skill, SkillProgress, Task, UserStats,
    WeakArea,
};
use crate::cli::args::OutputFormat;
use crate::error::AptivaraError;

pub use json::*;
pub use pretty::*;

/// Format the dashboard overview based on output format
///
/// # Errors
///
/// Returns `AptivaraError::Parse` if JSON serialization fails.
pub fn format_overview(
    overview: &Overview,
    stats: Option<&UserStats>,
    format: OutputFormat,
) -> Result<String, AptivaraError> {
    match format {
        OutputFormat::Pretty => Ok(format_overview_pretty(overview, stats)),
        OutputFormat::Json => format_overview_json(overview, stats),
    }
}

/// Format player stats based on output format
///
/// # Errors
///
/// Returns `AptivaraError::Parse` if JSON serialization fails.
pub fn format_stats(stats: &UserStats, format: OutputFormat) -> Result<String, AptivaraError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(stats)),
        OutputFormat::Json => to_json(stats),
    }
}

/// Format the activity heatmap based on output format
///
/// # Errors
///
/// Returns `AptivaraError::Parse` if JSON serialization fails.
pub fn format_heatmap(days: &[DailyActivity], format: OutputFormat) -> Result<String, AptivaraError> {
    match format {
        OutputFormat::Pretty => Ok(format_heatmap_pretty(days)),
        OutputFormat::Json => format_heatmap_json(days),
    }
}

/// Format weak areas based on output format
///
/// # Errors
///
/// Returns `AptivaraError::Parse` if JSON serialization fails.
pub fn format_weak_areas(areas: &[WeakArea], format: OutputFormat) -> Result<String, AptivaraError> {
    match format {
        OutputFormat::Pretty => Ok(format_weak_areas_pretty(areas)),
        OutputFormat::Json => format_list_json(areas),
    }
}

/// Format the AI recommendation based on output format
///
/// # Errors
///
/// Returns `AptivaraError::Parse` if JSON serialization fails.
pub fn format_recommendation(text: &str, format: OutputFormat) -> Result<String, AptivaraError> {
    match format {
        OutputFormat::Pretty => Ok(format_recommendation_pretty(text)),
        OutputFormat::Json => to_json(&serde_json::json!({ "recommendation": text })),
    }
}

/// Format the leaderboard based on output format
///
/// # Errors
///
/// Returns `AptivaraError::Parse` if JSON serialization fails.
pub fn format_leaderboard(
    entries: &[LeaderboardEntry],
    format: OutputFormat,
) -> Result<String, AptivaraError> {
    match format {
        OutputFormat::Pretty => Ok(format_leaderboard_pretty(entries)),
        OutputFormat::Json => format_list_json(entries),
    }
}

/// Format per-skill progress based on output format
///
/// # Errors
///
/// Returns `AptivaraError::Parse` if JSON serialization fails.
pub fn format_skills_progress(
    progress: &[SkillProgress],
    format: OutputFormat,
) -> Result<String, AptivaraError> {
    match format {
        OutputFormat::Pretty => Ok(format_skills_progress_pretty(progress)),
        OutputFormat::Json => format_list_json(progress),
    }
}

/// Format skills based on output format
///
/// # Errors
///
/// Returns `AptivaraError::Parse` if JSON serialization fails.
pub fn format_skills(skills: &[Skill], format: OutputFormat) -> Result<String, AptivaraError> {
    match format {
        OutputFormat::Pretty => Ok(format_skills_pretty(skills)),
        OutputFormat::Json => format_list_json(skills),
    }
}

/// Format a single skill based on output format
///
/// # Errors
///
/// Returns `AptivaraError::Parse` if JSON serialization fails.
pub fn format_skill(skill: &Skill, format: OutputFormat) -> Result<String, AptivaraError> {
    match format {
        OutputFormat::Pretty => Ok(format_skill_pretty(skill)),
        OutputFormat::Json => to_json(skill),
    }
}

/// Format a skill's tasks based on output format
///
/// # Errors
///
/// Returns `AptivaraError::Parse` if JSON serialization fails.
pub fn format_tasks(
    tasks: &[Task],
    skill: Option<&Skill>,
    format: OutputFormat,
) -> Result<String, AptivaraError> {
    match format {
        OutputFormat::Pretty => {
            let title = skill.map_or_else(
                || "Tasks".to_string(),
                |s| format!("Tasks for \"{}\"", s.name),
            );
            Ok(format_tasks_pretty(tasks, &title))
        }
        OutputFormat::Json => format_tasks_json(tasks, skill),
    }
}

/// Format a task completion based on output format
///
/// # Errors
///
/// Returns `AptivaraError::Parse` if JSON serialization fails.
pub fn format_completion(
    completion: &Completion,
    format: OutputFormat,
) -> Result<String, AptivaraError> {
    match format {
        OutputFormat::Pretty => Ok(format_completion_pretty(completion)),
        OutputFormat::Json => to_json(completion),
    }
}
