//! JSON output formatting for aptivara.
//!
//! This module provides functions for formatting backend data as JSON.

use serde::Serialize;
use serde_json::json;

use crate::api::{DailyActivity, Overview, Skill, Task, UserStats};
use crate::error::AptivaraError;
use crate::features::stats::ActivitySummary;

/// Format a list as `{count, items}`.
///
/// # Errors
///
/// Returns `AptivaraError::Parse` if JSON serialization fails.
pub fn format_list_json<T: Serialize>(items: &[T]) -> Result<String, AptivaraError> {
    let output = json!({
        "count": items.len(),
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the dashboard overview together with the player stats.
///
/// # Errors
///
/// Returns `AptivaraError::Parse` if JSON serialization fails.
pub fn format_overview_json(
    overview: &Overview,
    stats: Option<&UserStats>,
) -> Result<String, AptivaraError> {
    let output = json!({
        "overview": overview,
        "stats": stats
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format heatmap days with their summary.
///
/// # Errors
///
/// Returns `AptivaraError::Parse` if JSON serialization fails.
pub fn format_heatmap_json(days: &[DailyActivity]) -> Result<String, AptivaraError> {
    let output = json!({
        "days": days.len(),
        "summary": ActivitySummary::from_days(days),
        "items": days
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a skill's tasks.
///
/// # Errors
///
/// Returns `AptivaraError::Parse` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[Task], skill: Option<&Skill>) -> Result<String, AptivaraError> {
    let output = json!({
        "skill": skill,
        "count": tasks.len(),
        "completed": tasks.iter().filter(|t| t.is_completed).count(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `AptivaraError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, AptivaraError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_list_json() {
        let output = format_list_json(&["a", "b"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 2);
        assert_eq!(value["items"][1], "b");
    }

    #[test]
    fn test_format_overview_without_stats() {
        let overview = Overview {
            total_skills: 2,
            total_tasks: 5,
            completed_tasks: 1,
            pending_tasks: 4,
            overall_progress_percent: 20.0,
        };
        let output = format_overview_json(&overview, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["overview"]["pending_tasks"], 4);
        assert!(value["stats"].is_null());
    }

    #[test]
    fn test_format_heatmap_json_summary() {
        let days = vec![DailyActivity {
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            tasks_completed: 2,
            minutes_spent: 60,
            xp_earned: 25,
            intensity: 2,
        }];
        let output = format_heatmap_json(&days).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["summary"]["xp_earned"], 25);
        assert_eq!(value["items"][0]["date"], "2025-03-01");
    }
}
