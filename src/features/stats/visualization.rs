//! Terminal visualization for dashboard data.
//!
//! Provides the activity heatmap grid, sparklines and progress bars.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::api::DailyActivity;

/// Characters for sparkline rendering.
const BAR_CHARS: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];
const FULL_BLOCK: char = '█';

/// Heatmap glyph per intensity level (0-4).
pub const HEAT_CHARS: [char; 5] = ['·', '░', '▒', '▓', '█'];

/// Row labels of the heatmap, Monday first.
pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A heatmap laid out as 7 weekday rows by N week columns.
///
/// Cells outside the reported date range are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapGrid {
    /// Monday of the first column.
    pub first_monday: NaiveDate,
    /// `rows[weekday][week]` intensity level.
    pub rows: [Vec<Option<u8>>; 7],
}

impl HeatmapGrid {
    /// Lay out `days` by weekday. Returns `None` when there is no data.
    #[must_use]
    pub fn build(days: &[DailyActivity]) -> Option<Self> {
        let first = days.iter().map(|d| d.date).min()?;
        let last = days.iter().map(|d| d.date).max()?;

        let first_monday = first - Duration::days(i64::from(first.weekday().num_days_from_monday()));
        let weeks = usize::try_from((last - first_monday).num_days() / 7 + 1).unwrap_or(1);

        let mut rows: [Vec<Option<u8>>; 7] = Default::default();
        for row in &mut rows {
            *row = vec![None; weeks];
        }

        for day in days {
            let offset = usize::try_from((day.date - first_monday).num_days()).unwrap_or(0);
            let (week, weekday) = (offset / 7, offset % 7);
            rows[weekday][week] = Some(day.level());
        }

        Some(Self { first_monday, rows })
    }

    /// Number of week columns.
    #[must_use]
    pub fn weeks(&self) -> usize {
        self.rows[0].len()
    }
}

/// Render a weekly activity heatmap.
///
/// Rows are days of the week, columns are weeks, oldest on the left.
#[must_use]
pub fn render_heatmap(days: &[DailyActivity]) -> String {
    let Some(grid) = HeatmapGrid::build(days) else {
        return "No activity yet".to_string();
    };

    let mut lines = Vec::new();
    for (label, row) in DAY_LABELS.iter().zip(grid.rows.iter()) {
        let cells: String = row
            .iter()
            .map(|cell| cell.map_or(' ', |level| HEAT_CHARS[usize::from(level.min(4))]))
            .collect();
        lines.push(format!("{label} {cells}"));
    }

    lines.push(String::new());
    lines.push(format!(
        "Less {} More",
        HEAT_CHARS.iter().collect::<String>()
    ));

    lines.join("\n")
}

/// Totals over a heatmap range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivitySummary {
    /// Days with at least one completed task.
    pub active_days: usize,
    /// Tasks completed across the range.
    pub tasks_completed: u32,
    /// Minutes logged across the range.
    pub minutes_spent: u32,
    /// XP earned across the range.
    pub xp_earned: u32,
    /// Most productive day, if any activity was logged.
    pub best_day: Option<NaiveDate>,
}

impl ActivitySummary {
    /// Summarize a heatmap range.
    #[must_use]
    pub fn from_days(days: &[DailyActivity]) -> Self {
        let best_day = days
            .iter()
            .filter(|d| d.tasks_completed > 0)
            .max_by_key(|d| (d.tasks_completed, d.date))
            .map(|d| d.date);

        Self {
            active_days: days.iter().filter(|d| d.tasks_completed > 0).count(),
            tasks_completed: days.iter().map(|d| d.tasks_completed).sum(),
            minutes_spent: days.iter().map(|d| d.minutes_spent).sum(),
            xp_earned: days.iter().map(|d| d.xp_earned).sum(),
            best_day,
        }
    }
}

/// Render a sparkline (compact inline chart).
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_sparkline(values: &[u32]) -> String {
    let max_value = values.iter().copied().max().unwrap_or(1).max(1);

    values
        .iter()
        .map(|&v| {
            if v == 0 {
                BAR_CHARS[0]
            } else {
                let normalized = (f64::from(v) / f64::from(max_value) * 7.0) as usize;
                BAR_CHARS[normalized.clamp(1, 7)]
            }
        })
        .collect()
}

/// Render a percentage bar like `[██████░░░░] 60%`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_percent_bar(percent: f64, width: usize) -> String {
    let fraction = (percent / 100.0).clamp(0.0, 1.0);
    let filled = (fraction * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    format!(
        "[{}{}] {percent:.0}%",
        FULL_BLOCK.to_string().repeat(filled),
        "░".repeat(empty)
    )
}
