use colored::Colorize;

use crate::api::{
    Completion, DailyActivity, LeaderboardEntry, Overview, Skill, SkillProgress, Task, UserStats,
    WeakArea,
};
use crate::features::stats::{render_heatmap, render_percent_bar, render_sparkline, ActivitySummary};

/// Days shown in the heatmap trend line.
const RECENT_DAYS: usize = 14;

/// Format the player card: level, XP progress and streaks.
pub fn format_stats_pretty(stats: &UserStats) -> String {
    let mut output = format!(
        "{}  {}\n",
        format!("Level {}", stats.level).bold(),
        format!("{} XP", stats.xp_points).cyan()
    );
    output.push_str(&format!(
        "  {} {} / {} XP to level {}\n",
        render_percent_bar(stats.level_progress_percent, 30),
        stats.xp_progress_in_level,
        stats.xp_needed_for_next,
        stats.level + 1
    ));
    output.push_str(&format!(
        "  🔥 {} day streak  {}\n",
        stats.current_streak.to_string().yellow(),
        format!("(best: {})", stats.longest_streak).dimmed()
    ));
    output
}

/// Format the dashboard overview.
pub fn format_overview_pretty(overview: &Overview, stats: Option<&UserStats>) -> String {
    let mut output = String::new();

    if let Some(stats) = stats {
        output.push_str(&format_stats_pretty(stats));
        output.push_str(&"─".repeat(60));
        output.push('\n');
    }

    output.push_str(&format!(
        "📚 {} {}   📝 {} {}   ✅ {} {}   📈 {}\n",
        overview.total_skills.to_string().bold(),
        "skills".dimmed(),
        overview.total_tasks.to_string().bold(),
        "tasks".dimmed(),
        overview.completed_tasks.to_string().green().bold(),
        "completed".dimmed(),
        format!("{}%", overview.overall_progress_percent).magenta().bold(),
    ));

    if overview.pending_tasks > 0 {
        output.push_str(&format!(
            "  {}\n",
            format!("{} tasks pending", overview.pending_tasks).dimmed()
        ));
    }

    output
}

/// Format the activity heatmap with its summary line.
pub fn format_heatmap_pretty(days: &[DailyActivity]) -> String {
    let summary = ActivitySummary::from_days(days);

    let mut output = format!("📅 Activity Heatmap (Last {} Days)\n", days.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');
    output.push_str(&render_heatmap(days));
    output.push_str("\n\n");
    output.push_str(&format!(
        "{} active days • {} tasks • {} XP • {} min",
        summary.active_days.to_string().bold(),
        summary.tasks_completed,
        summary.xp_earned.to_string().cyan(),
        summary.minutes_spent
    ));
    if let Some(best) = summary.best_day {
        output.push_str(&format!("\nBest day: {}", best.to_string().yellow()));
    }

    let recent: Vec<u32> = days
        .iter()
        .rev()
        .take(RECENT_DAYS)
        .rev()
        .map(|d| d.tasks_completed)
        .collect();
    if recent.iter().any(|n| *n > 0) {
        output.push_str(&format!(
            "\nLast {} days: {}",
            recent.len(),
            render_sparkline(&recent).green()
        ));
    }
    output
}

/// Format skills with less than half their tasks done.
pub fn format_weak_areas_pretty(areas: &[WeakArea]) -> String {
    if areas.is_empty() {
        return "🎯 Focus Areas (0)\n  No weak areas. Keep it up!".to_string();
    }

    let mut output = format!("🎯 Focus Areas ({})\n", areas.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for area in areas {
        output.push_str(&format!(
            "{} {}  {}\n",
            "⚠".yellow(),
            area.skill_name.bold(),
            render_percent_bar(area.progress_percent, 20)
        ));
        output.push_str(&format!(
            "  {}\n",
            format!("{} tasks remaining", area.pending_tasks).dimmed()
        ));
        if !area.recommendation.is_empty() {
            output.push_str(&format!("  → {}\n", area.recommendation));
        }
    }

    output
}

/// Format the AI coach recommendation.
pub fn format_recommendation_pretty(text: &str) -> String {
    let text = text.trim();
    let body = if text.is_empty() {
        "No recommendation available yet.".dimmed().to_string()
    } else {
        text.to_string()
    };
    format!("🤖 {}\n{}\n{body}", "AI Coach".bold(), "─".repeat(60))
}

/// Format the leaderboard.
pub fn format_leaderboard_pretty(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "🏆 Leaderboard\n  No players yet".to_string();
    }

    let mut output = format!("🏆 {}\n", "Leaderboard".bold());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for entry in entries {
        let medal = match entry.rank {
            1 => "🥇",
            2 => "🥈",
            3 => "🥉",
            _ => "  ",
        };
        let line = format!(
            "{medal} {:>3}. {:<24} Lv {:<3} {:>7} XP  🔥 {}",
            entry.rank, entry.name, entry.level, entry.xp_points, entry.current_streak
        );
        if entry.is_current_user {
            output.push_str(&format!("{}  {}\n", line.bold(), "← you".cyan()));
        } else {
            output.push_str(&line);
            output.push('\n');
        }
    }

    output
}

/// Format per-skill completion.
pub fn format_skills_progress_pretty(progress: &[SkillProgress]) -> String {
    if progress.is_empty() {
        return "Skill Progress (0)\n  No skills".to_string();
    }

    let width = progress
        .iter()
        .map(|p| p.skill_name.chars().count())
        .max()
        .unwrap_or(0)
        .min(30);

    let mut output = format!("Skill Progress ({})\n", progress.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for p in progress {
        output.push_str(&format!(
            "{:<width$}  {}\n",
            truncate(&p.skill_name, width),
            render_percent_bar(p.progress_percent, 20)
        ));
    }

    output
}

/// Format a list of skills.
pub fn format_skills_pretty(skills: &[Skill]) -> String {
    if skills.is_empty() {
        return "Skills (0)\n  No skills yet. Add your first skill!".to_string();
    }

    let mut output = format!("Skills ({})\n", skills.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for skill in skills {
        let category = skill.category();
        let mut line = format!(
            "{} {}  {}",
            category.icon(),
            skill.name.bold(),
            format!("#{}", skill.id).dimmed()
        );

        if let Some(description) = skill.description.as_deref().filter(|d| !d.is_empty()) {
            line.push_str(&format!("  {}", description.dimmed()));
        }

        if let Some(goal) = &skill.goal_date {
            line.push_str(&format!("  {}", format!("goal {}", goal.format("%Y-%m-%d")).yellow()));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single skill.
pub fn format_skill_pretty(skill: &Skill) -> String {
    let category = skill.category();
    let mut output = format!("{} {}\n", category.icon(), skill.name.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), skill.id));
    output.push_str(&format!("  {}: {}\n", "Category".dimmed(), category.label()));

    if let Some(description) = skill.description.as_deref().filter(|d| !d.is_empty()) {
        output.push_str(&format!("  {}: {}\n", "Description".dimmed(), description));
    }
    if let Some(priority) = skill.priority {
        output.push_str(&format!("  {}: {}\n", "Priority".dimmed(), priority));
    }
    if let Some(target) = skill.target_hours.filter(|h| *h > 0.0) {
        output.push_str(&format!(
            "  {}: {:.1}h / {target:.1}h\n",
            "Hours".dimmed(),
            skill.total_hours_spent.unwrap_or(0.0)
        ));
    }
    if let Some(goal) = &skill.goal_date {
        output.push_str(&format!("  {}: {}\n", "Goal".dimmed(), goal.format("%Y-%m-%d")));
    }
    if let Some(created) = &skill.created_at {
        output.push_str(&format!(
            "  {}: {}\n",
            "Created".dimmed(),
            created.format("%Y-%m-%d %H:%M")
        ));
    }

    output
}

/// Format the tasks of a skill.
pub fn format_tasks_pretty(tasks: &[Task], title: &str) -> String {
    if tasks.is_empty() {
        return format!("{title} (0 tasks)\n  No tasks yet. Add your first task!");
    }

    let done = tasks.iter().filter(|t| t.is_completed).count();
    let mut output = format!("{title} ({done}/{} done)\n", tasks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for task in tasks {
        let (icon, name) = if task.is_completed {
            ("[x]".green(), task.title.strikethrough().dimmed().to_string())
        } else {
            ("[ ]".white(), task.title.bold().to_string())
        };

        let mut line = format!(
            "{icon} {name}  {}  {}",
            format!("+{} XP", task.reward()).cyan(),
            format!("#{}", task.id).dimmed()
        );

        if let Some(minutes) = task.estimated_minutes {
            line.push_str(&format!("  {}", format!("~{minutes}m").dimmed()));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format the result of completing a task.
pub fn format_completion_pretty(completion: &Completion) -> String {
    if !completion.awarded() {
        return completion.summary().yellow().to_string();
    }

    let mut output = completion.summary().green().bold().to_string();
    if let Some(total) = completion.total_xp {
        output.push_str(&format!("\n   Total XP: {total}"));
    }
    if let Some(level) = completion.level {
        output.push_str(&format!("\n   Level: {level}"));
    }
    output
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}
