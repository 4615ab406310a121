//! Task command implementations.

use colored::Colorize;

use crate::api::{NewTask, SkillTrackerApi};
use crate::cli::args::{OutputFormat, TaskCommands};
use crate::cli::commands::find_skill;
use crate::error::AptivaraError;
use crate::output::{format_completion, format_tasks, to_json};

/// Execute task subcommands.
///
/// # Errors
///
/// Returns an error if input validation, the backend call, or output
/// formatting fails.
pub fn task(
    api: &impl SkillTrackerApi,
    cmd: TaskCommands,
    format: OutputFormat,
) -> Result<String, AptivaraError> {
    match cmd {
        TaskCommands::List { skill_id } => list_tasks(api, skill_id, format),
        TaskCommands::Add {
            skill_id,
            title,
            xp,
            estimate,
        } => add_task(api, skill_id, &title, xp, estimate, format),
        TaskCommands::Complete { task_id } => format_completion(&api.complete_task(task_id)?, format),
    }
}

fn list_tasks(
    api: &impl SkillTrackerApi,
    skill_id: i64,
    format: OutputFormat,
) -> Result<String, AptivaraError> {
    let tasks = api.tasks(skill_id)?;
    // Only used for the heading; a missing skill still lists its tasks.
    let skill = find_skill(api, skill_id).ok();
    format_tasks(&tasks, skill.as_ref(), format)
}

fn add_task(
    api: &impl SkillTrackerApi,
    skill_id: i64,
    title: &str,
    xp: u32,
    estimate: Option<u32>,
    format: OutputFormat,
) -> Result<String, AptivaraError> {
    let body = NewTask::new(title, xp, estimate)?;
    let created = api.create_task(skill_id, &body)?;

    match format {
        OutputFormat::Pretty => Ok(format!(
            "{} Added task: {} {}  {}",
            "✓".green(),
            created.title.bold(),
            format!("+{} XP", created.reward()).cyan(),
            format!("#{}", created.id).dimmed()
        )),
        OutputFormat::Json => to_json(&created),
    }
}
