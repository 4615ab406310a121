//! Skill command implementations.

use colored::Colorize;
use serde_json::json;

use crate::api::{NewSkill, Skill, SkillTrackerApi};
use crate::cli::args::{AddSkillArgs, OutputFormat, SkillCommands, UpdateSkillArgs};
use crate::error::AptivaraError;
use crate::output::{format_skill, format_skills, to_json};

/// Execute skill subcommands.
///
/// # Errors
///
/// Returns an error if input validation, the backend call, or output
/// formatting fails.
pub fn skill(
    api: &impl SkillTrackerApi,
    cmd: SkillCommands,
    format: OutputFormat,
) -> Result<String, AptivaraError> {
    match cmd {
        SkillCommands::List => format_skills(&api.skills()?, format),
        SkillCommands::Add(args) => add_skill(api, args, format),
        SkillCommands::Update { id, fields } => update_skill(api, id, fields, format),
        SkillCommands::Delete { id } => delete_skill(api, id, format),
    }
}

fn add_skill(
    api: &impl SkillTrackerApi,
    args: AddSkillArgs,
    format: OutputFormat,
) -> Result<String, AptivaraError> {
    let name = args.name.trim();
    if name.is_empty() {
        return Err(AptivaraError::InvalidInput("Skill name is required".to_string()));
    }

    let body = NewSkill {
        name: name.to_string(),
        description: args.description.filter(|d| !d.trim().is_empty()),
        category: args.category,
        priority: args.priority,
        target_hours: args.target_hours,
        goal_date: args.goal_date,
    };

    let created = api.create_skill(&body)?;
    match format {
        OutputFormat::Pretty => Ok(format!(
            "{} Added skill: {}",
            "✓".green(),
            format_skill(&created, format)?
        )),
        OutputFormat::Json => to_json(&created),
    }
}

fn update_skill(
    api: &impl SkillTrackerApi,
    id: i64,
    fields: UpdateSkillArgs,
    format: OutputFormat,
) -> Result<String, AptivaraError> {
    let current = find_skill(api, id)?;
    let body = merge_update(&current, fields)?;
    let updated = api.update_skill(id, &body)?;

    match format {
        OutputFormat::Pretty => Ok(format!(
            "{} Updated skill: {}",
            "✓".green(),
            format_skill(&updated, format)?
        )),
        OutputFormat::Json => to_json(&updated),
    }
}

fn delete_skill(
    api: &impl SkillTrackerApi,
    id: i64,
    format: OutputFormat,
) -> Result<String, AptivaraError> {
    api.delete_skill(id)?;
    match format {
        OutputFormat::Pretty => Ok(format!("{} Deleted skill #{id}", "✓".green())),
        OutputFormat::Json => to_json(&json!({ "deleted": id })),
    }
}

/// Look up a skill by ID in the user's skill list.
///
/// # Errors
///
/// Returns `AptivaraError::NotFound` if no skill has that ID.
pub fn find_skill(api: &impl SkillTrackerApi, id: i64) -> Result<Skill, AptivaraError> {
    api.skills()?
        .into_iter()
        .find(|s| s.id == id)
        .ok_or_else(|| AptivaraError::NotFound(format!("Skill #{id}")))
}

/// Overlay the given fields on an existing skill.
fn merge_update(current: &Skill, fields: UpdateSkillArgs) -> Result<NewSkill, AptivaraError> {
    let name = fields.name.unwrap_or_else(|| current.name.clone());
    if name.trim().is_empty() {
        return Err(AptivaraError::InvalidInput("Skill name is required".to_string()));
    }

    Ok(NewSkill {
        name: name.trim().to_string(),
        description: fields.description.or_else(|| current.description.clone()),
        category: fields.category.unwrap_or_else(|| current.category()),
        priority: fields.priority.or(current.priority),
        target_hours: fields.target_hours.or(current.target_hours),
        goal_date: fields
            .goal_date
            .or_else(|| current.goal_date.map(|d| d.date_naive())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Category, MockSkillTrackerApi};
    use chrono::NaiveDate;

    fn sample_skill(id: i64, name: &str, category: &str) -> Skill {
        Skill {
            id,
            name: name.to_string(),
            description: Some("old".to_string()),
            category: Some(category.to_string()),
            priority: Some(1),
            target_hours: None,
            total_hours_spent: None,
            goal_date: None,
            created_at: None,
        }
    }

    fn add_args(name: &str) -> AddSkillArgs {
        AddSkillArgs {
            name: name.to_string(),
            description: Some("  ".to_string()),
            category: Category::Music,
            priority: None,
            target_hours: Some(50.0),
            goal_date: NaiveDate::from_ymd_opt(2025, 12, 31),
        }
    }

    #[test]
    fn test_add_skill_sends_body() {
        let mut api = MockSkillTrackerApi::new();
        api.expect_create_skill()
            .withf(|body| {
                body.name == "Piano"
                    && body.category == Category::Music
                    && body.description.is_none()
                    && body.goal_date == NaiveDate::from_ymd_opt(2025, 12, 31)
            })
            .times(1)
            .returning(|body| Ok(sample_skill(7, &body.name, "music")));

        let output = skill_cmd(&api, SkillCommands::Add(add_args(" Piano ")));
        assert!(output.contains("\"id\": 7"));
    }

    #[test]
    fn test_add_blank_name_rejected() {
        let api = MockSkillTrackerApi::new();
        let err = skill(&api, SkillCommands::Add(add_args("   ")), OutputFormat::Pretty).unwrap_err();
        assert!(matches!(err, AptivaraError::InvalidInput(_)));
    }

    #[test]
    fn test_update_keeps_unset_fields() {
        let mut api = MockSkillTrackerApi::new();
        api.expect_skills()
            .returning(|| Ok(vec![sample_skill(1, "Rust", "programming"), sample_skill(2, "Piano", "music")]));
        api.expect_update_skill()
            .withf(|id, body| {
                *id == 2
                    && body.name == "Piano"
                    && body.description.as_deref() == Some("old")
                    && body.category == Category::Music
                    && body.priority == Some(5)
            })
            .times(1)
            .returning(|id, body| {
                let mut updated = sample_skill(id, &body.name, "music");
                updated.priority = body.priority;
                Ok(updated)
            });

        let fields = UpdateSkillArgs {
            name: None,
            description: None,
            category: None,
            priority: Some(5),
            target_hours: None,
            goal_date: None,
        };
        let output = skill_cmd(&api, SkillCommands::Update { id: 2, fields });
        assert!(output.contains("\"priority\": 5"));
    }

    #[test]
    fn test_update_missing_skill() {
        let mut api = MockSkillTrackerApi::new();
        api.expect_skills().returning(|| Ok(Vec::new()));

        let fields = UpdateSkillArgs {
            name: Some("New".to_string()),
            description: None,
            category: None,
            priority: None,
            target_hours: None,
            goal_date: None,
        };
        let err = skill(&api, SkillCommands::Update { id: 9, fields }, OutputFormat::Json).unwrap_err();
        assert!(matches!(err, AptivaraError::NotFound(_)));
    }

    #[test]
    fn test_delete_skill() {
        let mut api = MockSkillTrackerApi::new();
        api.expect_delete_skill().times(1).returning(|_| Ok(()));
        assert!(skill_cmd(&api, SkillCommands::Delete { id: 4 }).contains("\"deleted\": 4"));
    }

    fn skill_cmd(api: &MockSkillTrackerApi, cmd: SkillCommands) -> String {
        skill(api, cmd, OutputFormat::Json).unwrap()
    }
}
