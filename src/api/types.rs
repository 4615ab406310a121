use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AptivaraError;

/// Lowest XP reward the task form accepts.
pub const MIN_XP_REWARD: u32 = 5;
/// Highest XP reward the task form accepts.
pub const MAX_XP_REWARD: u32 = 100;
/// XP reward used when none is given.
pub const DEFAULT_XP_REWARD: u32 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Generic `{message: ...}` acknowledgement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// FastAPI error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// Human-readable detail. Validation errors arrive as a list of objects
    /// with a `msg` field; plain errors as a string.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|i| i.get("msg").and_then(serde_json::Value::as_str))
                    .collect();
                (!msgs.is_empty()).then(|| msgs.join("; "))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub total_skills: u32,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub pending_tasks: u32,
    pub overall_progress_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub xp_points: i64,
    pub level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub xp_progress_in_level: i64,
    pub xp_needed_for_next: i64,
    pub level_progress_percent: f64,
}

/// One heatmap cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    #[serde(default)]
    pub tasks_completed: u32,
    #[serde(default)]
    pub minutes_spent: u32,
    #[serde(default)]
    pub xp_earned: u32,
    /// Bucket in `0..=4`.
    #[serde(default)]
    pub intensity: u8,
}

impl DailyActivity {
    /// Intensity clamped to the heatmap scale.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.intensity.min(4)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakArea {
    pub skill_id: i64,
    pub skill_name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub progress_percent: f64,
    pub pending_tasks: u32,
    #[serde(default)]
    pub recommendation: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    pub level: u32,
    pub xp_points: i64,
    pub current_streak: u32,
    #[serde(default)]
    pub is_current_user: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillProgress {
    pub skill_id: i64,
    pub skill_name: String,
    pub progress_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub target_hours: Option<f64>,
    #[serde(default)]
    pub total_hours_spent: Option<f64>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub goal_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Skill {
    /// Parsed category, `Other` when missing or unknown.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
            .as_deref()
            .map_or(Category::Other, Category::parse)
    }
}

/// Body for creating or updating a skill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSkill {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_hours: Option<f64>,
    /// `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_date: Option<NaiveDate>,
}

impl NewSkill {
    /// A skill with just a name and category.
    #[must_use]
    pub fn named(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            description: None,
            category,
            priority: None,
            target_hours: None,
            goal_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub skill_id: i64,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub xp_reward: Option<u32>,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// XP the task pays out, falling back to the backend default.
    #[must_use]
    pub fn reward(&self) -> u32 {
        self.xp_reward.unwrap_or(DEFAULT_XP_REWARD)
    }
}

/// Body for creating a task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub xp_reward: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,
}

impl NewTask {
    /// Validate and build a task body.
    ///
    /// # Errors
    ///
    /// Returns `AptivaraError::InvalidInput` if the title is blank or the XP
    /// reward is outside `MIN_XP_REWARD..=MAX_XP_REWARD`.
    pub fn new(
        title: &str,
        xp_reward: u32,
        estimated_minutes: Option<u32>,
    ) -> Result<Self, AptivaraError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AptivaraError::InvalidInput("Task title is required".to_string()));
        }
        if !(MIN_XP_REWARD..=MAX_XP_REWARD).contains(&xp_reward) {
            return Err(AptivaraError::InvalidInput(format!(
                "XP reward must be between {MIN_XP_REWARD} and {MAX_XP_REWARD}, got {xp_reward}"
            )));
        }
        Ok(Self {
            title: title.to_string(),
            xp_reward,
            estimated_minutes,
        })
    }
}

/// Response to completing a task.
///
/// A task that was already completed only carries `message`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub xp_earned: Option<u32>,
    #[serde(default)]
    pub total_xp: Option<i64>,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub level_up: Option<bool>,
    #[serde(default)]
    pub current_streak: Option<u32>,
}

impl Completion {
    /// Whether XP was actually awarded by this call.
    #[must_use]
    pub const fn awarded(&self) -> bool {
        self.xp_earned.is_some()
    }

    /// The one-line notification shown after completing a task.
    #[must_use]
    pub fn summary(&self) -> String {
        match (self.level_up, self.level, self.xp_earned) {
            (Some(true), Some(level), _) => format!("🎉 LEVEL UP! You're now level {level}!"),
            (_, _, Some(xp)) => format!(
                "+{xp} XP earned! Streak: {} days 🔥",
                self.current_streak.unwrap_or(0)
            ),
            _ => self
                .message
                .clone()
                .unwrap_or_else(|| "Task completed".to_string()),
        }
    }
}

/// Skill category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Programming,
    Languages,
    Fitness,
    Music,
    Design,
    Business,
    Science,
    Personal,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Self; 9] = [
        Self::Programming,
        Self::Languages,
        Self::Fitness,
        Self::Music,
        Self::Design,
        Self::Business,
        Self::Science,
        Self::Personal,
        Self::Other,
    ];

    /// Parse a backend category string, `Other` when unknown.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .unwrap_or(Self::Other)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Programming => "programming",
            Self::Languages => "languages",
            Self::Fitness => "fitness",
            Self::Music => "music",
            Self::Design => "design",
            Self::Business => "business",
            Self::Science => "science",
            Self::Personal => "personal",
            Self::Other => "other",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Programming => "💻",
            Self::Languages => "🌍",
            Self::Fitness => "💪",
            Self::Music => "🎵",
            Self::Design => "🎨",
            Self::Business => "💼",
            Self::Science => "🔬",
            Self::Personal => "🧘",
            Self::Other => "📚",
        }
    }

    /// Icon and capitalized name, e.g. "💻 Programming".
    #[must_use]
    pub fn label(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        let capitalized = chars
            .next()
            .map(|first| first.to_uppercase().collect::<String>() + chars.as_str())
            .unwrap_or_default();
        format!("{} {capitalized}", self.icon())
    }

    /// The next category in display order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accept RFC 3339 timestamps, the naive ISO timestamps SQLite-backed servers
/// emit without an offset, and bare dates.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_deserialize_naive_timestamps() {
        let json = r#"{
            "id": 3,
            "name": "Rust",
            "description": null,
            "category": "programming",
            "priority": 1,
            "target_hours": 0,
            "total_hours_spent": 0,
            "goal_date": null,
            "created_at": "2025-01-05T10:20:30.123456"
        }"#;

        let skill: Skill = serde_json::from_str(json).unwrap();
        assert_eq!(skill.id, 3);
        assert_eq!(skill.category(), Category::Programming);
        assert!(skill.goal_date.is_none());
        assert_eq!(
            skill.created_at.unwrap().format("%Y-%m-%d %H:%M").to_string(),
            "2025-01-05 10:20"
        );
    }

    #[test]
    fn test_skill_goal_date_as_bare_date() {
        let json = r#"{"id": 2, "name": "Piano", "goal_date": "2025-12-31"}"#;
        let skill: Skill = serde_json::from_str(json).unwrap();
        assert_eq!(
            skill.goal_date.unwrap().format("%Y-%m-%d").to_string(),
            "2025-12-31"
        );
    }

    #[test]
    fn test_skill_unknown_category_is_other() {
        let json = r#"{"id": 1, "name": "Chess", "category": "games"}"#;
        let skill: Skill = serde_json::from_str(json).unwrap();
        assert_eq!(skill.category(), Category::Other);
    }

    #[test]
    fn test_task_default_reward() {
        let json = r#"{"id": 9, "title": "Read ch. 4", "skill_id": 3, "is_completed": false, "xp_reward": null}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.reward(), DEFAULT_XP_REWARD);
        assert!(!task.is_completed);
    }

    #[test]
    fn test_new_skill_serializes_goal_date() {
        let mut skill = NewSkill::named("Spanish", Category::Languages);
        skill.goal_date = NaiveDate::from_ymd_opt(2025, 6, 1);

        let value = serde_json::to_value(&skill).unwrap();
        assert_eq!(value["category"], "languages");
        assert_eq!(value["goal_date"], "2025-06-01");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_new_task_validation() {
        let task = NewTask::new("  Write tests ", 20, None).unwrap();
        assert_eq!(task.title, "Write tests");

        assert!(NewTask::new("   ", 20, None).is_err());
        assert!(NewTask::new("Too cheap", 4, None).is_err());
        assert!(NewTask::new("Too rich", 101, None).is_err());
        assert!(NewTask::new("Edge", MIN_XP_REWARD, Some(30)).is_ok());
        assert!(NewTask::new("Edge", MAX_XP_REWARD, None).is_ok());
    }

    #[test]
    fn test_completion_summary_level_up() {
        let completion: Completion = serde_json::from_str(
            r#"{"message": "Task completed!", "xp_earned": 20, "total_xp": 290, "level": 3, "level_up": true, "current_streak": 4}"#,
        )
        .unwrap();
        assert!(completion.awarded());
        assert_eq!(completion.summary(), "🎉 LEVEL UP! You're now level 3!");
    }

    #[test]
    fn test_completion_summary_xp() {
        let completion = Completion {
            xp_earned: Some(10),
            level_up: Some(false),
            level: Some(1),
            current_streak: Some(2),
            ..Completion::default()
        };
        assert_eq!(completion.summary(), "+10 XP earned! Streak: 2 days 🔥");
    }

    #[test]
    fn test_completion_already_completed() {
        let completion: Completion =
            serde_json::from_str(r#"{"message": "Task already completed"}"#).unwrap();
        assert!(!completion.awarded());
        assert_eq!(completion.summary(), "Task already completed");
    }

    #[test]
    fn test_error_body_string_and_list() {
        let plain: ErrorBody = serde_json::from_str(r#"{"detail": "Invalid credentials"}"#).unwrap();
        assert_eq!(plain.message().as_deref(), Some("Invalid credentials"));

        let validation: ErrorBody = serde_json::from_str(
            r#"{"detail": [{"loc": ["body", "email"], "msg": "value is not a valid email address"}]}"#,
        )
        .unwrap();
        assert_eq!(
            validation.message().as_deref(),
            Some("value is not a valid email address")
        );
    }

    #[test]
    fn test_category_parse_and_label() {
        assert_eq!(Category::parse("Fitness"), Category::Fitness);
        assert_eq!(Category::parse("unknown"), Category::Other);
        assert_eq!(Category::Music.label(), "🎵 Music");
        assert_eq!(Category::Other.next(), Category::Programming);
    }

    #[test]
    fn test_daily_activity_level_clamped() {
        let day: DailyActivity = serde_json::from_str(
            r#"{"date": "2025-03-01", "tasks_completed": 7, "minutes_spent": 210, "xp_earned": 70, "intensity": 7}"#,
        )
        .unwrap();
        assert_eq!(day.level(), 4);
    }
}
