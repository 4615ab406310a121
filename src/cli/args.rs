use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::api::{Category, DEFAULT_XP_REWARD};

#[derive(Parser)]
#[command(name = "aptivara")]
#[command(about = "Track skills, complete tasks, earn XP and run focus sessions from the terminal")]
#[command(long_about = "aptivara - A gamified skill tracker for the terminal

Talks to an Aptivara backend to manage skills and tasks. Completing tasks
earns XP, levels and streaks; the dashboard shows your progress, a
90-day activity heatmap and AI coaching.

QUICK START:
  aptivara register --name Ada --email ada@example.com
  aptivara login --email ada@example.com
  aptivara skill add \"Rust\" --category programming
  aptivara task add 1 \"Read the ownership chapter\" --xp 20
  aptivara focus 25m
  aptivara tui

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  aptivara <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output,
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Base URL of the backend
    ///
    /// Overrides `api.base_url` from the config file.
    #[arg(long, global = true, env = "APTIVARA_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    ///
    /// The password is read from APTIVARA_PASSWORD, or prompted for
    /// when --password is not given.
    ///
    /// # Examples
    ///
    ///   aptivara register --name Ada --email ada@example.com
    Register {
        /// Display name
        #[arg(long, short = 'n')]
        name: String,

        /// Email address used to log in
        #[arg(long, short = 'e')]
        email: String,

        /// Password (prefer the prompt or APTIVARA_PASSWORD)
        #[arg(long, env = "APTIVARA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Log in and save the session token
    ///
    /// The token is stored in ~/.aptivara/session.json and sent with
    /// every following command until 'aptivara logout'.
    ///
    /// # Examples
    ///
    ///   aptivara login --email ada@example.com
    ///   APTIVARA_PASSWORD=... aptivara login -e ada@example.com
    Login {
        /// Email address
        #[arg(long, short = 'e')]
        email: String,

        /// Password (prefer the prompt or APTIVARA_PASSWORD)
        #[arg(long, env = "APTIVARA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the saved session token
    Logout,

    /// Show the dashboard overview
    ///
    /// Level, XP progress, streaks and task counters.
    ///
    /// # Examples
    ///
    ///   aptivara overview
    ///   aptivara o -o json
    #[command(alias = "o")]
    Overview,

    /// Show level, XP and streaks
    Stats,

    /// Show the activity heatmap
    ///
    /// Rows are weekdays, columns are weeks. Darker cells mean more
    /// tasks completed that day.
    ///
    /// # Examples
    ///
    ///   aptivara heatmap
    ///   aptivara heatmap --days 30
    Heatmap {
        /// Days of history (defaults to dashboard.heatmap_days)
        #[arg(long, short = 'd')]
        days: Option<u32>,
    },

    /// List skills that need attention
    ///
    /// Skills with less than half of their tasks completed.
    #[command(name = "weak-areas")]
    WeakAreas,

    /// Ask the AI coach what to work on next
    #[command(alias = "coach")]
    Recommend,

    /// Show the XP leaderboard
    Leaderboard {
        /// Number of entries (defaults to dashboard.leaderboard_limit)
        #[arg(long, short = 'l')]
        limit: Option<u32>,
    },

    /// Show completion percentage per skill
    Progress,

    /// Manage skills
    ///
    /// # Examples
    ///
    ///   aptivara skill list
    ///   aptivara skill add "Piano" --category music --goal-date 2025-12-31
    ///   aptivara skill delete 4
    #[command(alias = "s")]
    Skill(SkillArgs),

    /// Manage tasks
    ///
    /// # Examples
    ///
    ///   aptivara task list 1
    ///   aptivara task add 1 "Scales for 20 minutes" --xp 15 --estimate 20
    ///   aptivara task complete 12
    #[command(alias = "t")]
    Task(TaskArgs),

    /// Run a focus session in the terminal
    ///
    /// Counts down in place. Press 'q' or Esc to stop early.
    /// Rings the terminal bell when the session completes unless
    /// focus.bell is false.
    ///
    /// # Examples
    ///
    ///   aptivara focus          25 minutes (focus.default_minutes)
    ///   aptivara focus 45
    ///   aptivara focus 1h
    ///   aptivara focus 1h30m
    #[command(alias = "f")]
    Focus {
        /// Session length: minutes, or a duration like 25m, 1h, 1h30m
        duration: Option<String>,
    },

    /// Open the interactive dashboard
    ///
    /// Tabs: Overview, Skills, Focus, Analytics, AI Coach.
    /// Press '?' inside for key bindings.
    Tui,

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   aptivara completions zsh > ~/.zsh/completions/_aptivara
    ///   source <(aptivara completions bash)
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct SkillArgs {
    #[command(subcommand)]
    pub command: SkillCommands,
}

/// Skill subcommands.
#[derive(Subcommand)]
pub enum SkillCommands {
    /// List all skills
    #[command(alias = "ls")]
    List,

    /// Add a skill
    Add(AddSkillArgs),

    /// Update a skill
    ///
    /// Fields that are not given keep their current value.
    Update {
        /// Skill ID
        id: i64,

        #[command(flatten)]
        fields: UpdateSkillArgs,
    },

    /// Delete a skill and its tasks
    #[command(alias = "rm")]
    Delete {
        /// Skill ID
        id: i64,
    },
}

#[derive(Args)]
pub struct AddSkillArgs {
    /// Skill name
    pub name: String,

    /// Short description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Category
    #[arg(long, short = 'c', value_enum, default_value = "other")]
    pub category: Category,

    /// Priority (higher is more important)
    #[arg(long, short = 'p')]
    pub priority: Option<i32>,

    /// Target practice hours
    #[arg(long)]
    pub target_hours: Option<f64>,

    /// Goal date (YYYY-MM-DD)
    #[arg(long)]
    pub goal_date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct UpdateSkillArgs {
    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// New category
    #[arg(long, short = 'c', value_enum)]
    pub category: Option<Category>,

    /// New priority
    #[arg(long, short = 'p')]
    pub priority: Option<i32>,

    /// New target hours
    #[arg(long)]
    pub target_hours: Option<f64>,

    /// New goal date (YYYY-MM-DD)
    #[arg(long)]
    pub goal_date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

/// Task subcommands.
#[derive(Subcommand)]
pub enum TaskCommands {
    /// List the tasks of a skill
    #[command(alias = "ls")]
    List {
        /// Skill ID
        skill_id: i64,
    },

    /// Add a task to a skill
    Add {
        /// Skill ID
        skill_id: i64,

        /// Task title
        title: String,

        /// XP reward (5-100)
        #[arg(long, short = 'x', default_value_t = DEFAULT_XP_REWARD)]
        xp: u32,

        /// Estimated minutes
        #[arg(long, short = 'e')]
        estimate: Option<u32>,
    },

    /// Complete a task and collect its XP
    #[command(alias = "done")]
    Complete {
        /// Task ID
        task_id: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_task_add_defaults() {
        let cli = Cli::try_parse_from(["aptivara", "task", "add", "3", "Read chapter 4"]).unwrap();
        match cli.command {
            Commands::Task(TaskArgs {
                command: TaskCommands::Add { skill_id, title, xp, estimate },
            }) => {
                assert_eq!(skill_id, 3);
                assert_eq!(title, "Read chapter 4");
                assert_eq!(xp, DEFAULT_XP_REWARD);
                assert!(estimate.is_none());
            }
            _ => panic!("expected task add"),
        }
    }

    #[test]
    fn test_parse_skill_add_with_goal_date() {
        let cli = Cli::try_parse_from([
            "aptivara", "skill", "add", "Piano", "--category", "music", "--goal-date", "2025-12-31",
        ])
        .unwrap();
        match cli.command {
            Commands::Skill(SkillArgs {
                command: SkillCommands::Add(args),
            }) => {
                assert_eq!(args.category, Category::Music);
                assert_eq!(args.goal_date, NaiveDate::from_ymd_opt(2025, 12, 31));
            }
            _ => panic!("expected skill add"),
        }
    }

    #[test]
    fn test_global_output_flag() {
        let cli = Cli::try_parse_from(["aptivara", "skill", "list", "-o", "json"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_focus_duration_optional() {
        let cli = Cli::try_parse_from(["aptivara", "focus"]).unwrap();
        assert!(matches!(cli.command, Commands::Focus { duration: None }));
    }

    #[test]
    fn test_bad_goal_date_rejected() {
        assert!(Cli::try_parse_from(["aptivara", "skill", "add", "X", "--goal-date", "soon"]).is_err());
    }
}
