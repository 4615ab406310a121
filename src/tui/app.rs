//! Application state for the TUI.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::api::{
    Category, DailyActivity, NewSkill, NewTask, Overview, Skill, SkillTrackerApi, Task, UserStats,
    WeakArea, DEFAULT_XP_REWARD,
};
use crate::config::Config;
use crate::error::AptivaraError;
use crate::features::focus::{FocusTimer, COMPLETE_MESSAGE};
use crate::tui::event::Action;

/// How long a notification stays on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Dashboard tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Skills,
    Focus,
    Analytics,
    Coach,
}

impl Tab {
    pub const ALL: [Self; 5] = [
        Self::Overview,
        Self::Skills,
        Self::Focus,
        Self::Analytics,
        Self::Coach,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Skills => "Skills",
            Self::Focus => "Focus",
            Self::Analytics => "Analytics",
            Self::Coach => "AI Coach",
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Tab for a `1`-`5` key press.
    #[must_use]
    pub fn from_digit(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Which list has the cursor on the Skills tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Skills,
    Tasks,
}

/// What the inline form is creating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Skill,
    Task,
}

/// The inline form on the Skills tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub kind: InputKind,
    pub buffer: String,
    /// Only used for skills; Tab cycles it.
    pub category: Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
}

/// A transient message that expires after [`NOTIFICATION_TTL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub kind: NotificationKind,
    expires_at: Instant,
}

impl Notification {
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Application state.
pub struct App<'a, A: SkillTrackerApi> {
    api: &'a A,
    /// Active tab.
    pub tab: Tab,
    pub overview: Option<Overview>,
    pub stats: Option<UserStats>,
    pub heatmap: Vec<DailyActivity>,
    pub weak_areas: Vec<WeakArea>,
    /// Fetched the first time the AI Coach tab is opened.
    pub recommendation: Option<String>,
    pub skills: Vec<Skill>,
    pub selected_skill: usize,
    /// Tasks of the selected skill.
    pub tasks: Vec<Task>,
    pub selected_task: usize,
    pub pane: Pane,
    pub timer: FocusTimer,
    pub presets: Vec<u32>,
    pub selected_preset: usize,
    pub input: Option<Input>,
    pub notification: Option<Notification>,
    /// Last failed action, shown in the status line until the next key.
    pub error: Option<String>,
    /// Help or hint text for the status line.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// First `d` pressed; a second one deletes the selected skill.
    pub pending_delete: bool,
    heatmap_days: u32,
    bell: bool,
    ring_bell: bool,
}

impl<'a, A: SkillTrackerApi> App<'a, A> {
    /// Create an app with nothing loaded yet.
    pub fn new(api: &'a A, config: &Config) -> Self {
        let presets = config.focus.usable_presets();
        let default_minutes = config.focus.default_minutes;
        let selected_preset = presets
            .iter()
            .position(|m| *m == default_minutes)
            .unwrap_or(0);

        Self {
            api,
            tab: Tab::Overview,
            overview: None,
            stats: None,
            heatmap: Vec::new(),
            weak_areas: Vec::new(),
            recommendation: None,
            skills: Vec::new(),
            selected_skill: 0,
            tasks: Vec::new(),
            selected_task: 0,
            pane: Pane::Skills,
            timer: FocusTimer::new(),
            presets,
            selected_preset,
            input: None,
            notification: None,
            error: None,
            status: Some("Press ? for help".to_string()),
            should_quit: false,
            pending_delete: false,
            heatmap_days: config.dashboard.heatmap_days.max(1),
            bell: config.focus.bell,
            ring_bell: false,
        }
    }

    /// Carry out an action from the event handler.
    ///
    /// # Errors
    ///
    /// Returns the error of the backend call or validation that failed. The
    /// caller shows it; the app stays usable.
    pub fn perform(&mut self, action: Action) -> Result<(), AptivaraError> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                Ok(())
            }
            Action::Refresh => self.refresh(),
            Action::SelectTab(tab) => self.select_tab(tab),
            Action::Up => self.select_previous(),
            Action::Down => self.select_next(),
            Action::BeginInput(kind) => self.begin_input(kind),
            Action::Submit => self.submit_input(),
            Action::CompleteTask => self.complete_selected_task(),
            Action::DeleteSkill => self.delete_selected_skill(),
            Action::StartFocus => self.start_selected_preset(),
            Action::StopFocus => {
                self.stop_focus();
                Ok(())
            }
        }
    }

    /// Reload the dashboard, the skill list and the selected skill's tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if any backend call fails.
    pub fn refresh(&mut self) -> Result<(), AptivaraError> {
        let api = self.api;
        self.overview = Some(api.overview()?);
        self.stats = Some(api.user_stats()?);
        self.heatmap = api.activity_heatmap(self.heatmap_days)?;
        self.weak_areas = api.weak_areas()?;
        self.reload_skills()?;

        if self.tab == Tab::Coach {
            self.load_recommendation()?;
        }

        debug!(skills = self.skills.len(), "dashboard refreshed");
        Ok(())
    }

    fn reload_skills(&mut self) -> Result<(), AptivaraError> {
        self.skills = self.api.skills()?;
        self.selected_skill = clamp_index(self.selected_skill, self.skills.len());
        self.load_tasks()
    }

    fn load_tasks(&mut self) -> Result<(), AptivaraError> {
        self.tasks = match self.selected_skill() {
            Some(skill) => self.api.tasks(skill.id)?,
            None => Vec::new(),
        };
        self.selected_task = clamp_index(self.selected_task, self.tasks.len());
        Ok(())
    }

    fn load_recommendation(&mut self) -> Result<(), AptivaraError> {
        self.recommendation = Some(self.api.ai_recommendation()?);
        Ok(())
    }

    /// Switch tabs, fetching the AI recommendation on first visit.
    ///
    /// # Errors
    ///
    /// Returns an error if the recommendation cannot be fetched.
    pub fn select_tab(&mut self, tab: Tab) -> Result<(), AptivaraError> {
        self.tab = tab;
        self.input = None;
        if tab == Tab::Coach && self.recommendation.is_none() {
            self.load_recommendation()?;
        }
        Ok(())
    }

    /// Get the currently selected skill.
    #[must_use]
    pub fn selected_skill(&self) -> Option<&Skill> {
        self.skills.get(self.selected_skill)
    }

    /// Get the currently selected task.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected_task)
    }

    /// Move selection up in the active pane.
    ///
    /// # Errors
    ///
    /// Returns an error if the newly selected skill's tasks cannot be loaded.
    pub fn select_previous(&mut self) -> Result<(), AptivaraError> {
        match self.pane {
            Pane::Skills if self.selected_skill > 0 => {
                self.selected_skill -= 1;
                self.selected_task = 0;
                self.load_tasks()
            }
            Pane::Tasks if self.selected_task > 0 => {
                self.selected_task -= 1;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Move selection down in the active pane.
    ///
    /// # Errors
    ///
    /// Returns an error if the newly selected skill's tasks cannot be loaded.
    pub fn select_next(&mut self) -> Result<(), AptivaraError> {
        match self.pane {
            Pane::Skills if self.selected_skill + 1 < self.skills.len() => {
                self.selected_skill += 1;
                self.selected_task = 0;
                self.load_tasks()
            }
            Pane::Tasks if self.selected_task + 1 < self.tasks.len() => {
                self.selected_task += 1;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Move the cursor between the skill and task lists.
    pub fn toggle_pane(&mut self) {
        self.pane = match self.pane {
            Pane::Skills => Pane::Tasks,
            Pane::Tasks => Pane::Skills,
        };
    }

    /// Open the inline form.
    ///
    /// # Errors
    ///
    /// Returns `AptivaraError::InvalidInput` when adding a task with no
    /// skill selected.
    pub fn begin_input(&mut self, kind: InputKind) -> Result<(), AptivaraError> {
        if kind == InputKind::Task && self.selected_skill().is_none() {
            return Err(AptivaraError::InvalidInput(
                "Add a skill before adding tasks".to_string(),
            ));
        }
        self.input = Some(Input {
            kind,
            buffer: String::new(),
            category: Category::Programming,
        });
        Ok(())
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(input) = self.input.as_mut() {
            input.buffer.push(c);
        }
    }

    pub fn input_backspace(&mut self) {
        if let Some(input) = self.input.as_mut() {
            input.buffer.pop();
        }
    }

    pub fn cycle_category(&mut self) {
        if let Some(input) = self.input.as_mut() {
            input.category = input.category.next();
        }
    }

    pub fn cancel_input(&mut self) {
        self.input = None;
    }

    /// Submit the inline form. The form stays open if validation or the
    /// request fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is invalid or the backend rejects it.
    pub fn submit_input(&mut self) -> Result<(), AptivaraError> {
        let Some(input) = self.input.clone() else {
            return Ok(());
        };

        match input.kind {
            InputKind::Skill => {
                let name = input.buffer.trim();
                if name.is_empty() {
                    return Err(AptivaraError::InvalidInput("Skill name is required".to_string()));
                }
                let created = self
                    .api
                    .create_skill(&NewSkill::named(name, input.category))?;
                self.input = None;
                self.notify(format!("Added skill: {}", created.name), NotificationKind::Success);

                self.reload_skills()?;
                if let Some(idx) = self.skills.iter().position(|s| s.id == created.id) {
                    self.selected_skill = idx;
                    self.load_tasks()?;
                }
            }
            InputKind::Task => {
                let skill_id = self
                    .selected_skill()
                    .map(|s| s.id)
                    .ok_or_else(|| AptivaraError::InvalidInput("No skill selected".to_string()))?;
                let body = NewTask::new(&input.buffer, DEFAULT_XP_REWARD, None)?;
                let created = self.api.create_task(skill_id, &body)?;
                self.input = None;
                self.notify(format!("Added task: {}", created.title), NotificationKind::Success);
                self.load_tasks()?;
            }
        }
        Ok(())
    }

    /// Complete the selected task and show the XP result.
    ///
    /// # Errors
    ///
    /// Returns an error if no open task is selected or the backend call fails.
    pub fn complete_selected_task(&mut self) -> Result<(), AptivaraError> {
        let (task_id, done) = self
            .selected_task()
            .map(|t| (t.id, t.is_completed))
            .ok_or_else(|| AptivaraError::InvalidInput("No task selected".to_string()))?;
        if done {
            self.notify("Task already completed", NotificationKind::Info);
            return Ok(());
        }

        let completion = self.api.complete_task(task_id)?;
        self.notify(completion.summary(), NotificationKind::Success);
        // XP, level and streak all moved.
        self.refresh()
    }

    /// Mark the selected skill for deletion; a second call deletes it.
    pub fn arm_delete(&mut self) {
        if let Some(skill) = self.selected_skill() {
            self.status = Some(format!("Press d again to delete \"{}\"", skill.name));
            self.pending_delete = true;
        }
    }

    /// Delete the selected skill and its tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if no skill is selected or the backend call fails.
    pub fn delete_selected_skill(&mut self) -> Result<(), AptivaraError> {
        self.pending_delete = false;
        let skill = self
            .selected_skill()
            .cloned()
            .ok_or_else(|| AptivaraError::InvalidInput("No skill selected".to_string()))?;

        self.api.delete_skill(skill.id)?;
        self.notify(format!("Deleted skill: {}", skill.name), NotificationKind::Info);
        self.refresh()
    }

    pub fn select_next_preset(&mut self) {
        if self.selected_preset + 1 < self.presets.len() {
            self.selected_preset += 1;
        }
    }

    pub fn select_previous_preset(&mut self) {
        self.selected_preset = self.selected_preset.saturating_sub(1);
    }

    /// Minutes of the highlighted preset.
    #[must_use]
    pub fn current_preset(&self) -> Option<u32> {
        self.presets.get(self.selected_preset).copied()
    }

    /// Start (or restart) a focus session with the highlighted preset.
    ///
    /// # Errors
    ///
    /// Returns an error if no usable preset is configured.
    pub fn start_selected_preset(&mut self) -> Result<(), AptivaraError> {
        let minutes = self
            .current_preset()
            .ok_or_else(|| AptivaraError::InvalidInput("No focus presets configured".to_string()))?;
        self.start_focus_at(minutes, Instant::now())
    }

    /// Start a focus session of `minutes` as of `now`.
    ///
    /// # Errors
    ///
    /// Returns `AptivaraError::InvalidInput` if `minutes` is zero.
    pub fn start_focus_at(&mut self, minutes: u32, now: Instant) -> Result<(), AptivaraError> {
        self.timer.start_at(minutes, now)?;
        self.status = Some(format!("Focus session started: {minutes} minutes"));
        Ok(())
    }

    pub fn stop_focus(&mut self) {
        if self.timer.is_active() {
            self.timer.stop();
            self.status = Some(format!("Focus stopped at {}", self.timer.format_remaining()));
        }
    }

    /// Advance the focus timer and expire old notifications.
    ///
    /// Called once per loop iteration whichever tab is shown.
    pub fn tick(&mut self, now: Instant) {
        if self.timer.poll(now) {
            self.notify_at(COMPLETE_MESSAGE, NotificationKind::Success, now);
            self.ring_bell = self.bell;
        }

        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now))
        {
            self.notification = None;
        }
    }

    /// Whether the terminal bell should ring, clearing the request.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.ring_bell)
    }

    /// How long the event loop may block before the next timer tick.
    #[must_use]
    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.timer.until_next_tick(now)
    }

    pub fn notify(&mut self, text: impl Into<String>, kind: NotificationKind) {
        self.notify_at(text, kind, Instant::now());
    }

    pub fn notify_at(&mut self, text: impl Into<String>, kind: NotificationKind, now: Instant) {
        self.notification = Some(Notification {
            text: text.into(),
            kind,
            expires_at: now + NOTIFICATION_TTL,
        });
    }

    /// Show a failed action in the status line.
    pub fn show_error(&mut self, err: &AptivaraError) {
        debug!(error = %err, "action failed");
        self.error = Some(err.to_string());
    }

    /// Reset transient status before handling a new key.
    pub fn cancel_pending(&mut self) {
        self.pending_delete = false;
        self.error = None;
        self.status = None;
    }
}

const fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if index >= len {
        len - 1
    } else {
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Completion, MockSkillTrackerApi};
    use mockall::predicate::eq;

    fn skill(id: i64, name: &str) -> Skill {
        Skill {
            id,
            name: name.to_string(),
            description: None,
            category: Some("programming".to_string()),
            priority: None,
            target_hours: None,
            total_hours_spent: None,
            goal_date: None,
            created_at: None,
        }
    }

    fn task(id: i64, title: &str, completed: bool) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: None,
            skill_id: 1,
            is_completed: completed,
            xp_reward: Some(10),
            estimated_minutes: None,
            created_at: None,
            completed_at: None,
        }
    }

    /// A mock serving an empty dashboard with the given skills.
    fn dashboard_mock(skills: Vec<Skill>) -> MockSkillTrackerApi {
        let mut api = MockSkillTrackerApi::new();
        api.expect_overview().returning(|| Ok(Overview::default()));
        api.expect_user_stats().returning(|| Ok(UserStats::default()));
        api.expect_activity_heatmap().returning(|_| Ok(Vec::new()));
        api.expect_weak_areas().returning(|| Ok(Vec::new()));
        api.expect_skills().returning(move || Ok(skills.clone()));
        api
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Overview.next(), Tab::Skills);
        assert_eq!(Tab::Coach.next(), Tab::Overview);
        assert_eq!(Tab::Overview.previous(), Tab::Coach);
        assert_eq!(Tab::from_digit('3'), Some(Tab::Focus));
        assert_eq!(Tab::from_digit('0'), None);
        assert_eq!(Tab::from_digit('6'), None);
    }

    #[test]
    fn test_refresh_loads_tasks_of_first_skill() {
        let mut api = dashboard_mock(vec![skill(1, "Rust"), skill(2, "Piano")]);
        api.expect_tasks()
            .with(eq(1))
            .returning(|_| Ok(vec![task(10, "Read", false)]));

        let config = Config::default();
        let mut app = App::new(&api, &config);
        app.refresh().unwrap();

        assert_eq!(app.skills.len(), 2);
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.selected_skill().unwrap().name, "Rust");
    }

    #[test]
    fn test_moving_skill_selection_loads_its_tasks() {
        let mut api = dashboard_mock(vec![skill(1, "Rust"), skill(2, "Piano")]);
        api.expect_tasks().with(eq(1)).returning(|_| Ok(Vec::new()));
        api.expect_tasks()
            .with(eq(2))
            .times(1)
            .returning(|_| Ok(vec![task(20, "Scales", false)]));

        let config = Config::default();
        let mut app = App::new(&api, &config);
        app.refresh().unwrap();
        app.select_next().unwrap();

        assert_eq!(app.selected_skill().unwrap().id, 2);
        assert_eq!(app.tasks[0].title, "Scales");

        // Already at the end.
        app.select_next().unwrap();
        assert_eq!(app.selected_skill, 1);
    }

    #[test]
    fn test_complete_task_notifies_level_up() {
        let mut api = dashboard_mock(vec![skill(1, "Rust")]);
        api.expect_tasks()
            .returning(|_| Ok(vec![task(10, "Read", false)]));
        api.expect_complete_task().with(eq(10)).times(1).returning(|_| {
            Ok(Completion {
                message: Some("Task completed!".to_string()),
                xp_earned: Some(10),
                total_xp: Some(100),
                level: Some(2),
                level_up: Some(true),
                current_streak: Some(1),
            })
        });

        let config = Config::default();
        let mut app = App::new(&api, &config);
        app.refresh().unwrap();
        app.pane = Pane::Tasks;
        app.perform(Action::CompleteTask).unwrap();

        let notification = app.notification.as_ref().unwrap();
        assert_eq!(notification.text, "🎉 LEVEL UP! You're now level 2!");
        assert_eq!(notification.kind, NotificationKind::Success);
    }

    #[test]
    fn test_complete_already_done_task_skips_request() {
        let mut api = dashboard_mock(vec![skill(1, "Rust")]);
        api.expect_tasks().returning(|_| Ok(vec![task(10, "Read", true)]));
        api.expect_complete_task().never();

        let config = Config::default();
        let mut app = App::new(&api, &config);
        app.refresh().unwrap();
        app.complete_selected_task().unwrap();
        assert_eq!(app.notification.unwrap().text, "Task already completed");
    }

    #[test]
    fn test_complete_without_task_is_an_error() {
        let api = MockSkillTrackerApi::new();
        let config = Config::default();
        let mut app = App::new(&api, &config);

        let err = app.perform(Action::CompleteTask).unwrap_err();
        app.show_error(&err);
        assert_eq!(app.error.as_deref(), Some("Invalid input: No task selected"));
    }

    #[test]
    fn test_add_skill_form() {
        let mut api = dashboard_mock(vec![skill(1, "Rust"), skill(5, "Go")]);
        api.expect_tasks().returning(|_| Ok(Vec::new()));
        api.expect_create_skill()
            .withf(|body| body.name == "Go" && body.category == Category::Languages)
            .times(1)
            .returning(|body| Ok(skill(5, &body.name)));

        let config = Config::default();
        let mut app = App::new(&api, &config);
        app.begin_input(InputKind::Skill).unwrap();
        for c in "Gox".chars() {
            app.input_char(c);
        }
        app.input_backspace();
        app.cycle_category();
        app.submit_input().unwrap();

        assert!(app.input.is_none());
        assert_eq!(app.selected_skill().unwrap().id, 5);
        assert_eq!(app.notification.unwrap().text, "Added skill: Go");
    }

    #[test]
    fn test_blank_skill_keeps_form_open() {
        let api = MockSkillTrackerApi::new();
        let config = Config::default();
        let mut app = App::new(&api, &config);
        app.begin_input(InputKind::Skill).unwrap();

        assert!(app.submit_input().is_err());
        assert!(app.input.is_some());
    }

    #[test]
    fn test_add_task_requires_skill() {
        let api = MockSkillTrackerApi::new();
        let config = Config::default();
        let mut app = App::new(&api, &config);
        assert!(matches!(
            app.begin_input(InputKind::Task),
            Err(AptivaraError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_delete_skill_refreshes() {
        let mut api = dashboard_mock(vec![skill(1, "Rust")]);
        api.expect_tasks().returning(|_| Ok(Vec::new()));
        api.expect_delete_skill().with(eq(1)).times(1).returning(|_| Ok(()));

        let config = Config::default();
        let mut app = App::new(&api, &config);
        app.refresh().unwrap();
        app.arm_delete();
        assert!(app.pending_delete);

        app.perform(Action::DeleteSkill).unwrap();
        assert!(!app.pending_delete);
        assert_eq!(app.notification.unwrap().text, "Deleted skill: Rust");
    }

    #[test]
    fn test_focus_completion_notifies_once_and_expires() {
        let api = MockSkillTrackerApi::new();
        let config = Config::default();
        let mut app = App::new(&api, &config);

        let t0 = Instant::now();
        app.start_focus_at(1, t0).unwrap();
        app.tick(t0 + Duration::from_secs(30));
        assert!(app.timer.is_active());
        assert!(app.notification.is_none());

        let done = t0 + Duration::from_secs(60);
        app.tick(done);
        assert!(!app.timer.is_active());
        assert_eq!(app.notification.as_ref().unwrap().text, COMPLETE_MESSAGE);
        assert!(app.take_bell());
        assert!(!app.take_bell());

        app.tick(done + Duration::from_secs(2));
        assert!(app.notification.is_some());
        app.tick(done + NOTIFICATION_TTL);
        assert!(app.notification.is_none());
    }

    #[test]
    fn test_preset_selection_and_restart() {
        let api = MockSkillTrackerApi::new();
        let config = Config::default();
        let mut app = App::new(&api, &config);
        assert_eq!(app.current_preset(), Some(25));

        app.perform(Action::StartFocus).unwrap();
        assert_eq!(app.timer.format_remaining(), "25:00");

        app.select_next_preset();
        app.perform(Action::StartFocus).unwrap();
        assert_eq!(app.timer.format_remaining(), "45:00");
        assert!(app.timer.has_ticker());

        app.select_next_preset();
        app.select_next_preset();
        assert_eq!(app.current_preset(), Some(60));

        app.perform(Action::StopFocus).unwrap();
        assert!(!app.timer.is_active());
        assert!(!app.timer.has_ticker());
        assert_eq!(app.timer.format_remaining(), "45:00");
    }

    #[test]
    fn test_coach_tab_fetches_once() {
        let mut api = MockSkillTrackerApi::new();
        api.expect_ai_recommendation()
            .times(1)
            .returning(|| Ok("Practice daily".to_string()));

        let config = Config::default();
        let mut app = App::new(&api, &config);
        app.select_tab(Tab::Coach).unwrap();
        app.select_tab(Tab::Overview).unwrap();
        app.select_tab(Tab::Coach).unwrap();
        assert_eq!(app.recommendation.as_deref(), Some("Practice daily"));
    }

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(0, 0), 0);
        assert_eq!(clamp_index(5, 3), 2);
        assert_eq!(clamp_index(1, 3), 1);
    }
}
