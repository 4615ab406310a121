//! Event handling for the TUI.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::api::SkillTrackerApi;
use crate::error::AptivaraError;
use crate::tui::app::{App, InputKind, Pane, Tab};

/// Longest the loop blocks waiting for input.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Reload everything from the backend.
    Refresh,
    /// Switch to a tab.
    SelectTab(Tab),
    /// Move selection up.
    Up,
    /// Move selection down.
    Down,
    /// Open the add-skill or add-task form.
    BeginInput(InputKind),
    /// Submit the open form.
    Submit,
    /// Complete the selected task.
    CompleteTask,
    /// Delete the selected skill.
    DeleteSkill,
    /// Start the highlighted focus preset.
    StartFocus,
    /// Stop the running focus session.
    StopFocus,
}

const GLOBAL_HELP: &str = "Tab/1-5:switch tab | r:refresh | ?:help | q:quit";
const SKILLS_HELP: &str =
    "j/k:nav | h/l:skills/tasks | a:add skill | t:add task | c:complete | dd:delete | q:quit";
const FOCUS_HELP: &str = "←/→:preset | Enter:start | s:stop | Tab:switch tab | q:quit";
const INPUT_HELP: &str = "Enter:save | Esc:cancel | Tab:category";

/// Status-line hint for the current view.
pub fn help_text<A: SkillTrackerApi>(app: &App<'_, A>) -> &'static str {
    if app.input.is_some() {
        return INPUT_HELP;
    }
    match app.tab {
        Tab::Skills => SKILLS_HELP,
        Tab::Focus => FOCUS_HELP,
        _ => GLOBAL_HELP,
    }
}

/// Handle terminal events.
///
/// Waits at most until the next focus tick so the countdown redraws on time.
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events<A: SkillTrackerApi>(
    app: &mut App<'_, A>,
) -> Result<Option<Action>, AptivaraError> {
    let timeout = app
        .until_next_tick(Instant::now())
        .map_or(POLL_INTERVAL, |d| d.min(POLL_INTERVAL));

    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            return Ok(handle_key(app, key));
        }
    }

    Ok(None)
}

/// Map a key press to an action, applying purely local changes directly.
pub fn handle_key<A: SkillTrackerApi>(app: &mut App<'_, A>, key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if app.input.is_some() {
        app.error = None;
        return handle_input_key(app, key);
    }

    let delete_armed = app.pending_delete;
    app.cancel_pending();

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Tab => Some(Action::SelectTab(app.tab.next())),
        KeyCode::BackTab => Some(Action::SelectTab(app.tab.previous())),
        KeyCode::Char(c @ '1'..='5') => Tab::from_digit(c).map(Action::SelectTab),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('?') => {
            app.status = Some(help_text(app).to_string());
            None
        }
        _ => match app.tab {
            Tab::Skills => handle_skills_key(app, key, delete_armed),
            Tab::Focus => handle_focus_key(app, key),
            _ => None,
        },
    }
}

fn handle_input_key<A: SkillTrackerApi>(app: &mut App<'_, A>, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => return Some(Action::Submit),
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Tab => app.cycle_category(),
        KeyCode::Char(c) => app.input_char(c),
        _ => {}
    }
    None
}

fn handle_skills_key<A: SkillTrackerApi>(
    app: &mut App<'_, A>,
    key: KeyEvent,
    delete_armed: bool,
) -> Option<Action> {
    match key.code {
        // Navigation - vim style
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('h') | KeyCode::Left if app.pane == Pane::Tasks => {
            app.toggle_pane();
            None
        }
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter if app.pane == Pane::Skills => {
            app.toggle_pane();
            None
        }

        // Actions
        KeyCode::Char('a') => Some(Action::BeginInput(InputKind::Skill)),
        KeyCode::Char('t') => Some(Action::BeginInput(InputKind::Task)),
        KeyCode::Char('c') => Some(Action::CompleteTask),
        KeyCode::Char('d') if delete_armed => Some(Action::DeleteSkill),
        KeyCode::Char('d') => {
            app.arm_delete();
            None
        }
        _ => None,
    }
}

fn handle_focus_key<A: SkillTrackerApi>(app: &mut App<'_, A>, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => {
            app.select_previous_preset();
            None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.select_next_preset();
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::StartFocus),
        KeyCode::Char('s') => Some(Action::StopFocus),
        _ => None,
    }
}
