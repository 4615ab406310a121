//! Focus mode command implementation.
//!
//! Runs a countdown in place until it completes or the user presses 'q'.

use std::io::{self, IsTerminal, Write};
use std::time::Instant;

use colored::Colorize;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use serde::Serialize;
use tracing::debug;

use crate::cli::args::OutputFormat;
use crate::config::FocusConfig;
use crate::error::AptivaraError;
use crate::features::focus::{
    format_minutes, parse_minutes, render_progress_bar, FocusTimer, COMPLETE_MESSAGE, MAX_MINUTES,
    TICK_PERIOD,
};
use crate::output::to_json;

/// How a countdown ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusReport {
    /// Planned session length.
    pub minutes: u32,
    /// Whether the countdown reached 0:00.
    pub completed: bool,
    /// Time left when it ended, `MM:SS`.
    pub remaining: String,
}

/// Execute focus command
///
/// # Errors
///
/// Returns an error if the duration is invalid or the terminal cannot be
/// driven.
pub fn focus(
    config: &FocusConfig,
    duration: Option<&str>,
    format: OutputFormat,
) -> Result<String, AptivaraError> {
    let minutes = resolve_minutes(duration, config.default_minutes)?;

    if format == OutputFormat::Pretty {
        println!(
            "🎯 Focus session: {} {}",
            format_minutes(minutes).bold(),
            "(press q to stop)".dimmed()
        );
    }

    let report = run_countdown(minutes, format == OutputFormat::Pretty)?;

    match format {
        OutputFormat::Pretty if report.completed => {
            let bell = if config.bell { "\x07" } else { "" };
            Ok(format!("{bell}{}", COMPLETE_MESSAGE.green().bold()))
        }
        OutputFormat::Pretty => Ok(format!(
            "⏹  Focus session stopped with {} left",
            report.remaining.yellow()
        )),
        OutputFormat::Json => to_json(&report),
    }
}

/// Turn the optional duration argument into whole minutes.
///
/// # Errors
///
/// Returns `AptivaraError::InvalidInput` if the argument is not a duration
/// like `25`, `45m` or `1h30m` between one minute and a day.
pub fn resolve_minutes(duration: Option<&str>, default_minutes: u32) -> Result<u32, AptivaraError> {
    match duration {
        Some(raw) => parse_minutes(raw).ok_or_else(|| {
            AptivaraError::InvalidInput(format!(
                "Invalid duration '{raw}'. Use minutes (25) or a duration like 45m, 1h, 1h30m, up to 24h"
            ))
        }),
        None if (1..=MAX_MINUTES).contains(&default_minutes) => Ok(default_minutes),
        None => Err(AptivaraError::InvalidInput(format!(
            "focus.default_minutes must be between 1 and {MAX_MINUTES}"
        ))),
    }
}

/// Restores cooked mode when the countdown ends, however it ends.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self, AptivaraError> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn run_countdown(minutes: u32, draw: bool) -> Result<FocusReport, AptivaraError> {
    let mut timer = FocusTimer::new();
    timer.start(minutes)?;

    let interactive = io::stdin().is_terminal();
    let _guard = if interactive {
        Some(RawModeGuard::enable()?)
    } else {
        None
    };

    let mut stdout = io::stdout();
    let completed = loop {
        if draw {
            write!(
                stdout,
                "\r  {}  {}",
                timer.format_remaining().bold(),
                render_progress_bar(timer.progress(), 30)
            )?;
            stdout.flush()?;
        }

        let wait = timer.until_next_tick(Instant::now()).unwrap_or(TICK_PERIOD);
        if interactive {
            if event::poll(wait)? && is_stop_key(&event::read()?) {
                timer.stop();
                break false;
            }
        } else {
            std::thread::sleep(wait);
        }

        if timer.poll(Instant::now()) {
            break true;
        }
    };

    if draw {
        write!(stdout, "\r\n")?;
        stdout.flush()?;
    }
    debug!(minutes, completed, "focus countdown finished");

    Ok(FocusReport {
        minutes,
        completed,
        remaining: timer.format_remaining(),
    })
}

fn is_stop_key(event: &Event) -> bool {
    let Event::Key(key) = event else {
        return false;
    };
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn test_resolve_minutes() {
        assert_eq!(resolve_minutes(None, 25).unwrap(), 25);
        assert_eq!(resolve_minutes(Some("45"), 25).unwrap(), 45);
        assert_eq!(resolve_minutes(Some("1h"), 25).unwrap(), 60);
        assert_eq!(resolve_minutes(Some("1h30m"), 25).unwrap(), 90);
    }

    #[test]
    fn test_resolve_minutes_rejects_zero_and_garbage() {
        assert!(matches!(
            resolve_minutes(Some("0"), 25),
            Err(AptivaraError::InvalidInput(_))
        ));
        assert!(resolve_minutes(Some("soon"), 25).is_err());
        assert!(resolve_minutes(None, 0).is_err());
    }

    #[test]
    fn test_resolve_minutes_rejects_overlong() {
        assert!(matches!(
            resolve_minutes(Some("71582789"), 25),
            Err(AptivaraError::InvalidInput(_))
        ));
        assert!(resolve_minutes(Some("25h"), 25).is_err());
        assert!(resolve_minutes(None, MAX_MINUTES + 1).is_err());
        assert_eq!(resolve_minutes(Some("24h"), 25).unwrap(), MAX_MINUTES);
    }

    #[test]
    fn test_stop_keys() {
        let key = |code, modifiers| Event::Key(KeyEvent::new(code, modifiers));

        assert!(is_stop_key(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_stop_key(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_stop_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_stop_key(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_stop_key(&key(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
