//! Focus countdown timer.
//!
//! Counts down whole minutes one second at a time. The timer is either
//! active, with exactly one [`Ticker`] driving it, or inactive with none.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::AptivaraError;
use crate::features::focus::ticker::{Ticker, TICK_PERIOD};

/// Session lengths offered by the focus views.
pub const PRESETS: [u32; 3] = [25, 45, 60];

/// Longest session accepted: one day.
pub const MAX_MINUTES: u32 = 24 * 60;

/// Notification shown when a session runs to zero.
pub const COMPLETE_MESSAGE: &str = "🎉 Focus session complete! Great work!";

/// Snapshot of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TimerState {
    /// Whole minutes left.
    pub remaining_minutes: u32,
    /// Seconds left within the current minute, always in `0..=59`.
    pub remaining_seconds: u32,
    /// Whether a tick process is running.
    pub is_active: bool,
}

impl TimerState {
    /// Total seconds left.
    #[must_use]
    pub const fn total_seconds(&self) -> u32 {
        self.remaining_minutes * 60 + self.remaining_seconds
    }

    const fn is_zero(&self) -> bool {
        self.remaining_minutes == 0 && self.remaining_seconds == 0
    }
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer is not active; nothing changed.
    Idle,
    /// Time was decremented and the countdown continues.
    Running,
    /// The countdown reached zero on this tick. Reported once per session.
    Completed,
}

/// The focus countdown.
#[derive(Debug, Default)]
pub struct FocusTimer {
    state: TimerState,
    planned_minutes: u32,
    ticker: Option<Ticker>,
}

impl FocusTimer {
    /// Create an idle timer showing `00:00`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session of `minutes`, replacing any session in progress.
    ///
    /// # Errors
    ///
    /// Returns `AptivaraError::InvalidInput` if `minutes` is zero or above
    /// [`MAX_MINUTES`].
    pub fn start(&mut self, minutes: u32) -> Result<(), AptivaraError> {
        self.start_at(minutes, Instant::now())
    }

    /// Start a session anchored at `now`.
    ///
    /// # Errors
    ///
    /// Returns `AptivaraError::InvalidInput` if `minutes` is zero or above
    /// [`MAX_MINUTES`].
    pub fn start_at(&mut self, minutes: u32, now: Instant) -> Result<(), AptivaraError> {
        if minutes == 0 {
            return Err(AptivaraError::InvalidInput(
                "Focus duration must be at least one minute".to_string(),
            ));
        }
        if minutes > MAX_MINUTES {
            return Err(AptivaraError::InvalidInput(format!(
                "Focus duration must be at most {MAX_MINUTES} minutes, got {minutes}"
            )));
        }

        self.release_ticker("replaced");

        self.state = TimerState {
            remaining_minutes: minutes,
            remaining_seconds: 0,
            is_active: true,
        };
        self.planned_minutes = minutes;
        self.ticker = Some(Ticker::new(TICK_PERIOD, now));
        info!(minutes, "focus session started");
        Ok(())
    }

    /// Halt the countdown, keeping the remaining time as-is.
    pub fn stop(&mut self) {
        self.release_ticker("stopped");
        self.state.is_active = false;
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_active {
            return TickOutcome::Idle;
        }

        let state = &mut self.state;
        if state.remaining_seconds > 0 {
            state.remaining_seconds -= 1;
        } else if state.remaining_minutes > 0 {
            state.remaining_minutes -= 1;
            state.remaining_seconds = 59;
        }

        if self.state.is_zero() {
            self.release_ticker("completed");
            self.state.is_active = false;
            info!(minutes = self.planned_minutes, "focus session complete");
            TickOutcome::Completed
        } else {
            TickOutcome::Running
        }
    }

    /// Fire every tick that has come due by `now`.
    ///
    /// Returns `true` if the session completed during this poll.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match self.ticker.as_mut() {
            Some(ticker) => ticker.due(now),
            None => return false,
        };

        for _ in 0..due {
            match self.tick() {
                TickOutcome::Completed => return true,
                TickOutcome::Idle => return false,
                TickOutcome::Running => {}
            }
        }
        false
    }

    /// Current snapshot.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    /// Whether the countdown is running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.state.is_active
    }

    /// Whether a tick process is scheduled.
    #[must_use]
    pub const fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }

    /// Length of the last started session in minutes.
    #[must_use]
    pub const fn planned_minutes(&self) -> u32 {
        self.planned_minutes
    }

    /// Time left until the next tick, if one is scheduled.
    #[must_use]
    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.as_ref().map(|t| t.until_next(now))
    }

    /// Remaining time as a `Duration`.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        Duration::from_secs(u64::from(self.state.total_seconds()))
    }

    /// Fraction of the session elapsed, between 0.0 and 1.0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.planned_minutes == 0 {
            return 0.0;
        }
        let total = f64::from(self.planned_minutes) * 60.0;
        1.0 - f64::from(self.state.total_seconds()) / total
    }

    /// Remaining time as `MM:SS`.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.state.remaining_minutes, self.state.remaining_seconds
        )
    }

    /// Cancel the tick process, if any. Returns whether one was running.
    fn release_ticker(&mut self, reason: &str) -> bool {
        let released = self.ticker.take().is_some();
        if released {
            debug!(reason, remaining = %self.format_remaining(), "focus ticker cancelled");
        }
        released
    }
}

impl Drop for FocusTimer {
    fn drop(&mut self) {
        self.release_ticker("torn down");
    }
}

/// Format a number of minutes as a human-readable string.
#[must_use]
pub fn format_minutes(total_minutes: u32) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    let plural = |n: u32| if n == 1 { "" } else { "s" };

    match (hours, minutes) {
        (0, m) => format!("{m} minute{}", plural(m)),
        (h, 0) => format!("{h} hour{}", plural(h)),
        (h, m) => format!("{h} hour{}, {m} minute{}", plural(h), plural(m)),
    }
}

/// Parse a session length like "25", "45m", "1h" or "1h30m" into minutes.
///
/// Zero and anything longer than [`MAX_MINUTES`] are rejected.
#[must_use]
pub fn parse_minutes(s: &str) -> Option<u32> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<u32>() {
        return (1..=MAX_MINUTES).contains(&minutes).then_some(minutes);
    }

    let mut total: u32 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else {
            let num: u32 = current_num.parse().ok()?;
            current_num.clear();

            match c {
                'h' => total = total.checked_add(num.checked_mul(60)?)?,
                'm' => total = total.checked_add(num)?,
                _ => return None,
            }
        }
    }

    if !current_num.is_empty() {
        total = total.checked_add(current_num.parse().ok()?)?;
    }

    (1..=MAX_MINUTES).contains(&total).then_some(total)
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0)) * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
