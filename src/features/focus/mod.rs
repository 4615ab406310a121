//! Focus mode.
//!
//! A countdown of 25, 45 or 60 minutes (or any whole number of minutes)
//! driven by a one-second [`Ticker`]. Nothing is persisted; a session lives
//! only as long as the view that owns it.

pub mod ticker;
pub mod timer;

pub use ticker::{Ticker, TICK_PERIOD};
pub use timer::{
    format_minutes, parse_minutes, render_progress_bar, FocusTimer, TickOutcome, TimerState,
    COMPLETE_MESSAGE, MAX_MINUTES, PRESETS,
};
