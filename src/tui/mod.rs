//! Terminal User Interface (TUI) for aptivara.
//!
//! An interactive dashboard over the skill-tracker backend with a focus
//! timer. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, InputKind, Notification, NotificationKind, Pane, Tab, NOTIFICATION_TTL};
pub use event::Action;

use std::io::{self, Write};
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;

use crate::api::{ApiClient, SkillTrackerApi};
use crate::config::Config;
use crate::error::AptivaraError;

/// Run the TUI application.
///
/// The dashboard is loaded before the terminal is taken over, so a missing
/// or expired session fails with a normal error message.
///
/// # Errors
///
/// Returns an error if the user is not logged in, the initial load fails,
/// or the terminal cannot be set up.
pub fn run(client: &ApiClient, config: &Config) -> Result<(), AptivaraError> {
    if !client.has_token() {
        return Err(AptivaraError::NotLoggedIn);
    }

    let mut app = App::new(client, config);
    app.refresh()?;

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| AptivaraError::Config(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| AptivaraError::Config(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AptivaraError::Config(format!("Failed to create terminal: {e}")))?;

    info!("dashboard opened");
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B, A>(terminal: &mut Terminal<B>, app: &mut App<'_, A>) -> Result<(), AptivaraError>
where
    B: Backend + Write,
    A: SkillTrackerApi,
{
    while !app.should_quit {
        app.tick(Instant::now());
        if app.take_bell() {
            let backend = terminal.backend_mut();
            backend.write_all(b"\x07")?;
            Write::flush(backend)?;
        }

        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| AptivaraError::Config(format!("Failed to draw: {e}")))?;

        // Handle events
        if let Some(action) = event::handle_events(app)? {
            if let Err(e) = app.perform(action) {
                app.show_error(&e);
            }
        }
    }

    Ok(())
}
