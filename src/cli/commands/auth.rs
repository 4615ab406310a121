//! Account commands: register, login, logout.

use std::io::{self, BufRead, IsTerminal, Write};

use colored::Colorize;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use serde_json::json;
use tracing::info;

use crate::api::SkillTrackerApi;
use crate::cli::args::OutputFormat;
use crate::config::{Session, SessionStore};
use crate::error::AptivaraError;
use crate::output::to_json;

/// Execute register command
///
/// # Errors
///
/// Returns an error if input is missing or the backend rejects the account.
pub fn register(
    api: &impl SkillTrackerApi,
    name: &str,
    email: &str,
    password: Option<String>,
    format: OutputFormat,
) -> Result<String, AptivaraError> {
    let name = require("Name", name)?;
    let email = require("Email", email)?;
    let password = password_or_prompt(password)?;

    api.register(name, email, &password)?;
    info!(email, "account registered");

    match format {
        OutputFormat::Pretty => Ok(format!(
            "{} Registered {}. Now run {}",
            "✓".green(),
            email.bold(),
            format!("aptivara login --email {email}").cyan()
        )),
        OutputFormat::Json => to_json(&json!({ "registered": true, "email": email })),
    }
}

/// Execute login command, saving the token on success
///
/// # Errors
///
/// Returns an error if the credentials are rejected or the session cannot be saved.
pub fn login(
    api: &impl SkillTrackerApi,
    sessions: &SessionStore,
    api_url: &str,
    email: &str,
    password: Option<String>,
    format: OutputFormat,
) -> Result<String, AptivaraError> {
    let email = require("Email", email)?;
    let password = password_or_prompt(password)?;

    let token = api.login(email, &password)?;
    sessions.save(&Session::new(
        token,
        Some(email.to_string()),
        Some(api_url.to_string()),
    ))?;
    info!(email, "logged in");

    match format {
        OutputFormat::Pretty => Ok(format!("{} Logged in as {}", "✓".green(), email.bold())),
        OutputFormat::Json => to_json(&json!({ "logged_in": true, "email": email })),
    }
}

/// Execute logout command
///
/// # Errors
///
/// Returns an error if the session file cannot be removed.
pub fn logout(sessions: &SessionStore, format: OutputFormat) -> Result<String, AptivaraError> {
    let removed = sessions.clear()?;

    match format {
        OutputFormat::Pretty if removed => Ok(format!("{} Logged out", "✓".green())),
        OutputFormat::Pretty => Ok("Not logged in".dimmed().to_string()),
        OutputFormat::Json => to_json(&json!({ "logged_out": removed })),
    }
}

fn require<'a>(field: &str, value: &'a str) -> Result<&'a str, AptivaraError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AptivaraError::InvalidInput(format!("{field} is required")));
    }
    Ok(value)
}

fn password_or_prompt(password: Option<String>) -> Result<String, AptivaraError> {
    let password = match password {
        Some(p) => p,
        None => prompt_password("Password: ")?,
    };
    if password.is_empty() {
        return Err(AptivaraError::InvalidInput("Password is required".to_string()));
    }
    Ok(password)
}

/// Read a password without echoing it. Falls back to a plain line read
/// when stdin is not a terminal.
fn prompt_password(prompt: &str) -> Result<String, AptivaraError> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        let mut line = String::new();
        stdin.lock().read_line(&mut line)?;
        return Ok(line.trim_end_matches(['\r', '\n']).to_string());
    }

    eprint!("{prompt}");
    io::stderr().flush()?;

    terminal::enable_raw_mode()?;
    let result = read_hidden_line();
    terminal::disable_raw_mode()?;
    eprintln!();

    result
}

fn read_hidden_line() -> Result<String, AptivaraError> {
    let mut buffer = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Enter => return Ok(buffer),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Esc => return Err(AptivaraError::InvalidInput("Cancelled".to_string())),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(AptivaraError::InvalidInput("Cancelled".to_string()));
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => {}
        }
    }
}
