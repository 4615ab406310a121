//! aptivara - A gamified skill tracker for the terminal
//!
//! This crate provides a command-line client and interactive dashboard for
//! an Aptivara skill-tracker backend, plus a local focus timer.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod output;
pub mod tui;

pub use api::{ApiClient, SkillTrackerApi};
pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::AptivaraError;
pub use features::focus::FocusTimer;
