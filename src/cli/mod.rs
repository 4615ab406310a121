//! Command-line interface.

pub mod args;
pub mod commands;
mod context;

pub use context::Context;
