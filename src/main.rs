use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use aptivara::cli::args::{Cli, Commands};
use aptivara::cli::{commands, Context};

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Log to stderr, `warn` and above unless `RUST_LOG` says otherwise.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = Context::load(&cli)?;
    let format = ctx.format;

    let output = match cli.command {
        Commands::Register {
            name,
            email,
            password,
        } => commands::register(&ctx.anonymous_client()?, &name, &email, password, format)?,
        Commands::Login { email, password } => commands::login(
            &ctx.anonymous_client()?,
            &ctx.sessions,
            &ctx.api_url,
            &email,
            password,
            format,
        )?,
        Commands::Logout => commands::logout(&ctx.sessions, format)?,
        Commands::Overview => commands::overview(&ctx.client()?, format)?,
        Commands::Stats => commands::stats(&ctx.client()?, format)?,
        Commands::Heatmap { days } => {
            let days = days.unwrap_or(ctx.config.dashboard.heatmap_days);
            commands::heatmap(&ctx.client()?, days, format)?
        }
        Commands::WeakAreas => commands::weak_areas(&ctx.client()?, format)?,
        Commands::Recommend => commands::recommend(&ctx.client()?, format)?,
        Commands::Leaderboard { limit } => {
            let limit = limit.unwrap_or(ctx.config.dashboard.leaderboard_limit);
            commands::leaderboard(&ctx.client()?, limit, format)?
        }
        Commands::Progress => commands::progress(&ctx.client()?, format)?,
        Commands::Skill(args) => commands::skill(&ctx.client()?, args.command, format)?,
        Commands::Task(args) => commands::task(&ctx.client()?, args.command, format)?,
        Commands::Focus { duration } => {
            commands::focus(&ctx.config.focus, duration.as_deref(), format)?
        }
        Commands::Tui => {
            aptivara::tui::run(&ctx.client()?, &ctx.config)?;
            String::new()
        }
        Commands::Completions { shell } => commands::completions(shell),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
