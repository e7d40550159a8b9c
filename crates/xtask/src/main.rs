//! Development tasks for the tactics workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod content;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{Clean, ReadActions, Replay, Simulate};

/// Development tasks for the tactics workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for tactics", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play a scenario with AI turns and record the action log
    Simulate(Simulate),

    /// Replay an action log and print the resulting world
    Replay(Replay),

    /// Read and inspect action log files
    ReadActions(ReadActions),

    /// Delete recorded action logs
    Clean(Clean),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for TACTICS_LOG_DIR and other env vars)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::Replay(cmd) => cmd.execute(),
        Command::ReadActions(cmd) => cmd.execute(),
        Command::Clean(cmd) => cmd.execute(),
    }
}
