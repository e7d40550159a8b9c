//! Replay an action log against its scenario
//!
//! Rebuilds the starting world from content, re-runs every logged record and
//! prints the resulting world.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use tactics_runtime::{ActionLogEntry, RuntimeConfig, read_log_file, replay_log};

use crate::content::ContentArgs;
use crate::dirs;

/// Replay an action log and print the resulting world
#[derive(Parser, Debug)]
pub struct Replay {
    /// Log file path or name inside the log directory (defaults to the newest log)
    #[arg(value_name = "LOG")]
    log: Option<PathBuf>,

    #[command(flatten)]
    content: ContentArgs,

    /// Custom log directory (defaults to TACTICS_LOG_DIR or the platform data dir)
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Print every replayed event
    #[arg(short, long)]
    verbose: bool,
}

impl Replay {
    pub fn execute(self) -> Result<()> {
        let config = RuntimeConfig::from_env();
        let log_dir = self.log_dir.unwrap_or_else(|| config.log_dir.clone());
        let path = dirs::resolve_log(&log_dir, self.log.as_deref())?;

        let entries: Vec<ActionLogEntry> = read_log_file(&path)
            .with_context(|| format!("Failed to read action log: {}", path.display()))?;

        let content = self.content.load(&config)?;
        let (world, loadouts) = content.start()?;

        println!("{} {}", style("Log:").bold().cyan(), path.display());
        println!("{} {}", style("Seed:").bold().cyan(), content.seed);
        println!("{} {}", style("Records:").bold().cyan(), entries.len());
        println!();

        let replayed = replay_log(world, content.registry()?, &loadouts, entries, &config)
            .context("Replay failed; was the log recorded with different content?")?;

        if self.verbose {
            for event in &replayed.events {
                super::print_event(event);
            }
            println!();
        }

        super::print_world(&replayed.world);
        Ok(())
    }
}
