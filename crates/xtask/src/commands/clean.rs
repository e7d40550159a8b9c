//! Clean recorded action logs
//!
//! Deletes `*.log` files from the log directory, or a single named log.
//!
//! Safety: Always prompts for confirmation before deletion.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::dirs;

/// Delete recorded action logs
#[derive(Parser, Debug)]
pub struct Clean {
    /// Specific log to delete (path or name inside the log directory)
    #[arg(value_name = "LOG")]
    pub log: Option<PathBuf>,

    /// Custom log directory (defaults to TACTICS_LOG_DIR or the platform data dir)
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Skip confirmation prompt (dangerous!)
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl Clean {
    pub fn execute(self) -> Result<()> {
        let log_dir = self.log_dir.unwrap_or_else(dirs::log_dir);

        let targets = match &self.log {
            Some(log) => vec![dirs::resolve_log(&log_dir, Some(log))?],
            None => dirs::list_logs(&log_dir)?,
        };

        if targets.is_empty() {
            println!(
                "{}",
                style(format!("Nothing to clean - no logs in {}", log_dir.display())).dim()
            );
            return Ok(());
        }

        // Display what will be cleaned
        println!("{}", style("Clean action logs").yellow().bold());
        println!();
        println!("The following will be deleted:");
        for path in &targets {
            println!("  {} {}", style("→").cyan(), style(path.display()).dim());
        }
        println!();

        // Confirm deletion
        if !self.yes && !confirm()? {
            println!("{}", style("Cancelled").dim());
            return Ok(());
        }

        for path in targets {
            print!("Deleting {}... ", path.display());
            io::stdout().flush()?;

            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to delete: {}", path.display()))?;

            println!("{}", style("✓").green());
        }

        println!();
        println!("{}", style("✓ Cleanup complete!").green().bold());

        Ok(())
    }
}

/// Prompt user for confirmation
fn confirm() -> Result<bool> {
    print!("{} ", style("Proceed? [y/N]").yellow().bold());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}
