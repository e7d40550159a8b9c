//! Read and inspect action log files from the persistence layer
//!
//! Deserializes action log files and displays their contents.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::collections::BTreeMap;
use std::path::PathBuf;

use tactics_runtime::{ActionLogEntry, read_log_file};

use crate::dirs;

/// Read and inspect action log files
#[derive(Parser)]
pub struct ReadActions {
    /// Log file path or name inside the log directory (defaults to the newest log)
    #[arg(value_name = "LOG")]
    log: Option<PathBuf>,

    /// Custom log directory (defaults to TACTICS_LOG_DIR or the platform data dir)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,

    /// Limit number of records to display (0 = unlimited)
    #[arg(short, long, default_value = "100")]
    limit: usize,

    /// Skip first N records
    #[arg(long, default_value = "0")]
    skip: usize,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Summary view (actions, actors and counts)
    Summary,
    /// List all records
    List,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl ReadActions {
    pub fn execute(self) -> Result<()> {
        let log_dir = match self.data_dir {
            Some(dir) => dir,
            None => dirs::log_dir(),
        };
        let path = dirs::resolve_log(&log_dir, self.log.as_deref())?;

        let entries: Vec<ActionLogEntry> = read_log_file(&path)
            .with_context(|| format!("Failed to read action log: {}", path.display()))?;

        // Print header (not for JSON, which should stay machine-readable)
        if !matches!(self.format, OutputFormat::Json) {
            println!("{} {}", style("Log:").bold().cyan(), path.display());
            println!(
                "{} {}",
                style("Total Records:").bold().cyan(),
                entries.len()
            );
            println!();
        }

        // Apply skip/limit
        let entries: Vec<_> = entries
            .into_iter()
            .skip(self.skip)
            .take(if self.limit == 0 {
                usize::MAX
            } else {
                self.limit
            })
            .collect();

        match self.format {
            OutputFormat::Summary => print_summary(&entries),
            OutputFormat::List => print_list(&entries),
            OutputFormat::Json => print_json(&entries)?,
            OutputFormat::Debug => print_debug(&entries),
        }

        Ok(())
    }
}

fn print_summary(entries: &[ActionLogEntry]) {
    println!("{}", style("=== Record Summary ===").bold().green());
    println!();

    let mut by_action = BTreeMap::new();
    let mut by_actor = BTreeMap::new();
    for entry in entries {
        *by_action.entry(entry.record.action.to_string()).or_insert(0) += 1;
        *by_actor.entry(entry.record.actor).or_insert(0) += 1;
    }

    // Sort by count (descending)
    let mut by_action: Vec<_> = by_action.into_iter().collect();
    by_action.sort_by(|a, b| b.1.cmp(&a.1));

    println!("{}", style("Action Distribution:").bold().yellow());
    for (action, count) in by_action {
        println!("  {}: {}", action, count);
    }
    println!();

    println!("{}", style("Records per Actor:").bold().yellow());
    for (actor, count) in by_actor {
        println!("  entity {}: {}", actor, count);
    }
    println!();

    if let (Some(first), Some(last)) = (entries.first(), entries.last()) {
        println!("{}", style("Range:").bold().yellow());
        println!("  Nonce: {} ..= {}", first.nonce, last.nonce);
        println!("  Tick:  {} ..= {}", first.tick, last.tick);
        println!();
    }
}

fn print_list(entries: &[ActionLogEntry]) {
    println!("{}", style("=== Record List ===").bold().green());
    println!();

    for entry in entries {
        println!(
            "{} {} {} {}: {}",
            style("Nonce").bold(),
            entry.nonce,
            style("tick").dim(),
            entry.tick,
            entry.record
        );
    }
}

fn print_json(entries: &[ActionLogEntry]) -> Result<()> {
    let json =
        serde_json::to_string_pretty(entries).context("Failed to serialize records to JSON")?;
    println!("{}", json);
    Ok(())
}

fn print_debug(entries: &[ActionLogEntry]) {
    for entry in entries {
        println!("{:#?}", entry);
    }
}
