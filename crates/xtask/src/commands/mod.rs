//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod clean;
mod read_actions;
mod replay;
mod simulate;

pub use clean::Clean;
pub use read_actions::ReadActions;
pub use replay::Replay;
pub use simulate::Simulate;

use console::style;
use tactics_core::{EntityState, WorldState};
use tactics_runtime::SessionEvent;

/// Print one line per entity with its position and combat stats
pub(crate) fn print_world(world: &WorldState) {
    println!("{}", style("=== World ===").bold().green());
    println!(
        "{} {}   {} {}",
        style("Seed:").bold().cyan(),
        world.seed,
        style("Attacks resolved:").bold().cyan(),
        world.attack_nonce()
    );
    println!();

    for entity in world.iter() {
        println!("  {}", describe(entity));
    }
}

fn describe(entity: &EntityState) -> String {
    let label = format!("#{} {}", entity.id, entity.name);
    let Some(stats) = &entity.stats else {
        return format!(
            "{} {} at {}",
            style(label).dim(),
            style("(scenery)").dim(),
            entity.position
        );
    };

    let alive = stats.hp.current > 0;
    let label = if alive {
        style(label).bold()
    } else {
        style(label).red().dim()
    };
    let conditions: Vec<_> = stats.conditions().iter().map(|c| c.name()).collect();

    format!(
        "{} side {} at {}  hp {}/{}  ap {}/{}  def {}{}",
        label,
        entity.side,
        entity.position,
        stats.hp.current,
        stats.hp.maximum,
        stats.ap.current,
        stats.ap.maximum,
        stats.defense,
        if conditions.is_empty() {
            String::new()
        } else {
            format!("  [{}]", conditions.join(", "))
        }
    )
}

/// Print a session event as a single line
pub(crate) fn print_event(event: &SessionEvent) {
    match event {
        SessionEvent::ActionStarted { tick, record } => {
            println!(
                "{} {} {}",
                style(format!("[{:>5}]", tick.0)).dim(),
                style("start").cyan(),
                record
            );
        }
        SessionEvent::ActionCompleted {
            tick,
            record,
            report: Some(report),
        } => {
            let outcome = if report.hit {
                style(format!("hit for {} ({})", report.damage_dealt, report.cue)).green()
            } else {
                style(format!("missed ({})", report.cue)).yellow()
            };
            println!(
                "{} {} {} -> {}, target hp {}",
                style(format!("[{:>5}]", tick.0)).dim(),
                style("done ").green(),
                record,
                outcome,
                report.target_hp
            );
        }
        SessionEvent::ActionCompleted {
            tick,
            record,
            report: None,
        } => {
            println!(
                "{} {} {} -> {}",
                style(format!("[{:>5}]", tick.0)).dim(),
                style("drop ").red(),
                record,
                style("record rejected").red()
            );
        }
        SessionEvent::ActionInterrupted { tick, record } => {
            println!(
                "{} {} {}",
                style(format!("[{:>5}]", tick.0)).dim(),
                style("stop ").magenta(),
                record
            );
        }
    }
}
