//! Play a scenario with AI turns
//!
//! Each round, every living entity with a loadout attacks the nearest enemy
//! with the first action that accepts it. Accepted records are written to an
//! action log that `replay` and `read-actions` can inspect.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tactics_core::{EntityId, ExecutionRecord, WorldState};
use tactics_runtime::{FileActionLog, RuntimeConfig, Session};

use crate::content::ContentArgs;
use crate::dirs;

/// Play a scenario with AI turns and record the action log
#[derive(Parser, Debug)]
pub struct Simulate {
    #[command(flatten)]
    content: ContentArgs,

    /// Maximum number of rounds to play
    #[arg(short, long, default_value = "5")]
    rounds: u32,

    /// Log file name (defaults to session_<timestamp>.log)
    #[arg(short, long, value_name = "NAME")]
    name: Option<String>,

    /// Custom log directory (defaults to TACTICS_LOG_DIR or the platform data dir)
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let config = RuntimeConfig::from_env();
        let content = self.content.load(&config)?;
        let (world, loadouts) = content.start()?;

        let log_dir = self.log_dir.unwrap_or_else(dirs::log_dir);
        let name = self.name.unwrap_or_else(default_log_name);
        let log = FileActionLog::create(&log_dir, &name)
            .with_context(|| format!("Failed to create action log in {}", log_dir.display()))?;
        let log_path = log.path().to_path_buf();

        let max_ticks = config.max_ticks;
        let mut session = Session::new(world, content.registry()?, config).with_log(log);
        session.restore_loadouts(&loadouts)?;

        println!("{} {}", style("Log:").bold().cyan(), log_path.display());
        println!("{} {}", style("Seed:").bold().cyan(), content.seed);
        println!();

        let mut actions = 0;
        for round in 1..=self.rounds {
            let mut acted = false;
            let actors: Vec<EntityId> = session.world().iter().map(|e| e.id).collect();

            for actor in actors {
                if !is_living(session.world(), actor) {
                    continue;
                }
                let Some(record) = choose_attack(&mut session, actor)? else {
                    continue;
                };
                if !acted {
                    println!("{}", style(format!("--- Round {round} ---")).bold().yellow());
                    acted = true;
                }

                session.submit(record)?;
                for event in session.run_to_completion(max_ticks)? {
                    super::print_event(&event);
                }
                session.settle(max_ticks)?;
                actions += 1;
            }

            if !acted {
                break;
            }
        }

        println!();
        println!(
            "{} {} records written",
            style("✓").green().bold(),
            actions
        );
        println!();
        super::print_world(session.world());

        Ok(())
    }
}

/// First action in `actor`'s loadout that accepts the nearest enemy
fn choose_attack(session: &mut Session, actor: EntityId) -> Result<Option<ExecutionRecord>> {
    let world = session.world();
    let Some(me) = world.get(actor) else {
        return Ok(None);
    };

    let mut enemies: Vec<_> = world
        .iter()
        .filter(|e| e.side != me.side && is_living(world, e.id))
        .map(|e| (me.position.chebyshev_distance(e.position), e.id))
        .collect();
    enemies.sort();

    let actions: Vec<String> = session
        .available_actions(actor)
        .into_iter()
        .map(str::to_owned)
        .collect();
    for action in &actions {
        for &(_, target) in &enemies {
            if let Some(record) = session.ai_select(actor, action, target)? {
                return Ok(Some(record));
            }
        }
    }
    Ok(None)
}

fn is_living(world: &WorldState, id: EntityId) -> bool {
    world
        .get(id)
        .and_then(|e| e.stats.as_ref())
        .is_some_and(|stats| stats.hp.current > 0)
}

fn default_log_name() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("session_{timestamp}.{}", dirs::LOG_EXTENSION)
}
