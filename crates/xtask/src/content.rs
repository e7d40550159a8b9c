//! Content selection shared by commands
//!
//! Every command that builds a session takes optional `--scenario`, `--defs`
//! and `--combat` paths, falling back to the content embedded in
//! `tactics-content`. Replaying a log needs the same content and seed the log
//! was recorded with.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use tactics_content::{ConfigLoader, DefinitionLoader, Scenario, ScenarioLoader, build_registry};
use tactics_core::{ActionDefinition, ActionRegistry, CombatConfig, WorldState};
use tactics_runtime::{LoadoutSnapshot, RuntimeConfig, Session};

#[derive(Args, Debug, Clone, Default)]
pub struct ContentArgs {
    /// Scenario RON file (defaults to the embedded cellar scenario)
    #[arg(long, value_name = "FILE")]
    pub scenario: Option<PathBuf>,

    /// Directory of action definition RON files (defaults to embedded)
    #[arg(long, value_name = "DIR")]
    pub defs: Option<PathBuf>,

    /// Combat tuning TOML file (defaults to embedded)
    #[arg(long, value_name = "FILE")]
    pub combat: Option<PathBuf>,

    /// Attack roll seed (defaults to TACTICS_SEED, then the scenario's seed)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Everything needed to start or replay a session
pub struct Content {
    pub seed: u64,
    pub scenario: Scenario,
    pub combat: CombatConfig,
    defs: Vec<ActionDefinition>,
}

impl ContentArgs {
    pub fn load(&self, config: &RuntimeConfig) -> Result<Content> {
        let scenario = match &self.scenario {
            Some(path) => ScenarioLoader::load(path)?,
            None => ScenarioLoader::embedded()?,
        };
        let defs = match &self.defs {
            Some(dir) => DefinitionLoader::load_dir(dir)?,
            None => DefinitionLoader::embedded()?,
        };
        let combat = match &self.combat {
            Some(path) => ConfigLoader::load(path)?,
            None => ConfigLoader::embedded()?,
        };
        Ok(Content {
            seed: self.seed.or(config.seed).unwrap_or(scenario.seed),
            scenario,
            combat,
            defs,
        })
    }
}

impl Content {
    pub fn registry(&self) -> Result<ActionRegistry> {
        build_registry(self.defs.clone())
    }

    /// The scenario's starting world and loadouts
    pub fn start(&self) -> Result<(WorldState, LoadoutSnapshot)> {
        let mut world = self.scenario.build_world(self.combat)?;
        world.seed = self.seed;
        let mut session = Session::new(world, self.registry()?, RuntimeConfig::default());
        session
            .equip_loadouts(self.scenario.loadouts())
            .context("Scenario loadout references an unknown action")?;
        let loadouts = session.snapshot_loadouts();
        Ok((session.into_world(), loadouts))
    }
}
