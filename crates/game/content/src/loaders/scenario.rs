//! Scenario loader.
//!
//! A scenario is the starting point of a session: the world seed, opaque
//! cells, and each entity with its stats and loadout (by action name).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{CombatConfig, CombatStats, EntityId, EntityState, Position, SideId, WorldState};

use crate::loaders::{LoadResult, read_file};

/// Combat stats of a scenario entity. Entities start at full AP and health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSpec {
    pub ap: i32,
    pub hp: i32,
    #[serde(default)]
    pub defense: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioEntity {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub position: (i32, i32),
    #[serde(default)]
    pub side: u8,
    /// `None` for scenery that cannot be attacked.
    #[serde(default)]
    pub stats: Option<StatsSpec>,
    /// Action names equipped at start.
    #[serde(default)]
    pub loadout: Vec<String>,
}

impl ScenarioEntity {
    pub fn entity_id(&self) -> EntityId {
        EntityId(self.id)
    }

    fn to_state(&self) -> EntityState {
        let (x, y) = self.position;
        let mut entity = EntityState::new(self.entity_id(), Position::new(x, y), SideId(self.side))
            .with_name(self.name.as_str());
        if let Some(stats) = self.stats {
            entity = entity.with_stats(CombatStats::new(stats.ap, stats.hp, stats.defense));
        }
        entity
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub seed: u64,
    #[serde(default)]
    pub blocked: Vec<(i32, i32)>,
    pub entities: Vec<ScenarioEntity>,
}

impl Scenario {
    /// Builds the starting world.
    pub fn build_world(&self, config: CombatConfig) -> LoadResult<WorldState> {
        let mut world = WorldState::new(self.seed, config);
        for &(x, y) in &self.blocked {
            world.block(Position::new(x, y));
        }
        for entry in &self.entities {
            world
                .spawn(entry.to_state())
                .map_err(|e| anyhow::anyhow!("Failed to spawn '{}': {}", entry.name, e))?;
        }
        Ok(world)
    }

    /// Loadouts by entity, in scenario order.
    pub fn loadouts(&self) -> impl Iterator<Item = (EntityId, &[String])> {
        self.entities
            .iter()
            .map(|e| (e.entity_id(), e.loadout.as_slice()))
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario {}: {}", path.display(), e))
    }

    /// The demo scenario shipped with the crate (`data/scenarios/cellar.ron`).
    pub fn embedded() -> LoadResult<Scenario> {
        Self::parse(include_str!("../../data/scenarios/cellar.ron"))
    }

    fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron::from_str(content)?;
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use tactics_core::Entity;

    use super::*;

    #[test]
    fn embedded_scenario_builds_world() {
        let scenario = ScenarioLoader::embedded().unwrap();
        let world = scenario.build_world(CombatConfig::default()).unwrap();

        assert_eq!(world.seed, 1337);
        assert!(world.is_blocked(Position::new(2, 1)));

        let ghoul = world.get(EntityId(2)).unwrap();
        assert_eq!(ghoul.side, SideId::HAUNT);
        assert_eq!(ghoul.stats.as_ref().unwrap().hp.current, 8);
        assert!(world.get(EntityId(3)).unwrap().stats().is_none());

        let loadouts: Vec<_> = scenario.loadouts().collect();
        assert_eq!(loadouts[0].1, ["Pistol", "Flare"]);
    }

    #[test]
    fn duplicate_ids_fail_to_build() {
        let scenario = Scenario {
            seed: 1,
            blocked: vec![],
            entities: vec![
                ScenarioEntity {
                    id: 4,
                    name: "a".into(),
                    position: (0, 0),
                    side: 1,
                    stats: None,
                    loadout: vec![],
                },
                ScenarioEntity {
                    id: 4,
                    name: "b".into(),
                    position: (1, 0),
                    side: 1,
                    stats: None,
                    loadout: vec![],
                },
            ],
        };
        assert!(scenario.build_world(CombatConfig::default()).is_err());
    }
}
