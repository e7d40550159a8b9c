//! Collaborator traits the action framework depends on.
//!
//! Actions never own entities, stats, sprites or audio. They reach them through
//! the narrow traits below, so any game world (the reference
//! [`WorldState`](crate::state::WorldState), a test double, an engine adapter)
//! can host them.
mod rng;

pub use rng::{PcgRng, RngOracle, compute_seed};

use std::collections::BTreeMap;

use crate::combat::{Condition, DamageKind};
use crate::config::CombatConfig;
use crate::state::{CombatInfo, EntityId, Position, SideId};

/// Symbolic sound name → sound asset key.
pub type SoundMap = BTreeMap<String, String>;

// ============================================================================
// Entity Collaborators
// ============================================================================

/// Combat statistics of an entity.
pub trait Stats {
    /// Action points available this turn.
    fn ap_current(&self) -> i32;

    /// Current health. Zero or less means the entity is not living.
    fn hp_current(&self) -> i32;

    /// Defense used against attack strength when rolling hits.
    fn defense(&self) -> i32;

    /// Adds `ap_delta` to action points and `hp_delta` to health.
    ///
    /// Negative deltas deduct. `kind` describes the source of health damage.
    fn apply_damage(&mut self, ap_delta: i32, hp_delta: i32, kind: DamageKind);

    /// Applies a named status condition.
    fn apply_condition(&mut self, condition: Condition);
}

/// Animation state of an entity's sprite.
pub trait Sprite {
    /// Current animation state; [`CombatConfig::READY_STATE`] when idle.
    fn state(&self) -> &str;

    /// Starts a single animation.
    fn play(&mut self, animation: &str);

    fn is_ready(&self) -> bool {
        self.state() == CombatConfig::READY_STATE
    }
}

/// An entity as seen by actions.
pub trait Entity {
    type Stats: Stats;
    type Sprite: Sprite;

    fn id(&self) -> EntityId;

    fn position(&self) -> Position;

    /// True if any cell of the `width` x `height` rectangle at (`x`, `y`) is
    /// visible from this entity.
    fn has_line_of_sight(&self, x: i32, y: i32, width: u32, height: u32) -> bool;

    fn side(&self) -> SideId;

    /// Combat stats, or `None` for entities that cannot be attacked.
    fn stats(&self) -> Option<&Self::Stats>;

    fn stats_mut(&mut self) -> Option<&mut Self::Stats>;

    fn sprite(&self) -> &Self::Sprite;

    fn turn_to_face(&mut self, target: Position);

    /// Bookkeeping consumed by AI heuristics.
    fn info_mut(&mut self) -> &mut CombatInfo;

    /// True if the entity has stats and positive health.
    fn is_living(&self) -> bool {
        self.stats().is_some_and(|stats| stats.hp_current() > 0)
    }
}

// ============================================================================
// World Collaborator
// ============================================================================

/// Animation commands for one sprite inside a synchronized group.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyncCommand {
    pub entity: EntityId,
    pub commands: Vec<String>,
}

impl SyncCommand {
    pub fn new<I, S>(entity: EntityId, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entity,
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }
}

/// The live game world an action runs against.
pub trait World {
    type Entity: Entity;

    fn entity(&self, id: EntityId) -> Option<&Self::Entity>;

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Self::Entity>;

    /// All entities. Order is unspecified.
    fn entities(&self) -> impl Iterator<Item = &Self::Entity> + '_;

    /// Entity under the pointer in the current UI frame.
    fn hovered_entity(&self) -> Option<EntityId>;

    /// Plays each command list on its sprite, released together at `barrier`.
    fn command_sync(&mut self, commands: &[SyncCommand], barrier: &str);

    /// Installs the symbolic sound mapping of an action about to be used.
    fn map_sounds(&mut self, sounds: &SoundMap);

    /// Decides whether an attack hits.
    ///
    /// Must be deterministic given world state (seeded, never wall-clock).
    fn resolve_attack(
        &mut self,
        attacker: EntityId,
        defender: EntityId,
        strength: i32,
        kind: DamageKind,
    ) -> bool;
}
