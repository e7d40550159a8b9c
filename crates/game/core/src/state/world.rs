//! Reference world implementing every collaborator the actions need.

use std::collections::BTreeSet;

use tracing::debug;

use crate::combat::{DamageKind, check_hit};
use crate::config::CombatConfig;
use crate::env::{PcgRng, RngOracle, SoundMap, Stats, SyncCommand, World, compute_seed};
use crate::state::{EntityId, EntityState, Position, StateError};

/// Deterministic grid world: entities, blocking terrain, sprites and seeded
/// attack rolls.
///
/// Everything that influences combat outcomes is serialized; the hovered
/// entity and the active sound mapping are per-frame presentation and are not.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    /// Session seed for attack rolls. Set once when the world is created.
    pub seed: u64,
    /// Number of attack rolls made so far; mixed into every roll's seed.
    attack_nonce: u64,
    config: CombatConfig,
    entities: Vec<EntityState>,
    blocked: BTreeSet<Position>,
    #[cfg_attr(feature = "serde", serde(skip))]
    hovered: Option<EntityId>,
    #[cfg_attr(feature = "serde", serde(skip))]
    sounds: SoundMap,
}

impl WorldState {
    pub fn new(seed: u64, config: CombatConfig) -> Self {
        Self {
            seed,
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn attack_nonce(&self) -> u64 {
        self.attack_nonce
    }

    /// Adds an entity, adopting the world's animation timing.
    pub fn spawn(&mut self, mut entity: EntityState) -> Result<(), StateError> {
        if self.get(entity.id).is_some() {
            return Err(StateError::DuplicateEntity(entity.id));
        }
        entity
            .sprite
            .set_ticks_per_command(self.config.animation_ticks);
        entity.vision = self.compute_vision(entity.position);
        self.entities.push(entity);
        Ok(())
    }

    /// Removes an entity, returning it.
    pub fn despawn(&mut self, id: EntityId) -> Result<EntityState, StateError> {
        let index = self
            .entities
            .iter()
            .position(|e| e.id == id)
            .ok_or(StateError::EntityNotFound(id))?;
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        Ok(self.entities.remove(index))
    }

    pub fn move_entity(&mut self, id: EntityId, to: Position) -> Result<(), StateError> {
        if self.blocked.contains(&to) {
            return Err(StateError::Blocked(to));
        }
        let vision = self.compute_vision(to);
        let entity = self.get_mut(id).ok_or(StateError::EntityNotFound(id))?;
        entity.position = to;
        entity.vision = vision;
        Ok(())
    }

    /// Marks a cell as opaque, impassable terrain.
    pub fn block(&mut self, cell: Position) {
        if self.blocked.insert(cell) {
            self.refresh_vision();
        }
    }

    pub fn unblock(&mut self, cell: Position) {
        if self.blocked.remove(&cell) {
            self.refresh_vision();
        }
    }

    pub fn is_blocked(&self, cell: Position) -> bool {
        self.blocked.contains(&cell)
    }

    pub fn get(&self, id: EntityId) -> Option<&EntityState> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut EntityState> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityState> {
        self.entities.iter()
    }

    pub fn set_hovered(&mut self, hovered: Option<EntityId>) {
        self.hovered = hovered;
    }

    /// Sound mapping installed by the most recently prepped action.
    pub fn active_sounds(&self) -> &SoundMap {
        &self.sounds
    }

    /// Advances every sprite by one tick.
    pub fn advance_animations(&mut self) {
        for entity in &mut self.entities {
            entity.sprite.advance();
        }
    }

    /// True once no sprite is mid-animation.
    pub fn animations_settled(&self) -> bool {
        use crate::env::Sprite;
        self.entities.iter().all(|e| e.sprite.is_ready())
    }

    /// Recomputes every entity's visible cells.
    pub fn refresh_vision(&mut self) {
        let visions: Vec<_> = self
            .entities
            .iter()
            .map(|e| self.compute_vision(e.position))
            .collect();
        for (entity, vision) in self.entities.iter_mut().zip(visions) {
            entity.vision = vision;
        }
    }

    fn compute_vision(&self, origin: Position) -> BTreeSet<Position> {
        let radius = self.config.vision_radius as i32;
        let mut visible = BTreeSet::new();
        for x in origin.x - radius..=origin.x + radius {
            for y in origin.y - radius..=origin.y + radius {
                let cell = Position::new(x, y);
                if self.is_clear_between(origin, cell) {
                    visible.insert(cell);
                }
            }
        }
        visible
    }

    /// True if no blocked cell lies strictly between `from` and `to`.
    fn is_clear_between(&self, from: Position, to: Position) -> bool {
        let line = bresenham(from, to);
        let interior = line.len().saturating_sub(1);
        line.iter()
            .take(interior)
            .skip(1)
            .all(|cell| !self.blocked.contains(cell))
    }
}

/// Cells on the Bresenham line from `from` to `to`, both ends included.
fn bresenham(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x, from.y);
    let mut cells = Vec::with_capacity((dx - dy) as usize + 1);

    loop {
        cells.push(Position::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            x += sx;
        }
        if doubled <= dx {
            err += dx;
            y += sy;
        }
    }
    cells
}

impl World for WorldState {
    type Entity = EntityState;

    fn entity(&self, id: EntityId) -> Option<&EntityState> {
        self.get(id)
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut EntityState> {
        self.get_mut(id)
    }

    fn entities(&self) -> impl Iterator<Item = &EntityState> + '_ {
        self.entities.iter()
    }

    fn hovered_entity(&self) -> Option<EntityId> {
        self.hovered
    }

    fn command_sync(&mut self, commands: &[SyncCommand], barrier: &str) {
        for command in commands {
            match self.get_mut(command.entity) {
                Some(entity) => entity
                    .sprite
                    .run(command.commands.iter().cloned(), Some(barrier)),
                None => debug!(entity = %command.entity, "sync command for missing entity"),
            }
        }
    }

    fn map_sounds(&mut self, sounds: &SoundMap) {
        self.sounds.extend(sounds.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    fn resolve_attack(
        &mut self,
        attacker: EntityId,
        defender: EntityId,
        strength: i32,
        kind: DamageKind,
    ) -> bool {
        let defense = self
            .get(defender)
            .and_then(|e| e.stats.as_ref())
            .map_or(0, Stats::defense);

        let seed = compute_seed(self.seed, self.attack_nonce, attacker.0, 0);
        self.attack_nonce += 1;

        let roll = PcgRng.roll_d100(seed);
        let hit = check_hit(strength, defense, roll, &self.config);
        debug!(%attacker, %defender, strength, defense, roll, hit, %kind, "attack rolled");
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Entity;
    use crate::state::{CombatStats, SideId};

    fn world_with(entities: &[(u32, i32, i32)]) -> WorldState {
        let mut world = WorldState::new(7, CombatConfig::default());
        for &(id, x, y) in entities {
            world
                .spawn(
                    EntityState::new(EntityId(id), Position::new(x, y), SideId::HAUNT)
                        .with_stats(CombatStats::new(4, 10, 0)),
                )
                .unwrap();
        }
        world
    }

    #[test]
    fn walls_block_line_of_sight() {
        let mut world = world_with(&[(1, 0, 0)]);
        assert!(world.get(EntityId(1)).unwrap().has_line_of_sight(4, 0, 1, 1));

        world.block(Position::new(2, 0));
        let viewer = world.get(EntityId(1)).unwrap();
        assert!(!viewer.has_line_of_sight(4, 0, 1, 1));
        assert!(viewer.has_line_of_sight(2, 0, 1, 1));
        assert!(viewer.has_line_of_sight(4, 2, 1, 1));
    }

    #[test]
    fn rectangle_is_visible_if_any_cell_is() {
        let mut world = world_with(&[(1, 0, 0)]);
        world.block(Position::new(2, 0));
        let viewer = world.get(EntityId(1)).unwrap();
        assert!(viewer.has_line_of_sight(4, -1, 1, 2));
    }

    #[test]
    fn moving_refreshes_vision() {
        let mut world = world_with(&[(1, 0, 0)]);
        world.block(Position::new(1, 0));
        assert!(!world.get(EntityId(1)).unwrap().has_line_of_sight(3, 0, 1, 1));

        world.move_entity(EntityId(1), Position::new(0, 3)).unwrap();
        assert!(world.get(EntityId(1)).unwrap().has_line_of_sight(3, 0, 1, 1));
        assert_eq!(
            world.move_entity(EntityId(1), Position::new(1, 0)),
            Err(StateError::Blocked(Position::new(1, 0)))
        );
    }

    #[test]
    fn spawn_rejects_duplicate_ids() {
        let mut world = world_with(&[(1, 0, 0)]);
        let dup = EntityState::new(EntityId(1), Position::new(3, 3), SideId::NEUTRAL);
        assert_eq!(world.spawn(dup), Err(StateError::DuplicateEntity(EntityId(1))));
    }

    #[test]
    fn attack_rolls_are_deterministic_and_advance_nonce() {
        let mut a = world_with(&[(1, 0, 0), (2, 1, 0)]);
        let mut b = a.clone();

        let rolls_a: Vec<bool> = (0..20)
            .map(|_| a.resolve_attack(EntityId(1), EntityId(2), 5, DamageKind::Physical))
            .collect();
        let rolls_b: Vec<bool> = (0..20)
            .map(|_| b.resolve_attack(EntityId(1), EntityId(2), 5, DamageKind::Physical))
            .collect();

        assert_eq!(rolls_a, rolls_b);
        assert_eq!(a.attack_nonce(), 20);
    }

    #[test]
    fn command_sync_starts_every_listed_sprite() {
        use crate::env::Sprite;

        let mut world = world_with(&[(1, 0, 0), (2, 1, 0)]);
        world.command_sync(
            &[
                SyncCommand::new(EntityId(1), ["melee"]),
                SyncCommand::new(EntityId(2), ["defend", "damaged"]),
            ],
            CombatConfig::SYNC_BARRIER,
        );

        let attacker = world.get(EntityId(1)).unwrap().sprite();
        let defender = world.get(EntityId(2)).unwrap().sprite();
        assert_eq!(attacker.state(), "melee");
        assert_eq!(defender.state(), "defend");
        assert_eq!(defender.barrier(), Some("hit"));
        assert!(!world.animations_settled());

        for _ in 0..4 {
            world.advance_animations();
        }
        assert!(world.animations_settled());
    }
}
