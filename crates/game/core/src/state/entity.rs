//! Entities of the reference world.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;

use crate::combat::{Condition, DamageKind};
use crate::config::CombatConfig;
use crate::env::{Entity, Stats};
use crate::state::{EntityId, Facing, Position, SideId, SpriteState};

/// Integer resource meter (action points, health) tracked per entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: i32,
    pub maximum: i32,
}

impl ResourceMeter {
    pub fn new(current: i32, maximum: i32) -> Self {
        Self { current, maximum }
    }

    /// Meter starting full.
    pub fn full(maximum: i32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Adds `delta`, clamped to `[0, maximum]`.
    fn adjust(&mut self, delta: i32) {
        self.current = self
            .current
            .saturating_add(delta)
            .clamp(0, self.maximum.max(0));
    }
}

/// Who this entity last fought with. Read by AI heuristics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatInfo {
    pub last_entity_i_attacked: Option<EntityId>,
    pub last_entity_that_attacked_me: Option<EntityId>,
}

/// Active conditions on an entity.
pub type Conditions = ArrayVec<Condition, { CombatConfig::MAX_CONDITIONS }>;

/// Combat statistics of an attackable entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub ap: ResourceMeter,
    pub hp: ResourceMeter,
    pub defense: i32,
    conditions: Conditions,
}

impl CombatStats {
    /// Stats with full action points and health.
    pub fn new(ap: i32, hp: i32, defense: i32) -> Self {
        Self {
            ap: ResourceMeter::full(ap),
            hp: ResourceMeter::full(hp),
            defense,
            conditions: Conditions::new(),
        }
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn has_condition(&self, name: &str) -> bool {
        self.conditions.iter().any(|c| c.name() == name)
    }

    /// Refills action points, as at the start of a turn.
    pub fn refresh_ap(&mut self) {
        self.ap.current = self.ap.maximum;
    }
}

impl Stats for CombatStats {
    fn ap_current(&self) -> i32 {
        self.ap.current
    }

    fn hp_current(&self) -> i32 {
        self.hp.current
    }

    fn defense(&self) -> i32 {
        self.defense
    }

    fn apply_damage(&mut self, ap_delta: i32, hp_delta: i32, kind: DamageKind) {
        self.ap.adjust(ap_delta);
        self.hp.adjust(hp_delta);
        tracing::trace!(ap_delta, hp_delta, %kind, "applied damage");
    }

    fn apply_condition(&mut self, condition: Condition) {
        if self.conditions.contains(&condition) {
            return;
        }
        if let Err(err) = self.conditions.try_push(condition) {
            tracing::warn!(condition = %err.element(), "condition slots full, dropping");
        }
    }
}

/// An entity in the reference world.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityState {
    pub id: EntityId,
    pub name: String,
    pub position: Position,
    pub side: SideId,
    pub facing: Facing,
    pub stats: Option<CombatStats>,
    pub info: CombatInfo,
    pub(crate) sprite: SpriteState,
    /// Cells visible from `position`, maintained by the owning world.
    pub(crate) vision: BTreeSet<Position>,
}

impl EntityState {
    pub fn new(id: EntityId, position: Position, side: SideId) -> Self {
        Self {
            id,
            name: String::new(),
            position,
            side,
            facing: Facing::default(),
            stats: None,
            info: CombatInfo::default(),
            sprite: SpriteState::default(),
            vision: BTreeSet::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_stats(mut self, stats: CombatStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn sprite_state(&self) -> &SpriteState {
        &self.sprite
    }

    pub fn sprite_state_mut(&mut self) -> &mut SpriteState {
        &mut self.sprite
    }

    pub fn vision(&self) -> &BTreeSet<Position> {
        &self.vision
    }
}

impl Entity for EntityState {
    type Stats = CombatStats;
    type Sprite = SpriteState;

    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Position {
        self.position
    }

    fn has_line_of_sight(&self, x: i32, y: i32, width: u32, height: u32) -> bool {
        let width = width.max(1) as i32;
        let height = height.max(1) as i32;
        (x..x + width).any(|cx| {
            (y..y + height).any(|cy| self.vision.contains(&Position::new(cx, cy)))
        })
    }

    fn side(&self) -> SideId {
        self.side
    }

    fn stats(&self) -> Option<&CombatStats> {
        self.stats.as_ref()
    }

    fn stats_mut(&mut self) -> Option<&mut CombatStats> {
        self.stats.as_mut()
    }

    fn sprite(&self) -> &SpriteState {
        &self.sprite
    }

    fn turn_to_face(&mut self, target: Position) {
        if let Some(facing) = Facing::towards(self.position, target) {
            self.facing = facing;
        }
    }

    fn info_mut(&mut self) -> &mut CombatInfo {
        &mut self.info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_is_clamped_to_meter_bounds() {
        let mut stats = CombatStats::new(4, 10, 0);
        stats.apply_damage(-6, -3, DamageKind::Physical);
        assert_eq!(stats.ap_current(), 0);
        assert_eq!(stats.hp_current(), 7);

        stats.apply_damage(0, 50, DamageKind::Unspecified);
        assert_eq!(stats.hp_current(), 10);

        stats.apply_damage(0, -15, DamageKind::Fire);
        assert_eq!(stats.hp_current(), 0);
    }

    #[test]
    fn conditions_are_not_duplicated() {
        let mut stats = CombatStats::new(4, 10, 0);
        stats.apply_condition(Condition::named("poison"));
        stats.apply_condition(Condition::named("poison"));
        stats.apply_condition(Condition::named("stun"));
        assert_eq!(stats.conditions().len(), 2);
        assert!(stats.has_condition("stun"));
    }

    #[test]
    fn living_requires_stats_and_health() {
        let mut entity = EntityState::new(EntityId(1), Position::ORIGIN, SideId::HAUNT);
        assert!(!entity.is_living());

        entity.stats = Some(CombatStats::new(4, 1, 0));
        assert!(entity.is_living());

        entity.stats_mut().unwrap().apply_damage(0, -1, DamageKind::Physical);
        assert!(!entity.is_living());
    }
}
