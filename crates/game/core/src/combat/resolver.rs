//! Attack resolution steps run once per execution record.

use crate::action::MaintainError;
use crate::combat::{Condition, DamageKind};
use crate::config::CombatConfig;
use crate::env::{Entity, Stats, SyncCommand, World};
use crate::state::EntityId;

/// Reaction animation played by the defender.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DefenderCue {
    /// The hit left the defender with no health.
    Killed,
    /// The hit landed and the defender survived.
    Damaged,
    /// The attack missed.
    Undamaged,
}

/// Parameters of one strike, taken from the action definition.
#[derive(Clone, Copy, Debug)]
pub struct Strike<'a> {
    pub actor: EntityId,
    pub target: EntityId,
    pub ap_cost: i32,
    pub strength: i32,
    pub damage: i32,
    pub kind: DamageKind,
    pub animation: &'a str,
    pub conditions: &'a [String],
}

/// What a resolved strike did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub actor: EntityId,
    pub target: EntityId,
    pub hit: bool,
    pub cue: DefenderCue,
    /// Health the target actually lost.
    pub damage_dealt: i32,
    /// Target health after the strike.
    pub target_hp: i32,
}

/// Resolves a strike against the world.
///
/// Both entities must exist with stats; that is checked before anything is
/// mutated. Finite `ammo` (> 0) is decremented; the unlimited sentinel is left
/// alone. Action points are spent whether or not the attack hits.
pub fn resolve_strike<W: World>(
    world: &mut W,
    strike: &Strike<'_>,
    ammo: &mut i32,
) -> Result<AttackReport, MaintainError> {
    let actor_pos = match world.entity(strike.actor) {
        Some(actor) if actor.stats().is_some() => actor.position(),
        Some(_) => return Err(MaintainError::MissingStats(strike.actor)),
        None => return Err(MaintainError::ActorNotFound(strike.actor)),
    };
    let target_pos = match world.entity(strike.target) {
        Some(target) if target.stats().is_some() => target.position(),
        Some(_) => return Err(MaintainError::MissingStats(strike.target)),
        None => return Err(MaintainError::TargetNotFound(strike.target)),
    };

    // 1. Face each other
    if let Some(target) = world.entity_mut(strike.target) {
        target.turn_to_face(actor_pos);
    }
    if let Some(actor) = world.entity_mut(strike.actor) {
        actor.turn_to_face(target_pos);
    }

    // 2. Ammo
    if *ammo > 0 {
        *ammo -= 1;
    }

    // 3. Cost is paid on hit or miss
    if let Some(stats) = world.entity_mut(strike.actor).and_then(Entity::stats_mut) {
        stats.apply_damage(-strike.ap_cost, 0, DamageKind::Unspecified);
    }

    // 4. Hit determination
    let hit = world.resolve_attack(strike.actor, strike.target, strike.strength, strike.kind);

    // 5. Conditions, then damage
    let mut damage_dealt = 0;
    let mut target_hp = 0;
    if let Some(stats) = world.entity_mut(strike.target).and_then(Entity::stats_mut) {
        let hp_before = stats.hp_current();
        if hit {
            for name in strike.conditions {
                stats.apply_condition(Condition::named(name.as_str()));
            }
            stats.apply_damage(0, -strike.damage, strike.kind);
        }
        target_hp = stats.hp_current();
        damage_dealt = hp_before - target_hp;
    }

    // 6. Defender cue
    let cue = if hit && target_hp <= 0 {
        DefenderCue::Killed
    } else if hit {
        DefenderCue::Damaged
    } else {
        DefenderCue::Undamaged
    };

    // 7. Frame-aligned presentation
    world.command_sync(
        &[
            SyncCommand::new(strike.actor, [strike.animation]),
            SyncCommand::new(
                strike.target,
                [CombatConfig::DEFEND_ANIMATION, cue.as_ref()],
            ),
        ],
        CombatConfig::SYNC_BARRIER,
    );

    // 8. Bookkeeping for AI heuristics
    if let Some(actor) = world.entity_mut(strike.actor) {
        actor.info_mut().last_entity_i_attacked = Some(strike.target);
    }
    if let Some(target) = world.entity_mut(strike.target) {
        target.info_mut().last_entity_that_attacked_me = Some(strike.actor);
    }

    Ok(AttackReport {
        actor: strike.actor,
        target: strike.target,
        hit,
        cue,
        damage_dealt,
        target_hp,
    })
}
