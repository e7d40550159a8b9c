//! Target selection for single-target actions.
//!
//! A legal target is any other entity that has combat stats, is alive, lies
//! within the action's range (Chebyshev distance) and whose 1x1 cell the actor
//! can see. Targets are derived from the world on demand and never persisted.

use crate::action::ActionError;
use crate::env::{Entity, Stats, World};
use crate::state::{EntityId, Position};

/// Grid distance used for range checks (8-way movement).
pub fn distance(from: Position, to: Position) -> i32 {
    from.chebyshev_distance(to)
}

/// Every legal target of `actor` within `range`.
///
/// Order follows `World::entities`. Returns an empty list when the actor is
/// missing.
pub fn find_targets<W: World>(actor: EntityId, range: i32, world: &W) -> Vec<EntityId> {
    let Some(attacker) = world.entity(actor) else {
        return Vec::new();
    };

    world
        .entities()
        .filter(|candidate| candidate.id() != actor)
        .filter(|candidate| in_reach(attacker, *candidate, range).is_ok())
        .map(Entity::id)
        .collect()
}

/// Checks that `target` is attackable by `attacker` at `range`.
///
/// Stats, liveness, range and line of sight, in that order.
pub fn in_reach<E: Entity>(attacker: &E, target: &E, range: i32) -> Result<(), ActionError> {
    let stats = target
        .stats()
        .ok_or(ActionError::TargetWithoutStats(target.id()))?;

    if stats.hp_current() <= 0 {
        return Err(ActionError::TargetNotLiving(target.id()));
    }

    let distance = distance(attacker.position(), target.position());
    if distance > range {
        return Err(ActionError::OutOfRange { distance, range });
    }

    let pos = target.position();
    if !attacker.has_line_of_sight(pos.x, pos.y, 1, 1) {
        return Err(ActionError::NoLineOfSight(target.id()));
    }

    Ok(())
}
