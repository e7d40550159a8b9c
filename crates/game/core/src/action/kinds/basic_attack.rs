//! Single-target attack: melee swings, shots, claws.
//!
//! The attack is resolved in one tick, but only once both the attacker's and
//! the target's sprites are idle. Until then `maintain` reports
//! [`MaintenanceStatus::InProgress`] and touches nothing.

use std::sync::Arc;

use tracing::{debug, error, trace};

use crate::action::targeting::{distance, find_targets, in_reach};
use crate::action::{
    Action, ActionDefinition, ActionError, ActionKind, ActionPhase, ActionRef, EventGroup,
    ExecutionRecord, InputKey, MaintainError, MaintenanceStatus,
};
use crate::combat::{AttackReport, Strike, resolve_strike};
use crate::env::{Entity, Sprite, Stats, World};
use crate::state::EntityId;

/// Per-instance mutable state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct AttackRuntime {
    /// Remaining uses; -1 for unlimited.
    current_ammo: i32,
    phase: ActionPhase,
    actor: Option<EntityId>,
    targets: Vec<EntityId>,
    target: Option<EntityId>,
    bound: Option<ExecutionRecord>,
    last_report: Option<AttackReport>,
}

impl AttackRuntime {
    /// Clears everything but ammo and the last report.
    fn reset(&mut self) {
        self.phase = ActionPhase::Idle;
        self.actor = None;
        self.targets.clear();
        self.target = None;
        self.bound = None;
    }
}

/// A basic attack instance owned by one actor's loadout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicAttack {
    definition: Arc<ActionDefinition>,
    runtime: AttackRuntime,
}

impl BasicAttack {
    pub fn new(definition: Arc<ActionDefinition>) -> Self {
        let current_ammo = definition.initial_ammo();
        Self {
            definition,
            runtime: AttackRuntime {
                current_ammo,
                ..AttackRuntime::default()
            },
        }
    }

    /// Restores a saved ammo count.
    pub fn with_current_ammo(mut self, current_ammo: i32) -> Self {
        self.runtime.current_ammo = current_ammo;
        self
    }

    pub fn definition(&self) -> &ActionDefinition {
        &self.definition
    }

    pub fn icon(&self) -> &str {
        &self.definition.icon
    }

    pub fn actor(&self) -> Option<EntityId> {
        self.runtime.actor
    }

    /// Target selected by input or bound by a record.
    pub fn target(&self) -> Option<EntityId> {
        self.runtime.target
    }

    pub fn bound_record(&self) -> Option<&ExecutionRecord> {
        self.runtime.bound.as_ref()
    }

    /// Outcome of the most recent resolution.
    pub fn last_report(&self) -> Option<&AttackReport> {
        self.runtime.last_report.as_ref()
    }

    fn action_ref(&self) -> ActionRef {
        ActionRef::new(ActionKind::BasicAttack, self.definition.name.as_str())
    }

    fn record(&self, actor: EntityId, target: EntityId) -> ExecutionRecord {
        ExecutionRecord::new(actor, target, self.action_ref())
    }

    fn check_ammo(&self) -> Result<(), ActionError> {
        if self.runtime.current_ammo == 0 {
            return Err(ActionError::OutOfAmmo);
        }
        Ok(())
    }

    fn check_actor<'w, W: World>(
        &self,
        actor: EntityId,
        world: &'w W,
    ) -> Result<&'w W::Entity, ActionError> {
        let entity = world.entity(actor).ok_or(ActionError::ActorNotFound(actor))?;
        let stats = entity
            .stats()
            .ok_or(ActionError::ActorWithoutStats(actor))?;

        let required = self.definition.ap_cost;
        let available = stats.ap_current();
        if available < required {
            return Err(ActionError::InsufficientActionPoints {
                required,
                available,
            });
        }
        Ok(entity)
    }

    fn check_preppable<W: World>(
        &self,
        actor: EntityId,
        world: &W,
    ) -> Result<Vec<EntityId>, ActionError> {
        self.check_ammo()?;
        self.check_actor(actor, world)?;

        let targets = find_targets(actor, self.definition.range, world);
        if targets.is_empty() {
            return Err(ActionError::NoTargets);
        }
        Ok(targets)
    }

    fn check_selection<W: World>(
        &self,
        actor: EntityId,
        target: EntityId,
        world: &W,
    ) -> Result<(), ActionError> {
        self.check_ammo()?;
        let attacker = self.check_actor(actor, world)?;
        let defender = world
            .entity(target)
            .ok_or(ActionError::TargetNotFound(target))?;
        in_reach(attacker, defender, self.definition.range)
    }

    fn check_ai_target<W: World>(
        &self,
        actor: EntityId,
        target: EntityId,
        world: &W,
    ) -> Result<(), ActionError> {
        self.check_ammo()?;
        let attacker = self.check_actor(actor, world)?;
        let defender = world
            .entity(target)
            .ok_or(ActionError::TargetNotFound(target))?;

        if attacker.side() == defender.side() {
            return Err(ActionError::SameSide(target));
        }

        let range = self.definition.range;
        let distance = distance(attacker.position(), defender.position());
        if distance > range {
            return Err(ActionError::OutOfRange { distance, range });
        }
        Ok(())
    }

    /// Checks a record before binding it.
    fn validate_record<W: World>(
        &self,
        record: &ExecutionRecord,
        world: &W,
    ) -> Result<(), MaintainError> {
        if record.action.kind != ActionKind::BasicAttack
            || record.action.name != self.definition.name
        {
            return Err(MaintainError::ForeignRecord {
                expected: self.action_ref().to_string(),
                found: record.action.to_string(),
            });
        }

        let actor = world
            .entity(record.actor)
            .ok_or(MaintainError::ActorNotFound(record.actor))?;
        let actor_stats = actor
            .stats()
            .ok_or(MaintainError::MissingStats(record.actor))?;
        let required = self.definition.ap_cost;
        let available = actor_stats.ap_current();
        if available < required {
            return Err(MaintainError::InsufficientActionPoints {
                required,
                available,
            });
        }

        let target = world
            .entity(record.target)
            .ok_or(MaintainError::TargetNotFound(record.target))?;
        let target_stats = target
            .stats()
            .ok_or(MaintainError::MissingStats(record.target))?;
        if target_stats.hp_current() <= 0 {
            return Err(MaintainError::TargetNotLiving(record.target));
        }

        let range = self.definition.range;
        let distance = distance(actor.position(), target.position());
        if distance > range {
            return Err(MaintainError::OutOfRange { distance, range });
        }
        Ok(())
    }

    /// Gives up on the current record without touching the world.
    ///
    /// The previous report is dropped so it is never mistaken for this one.
    fn abort(&mut self, err: &MaintainError) -> MaintenanceStatus {
        error!(
            action = %self.definition.name,
            code = crate::error::GameError::error_code(err),
            error = %err,
            "attack aborted"
        );
        self.runtime.last_report = None;
        self.runtime.phase = ActionPhase::Complete;
        MaintenanceStatus::Complete
    }
}

impl Action for BasicAttack {
    fn name(&self) -> &str {
        &self.definition.name
    }

    fn kind(&self) -> ActionKind {
        ActionKind::BasicAttack
    }

    fn phase(&self) -> ActionPhase {
        self.runtime.phase
    }

    fn ap_cost(&self) -> i32 {
        self.definition.ap_cost
    }

    fn current_ammo(&self) -> i32 {
        self.runtime.current_ammo
    }

    fn targets(&self) -> &[EntityId] {
        &self.runtime.targets
    }

    fn readyable(&self) -> bool {
        true
    }

    fn preppable<W: World>(&self, actor: EntityId, world: &W) -> bool {
        match self.check_preppable(actor, world) {
            Ok(_) => true,
            Err(err) => {
                debug!(action = %self.definition.name, %actor, error = %err, "not preppable");
                false
            }
        }
    }

    fn prep<W: World>(&mut self, actor: EntityId, world: &mut W) -> bool {
        if self.runtime.phase == ActionPhase::Maintaining {
            debug!(
                action = %self.definition.name,
                %actor,
                error = %ActionError::Busy,
                "prep refused"
            );
            return false;
        }

        let targets = match self.check_preppable(actor, world) {
            Ok(targets) => targets,
            Err(err) => {
                debug!(action = %self.definition.name, %actor, error = %err, "prep refused");
                return false;
            }
        };

        world.map_sounds(&self.definition.sounds);
        self.runtime.reset();
        self.runtime.phase = ActionPhase::Prepped;
        self.runtime.actor = Some(actor);
        self.runtime.targets = targets;
        debug!(
            action = %self.definition.name,
            %actor,
            targets = self.runtime.targets.len(),
            "prepped"
        );
        true
    }

    fn handle_input<W: World>(
        &mut self,
        events: &EventGroup,
        world: &W,
    ) -> (bool, Option<ExecutionRecord>) {
        let prepped = self.runtime.phase == ActionPhase::Prepped;
        let Some(actor) = self.runtime.actor.filter(|_| prepped) else {
            trace!(error = %ActionError::NotPrepped, "input ignored");
            return (false, None);
        };

        let Some(hovered) = world.hovered_entity() else {
            return (false, None);
        };
        if world.entity(hovered).and_then(Entity::stats).is_none() {
            return (false, None);
        }

        if !events.pressed(InputKey::PrimarySelect) {
            return (false, None);
        }

        match self.check_selection(actor, hovered, world) {
            Ok(()) => {
                self.runtime.target = Some(hovered);
                self.runtime.phase = ActionPhase::InputResolved;
                let record = self.record(actor, hovered);
                debug!(%record, "target selected");
                (true, Some(record))
            }
            Err(err) => {
                debug!(
                    action = %self.definition.name,
                    target = %hovered,
                    error = %err,
                    "selection rejected"
                );
                (true, None)
            }
        }
    }

    fn ai_select<W: World>(
        &mut self,
        actor: EntityId,
        target: EntityId,
        world: &W,
    ) -> Option<ExecutionRecord> {
        match self.check_ai_target(actor, target, world) {
            Ok(()) => {
                if self.runtime.phase.is_terminal() {
                    self.runtime.reset();
                    self.runtime.last_report = None;
                }
                Some(self.record(actor, target))
            }
            Err(err) => {
                debug!(
                    action = %self.definition.name,
                    %actor,
                    %target,
                    error = %err,
                    "ai target rejected"
                );
                None
            }
        }
    }

    fn maintain<W: World>(
        &mut self,
        _dt: u64,
        world: &mut W,
        record: Option<&ExecutionRecord>,
    ) -> MaintenanceStatus {
        if self.runtime.phase.is_terminal()
            && (record.is_none() || record == self.runtime.bound.as_ref())
        {
            return MaintenanceStatus::Complete;
        }

        if let Some(record) = record {
            let rebinding = self.runtime.phase == ActionPhase::Maintaining
                && self.runtime.bound.as_ref() == Some(record);
            if !rebinding {
                self.runtime.bound = Some(record.clone());
                if let Err(err) = self.validate_record(record, world) {
                    return self.abort(&err);
                }
                self.runtime.phase = ActionPhase::Maintaining;
                self.runtime.actor = Some(record.actor);
                self.runtime.target = Some(record.target);
            }
        }

        let Some((actor, target)) = self
            .runtime
            .bound
            .as_ref()
            .filter(|_| self.runtime.phase == ActionPhase::Maintaining)
            .map(|bound| (bound.actor, bound.target))
        else {
            return self.abort(&MaintainError::NothingBound);
        };

        let ready = |id| world.entity(id).is_none_or(|e| e.sprite().is_ready());
        if !(ready(actor) && ready(target)) {
            trace!(action = %self.definition.name, %actor, %target, "waiting for sprites");
            return MaintenanceStatus::InProgress;
        }

        let definition = Arc::clone(&self.definition);
        let strike = Strike {
            actor,
            target,
            ap_cost: definition.ap_cost,
            strength: definition.strength,
            damage: definition.damage,
            kind: definition.damage_kind,
            animation: &definition.animation,
            conditions: &definition.conditions,
        };

        match resolve_strike(world, &strike, &mut self.runtime.current_ammo) {
            Ok(report) => {
                debug!(
                    action = %definition.name,
                    %actor,
                    %target,
                    hit = report.hit,
                    cue = %report.cue,
                    damage = report.damage_dealt,
                    ammo = self.runtime.current_ammo,
                    "attack resolved"
                );
                self.runtime.last_report = Some(report);
                self.runtime.phase = ActionPhase::Complete;
                MaintenanceStatus::Complete
            }
            Err(err) => self.abort(&err),
        }
    }

    fn interrupt(&mut self) -> bool {
        if self.runtime.phase == ActionPhase::Maintaining {
            debug!(action = %self.definition.name, "interrupted");
            self.runtime.phase = ActionPhase::Interrupted;
        }
        true
    }

    fn cancel(&mut self) {
        self.runtime.reset();
    }
}
