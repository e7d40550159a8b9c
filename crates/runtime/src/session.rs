//! Session driver: loadouts, record submission and tick-driven resolution.
//!
//! A [`Session`] owns the world and every entity's equipped actions. At most
//! one record resolves at a time; `tick` calls `maintain` on it once and then
//! advances sprite animations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use tactics_core::{
    Action, ActionInstance, ActionRegistry, AttackReport, EntityId, EventGroup,
    ExecutionRecord, InstanceSnapshot, MaintenanceStatus, Tick, WorldState,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::repository::{ActionLog, ActionLogEntry};

/// Saved loadouts, by entity.
pub type LoadoutSnapshot = BTreeMap<EntityId, Vec<InstanceSnapshot>>;

/// Something that happened to a submitted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    ActionStarted {
        tick: Tick,
        record: ExecutionRecord,
    },
    ActionCompleted {
        tick: Tick,
        record: ExecutionRecord,
        /// `None` when the record was dropped as invalid.
        report: Option<AttackReport>,
    },
    ActionInterrupted {
        tick: Tick,
        record: ExecutionRecord,
    },
}

impl SessionEvent {
    pub fn record(&self) -> &ExecutionRecord {
        match self {
            Self::ActionStarted { record, .. }
            | Self::ActionCompleted { record, .. }
            | Self::ActionInterrupted { record, .. } => record,
        }
    }
}

/// Location of an equipped instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    entity: EntityId,
    index: usize,
}

#[derive(Debug, Clone)]
struct Resolving {
    slot: Slot,
    record: ExecutionRecord,
    started: Tick,
}

pub struct Session {
    world: WorldState,
    registry: ActionRegistry,
    loadouts: BTreeMap<EntityId, Vec<ActionInstance>>,
    prepped: Option<Slot>,
    resolving: Option<Resolving>,
    log: Option<Box<dyn ActionLog>>,
    events: Vec<SessionEvent>,
    tick: Tick,
    submitted: u64,
    config: RuntimeConfig,
}

impl Session {
    pub fn new(world: WorldState, registry: ActionRegistry, config: RuntimeConfig) -> Self {
        Self {
            world,
            registry,
            loadouts: BTreeMap::new(),
            prepped: None,
            resolving: None,
            log: None,
            events: Vec::new(),
            tick: Tick::ZERO,
            submitted: 0,
            config,
        }
    }

    /// Records every submitted record to `log`.
    pub fn with_log(mut self, log: impl ActionLog + 'static) -> Self {
        self.log = Some(Box::new(log));
        self
    }

    // ------------------------------------------------------------------------
    // Loadouts
    // ------------------------------------------------------------------------

    /// Equips a fresh instance of `name` on `entity`.
    ///
    /// Equipping an action the entity already has is a no-op.
    pub fn equip(&mut self, entity: EntityId, name: &str) -> Result<()> {
        self.require_entity(entity)?;
        if self.find_slot(entity, name).is_some() {
            debug!(%entity, action = name, "already equipped");
            return Ok(());
        }
        let instance = self.registry.make(name)?;
        self.loadouts.entry(entity).or_default().push(instance);
        debug!(%entity, action = name, "equipped");
        Ok(())
    }

    /// Equips every `(entity, names)` pair, e.g. a scenario's starting loadouts.
    pub fn equip_loadouts<'a, I>(&mut self, loadouts: I) -> Result<()>
    where
        I: IntoIterator<Item = (EntityId, &'a [String])>,
    {
        for (entity, names) in loadouts {
            for name in names {
                self.equip(entity, name)?;
            }
        }
        Ok(())
    }

    /// Removes `name` from `entity`'s loadout, dropping its runtime state.
    pub fn unequip(&mut self, entity: EntityId, name: &str) -> Result<()> {
        let slot = self.slot(entity, name)?;
        self.ensure_idle()?;
        if self.prepped.is_some_and(|p| p.entity == entity) {
            self.prepped = None;
        }
        if let Some(loadout) = self.loadouts.get_mut(&entity) {
            for instance in loadout.iter_mut() {
                instance.cancel();
            }
            loadout.remove(slot.index);
        }
        Ok(())
    }

    pub fn loadout(&self, entity: EntityId) -> &[ActionInstance] {
        self.loadouts.get(&entity).map_or(&[], Vec::as_slice)
    }

    pub fn action(&self, entity: EntityId, name: &str) -> Option<&ActionInstance> {
        let slot = self.find_slot(entity, name)?;
        self.instance(slot)
    }

    /// Names of the actions `entity` could prep right now.
    pub fn available_actions(&self, entity: EntityId) -> Vec<&str> {
        self.loadout(entity)
            .iter()
            .filter(|instance| instance.preppable(entity, &self.world))
            .map(|instance| instance.name())
            .collect()
    }

    pub fn snapshot_loadouts(&self) -> LoadoutSnapshot {
        self.loadouts
            .iter()
            .map(|(entity, loadout)| {
                (*entity, loadout.iter().map(ActionInstance::snapshot).collect())
            })
            .collect()
    }

    /// Replaces loadouts with instances rebuilt from `snapshot`.
    pub fn restore_loadouts(&mut self, snapshot: &LoadoutSnapshot) -> Result<()> {
        self.ensure_idle()?;
        let mut loadouts = BTreeMap::new();
        for (entity, instances) in snapshot {
            self.require_entity(*entity)?;
            let restored = instances
                .iter()
                .map(|s| self.registry.restore(s))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            loadouts.insert(*entity, restored);
        }
        self.loadouts = loadouts;
        self.prepped = None;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Action lifecycle
    // ------------------------------------------------------------------------

    /// Preps `name` for `entity`, cancelling whatever was prepped before.
    ///
    /// Returns false if the action's preconditions do not hold.
    pub fn prep(&mut self, entity: EntityId, name: &str) -> Result<bool> {
        let slot = self.slot(entity, name)?;
        self.ensure_idle()?;

        if let Some(previous) = self.prepped.take()
            && let Some(instance) = self.instance_mut(previous)
        {
            instance.cancel();
        }

        let Some(instance) = self
            .loadouts
            .get_mut(&slot.entity)
            .and_then(|l| l.get_mut(slot.index))
        else {
            return Err(RuntimeError::NotEquipped {
                entity,
                action: name.to_string(),
            });
        };

        if !instance.prep(entity, &mut self.world) {
            return Ok(false);
        }
        self.prepped = Some(slot);
        Ok(true)
    }

    /// Routes one input frame to the prepped action.
    ///
    /// A produced record is submitted immediately. Returns whether the input
    /// was consumed.
    pub fn handle_input(&mut self, events: &EventGroup) -> Result<bool> {
        let Some(slot) = self.prepped else {
            return Ok(false);
        };
        let Some(instance) = self
            .loadouts
            .get_mut(&slot.entity)
            .and_then(|l| l.get_mut(slot.index))
        else {
            return Ok(false);
        };

        let (consumed, record) = instance.handle_input(events, &self.world);
        if let Some(record) = record {
            self.submit(record)?;
        }
        Ok(consumed)
    }

    /// Asks `entity`'s `name` action for a record against `target`.
    pub fn ai_select(
        &mut self,
        entity: EntityId,
        name: &str,
        target: EntityId,
    ) -> Result<Option<ExecutionRecord>> {
        let slot = self.slot(entity, name)?;
        let world = &self.world;
        Ok(self
            .loadouts
            .get_mut(&slot.entity)
            .and_then(|loadout| loadout.get_mut(slot.index))
            .and_then(|instance| instance.ai_select(entity, target, world)))
    }

    /// Accepts a record for resolution and appends it to the log.
    ///
    /// The actor must exist and hold an instance of the record's kind and
    /// name.
    pub fn submit(&mut self, record: ExecutionRecord) -> Result<()> {
        if let Some(resolving) = &self.resolving {
            return Err(RuntimeError::Busy(resolving.record.to_string()));
        }
        self.require_entity(record.actor)?;
        let slot = self
            .find_slot(record.actor, &record.action.name)
            .filter(|slot| {
                self.instance(*slot)
                    .is_some_and(|instance| instance.kind() == record.action.kind)
            })
            .ok_or_else(|| RuntimeError::LoadoutMismatch {
                record: record.to_string(),
            })?;

        if let Some(log) = self.log.as_mut() {
            let entry = ActionLogEntry::new(self.submitted, self.tick, record.clone());
            log.append(&entry)?;
            log.flush()?;
        }
        self.submitted += 1;

        if let Some(previous) = self.prepped.take()
            && previous != slot
            && let Some(instance) = self.instance_mut(previous)
        {
            instance.cancel();
        }

        info!(tick = %self.tick, %record, "action started");
        self.events.push(SessionEvent::ActionStarted {
            tick: self.tick,
            record: record.clone(),
        });
        self.resolving = Some(Resolving {
            slot,
            record,
            started: self.tick,
        });
        Ok(())
    }

    /// Advances the simulation by one tick.
    ///
    /// Returns every event raised since the previous call.
    pub fn tick(&mut self, dt: u64) -> Vec<SessionEvent> {
        self.tick = self.tick + 1;

        if let Some(resolving) = self.resolving.take() {
            self.maintain(resolving, dt);
        }
        self.world.advance_animations();

        std::mem::take(&mut self.events)
    }

    fn maintain(&mut self, resolving: Resolving, dt: u64) {
        let Some(instance) = self
            .loadouts
            .get_mut(&resolving.slot.entity)
            .and_then(|l| l.get_mut(resolving.slot.index))
        else {
            warn!(record = %resolving.record, "resolving action vanished from loadout");
            return;
        };

        match instance.maintain(dt, &mut self.world, Some(&resolving.record)) {
            MaintenanceStatus::InProgress => self.resolving = Some(resolving),
            MaintenanceStatus::Complete => {
                let report = instance.last_report().cloned();
                instance.cancel();
                info!(
                    tick = %self.tick,
                    record = %resolving.record,
                    ticks = self.tick.0 - resolving.started.0,
                    resolved = report.is_some(),
                    "action completed"
                );
                self.events.push(SessionEvent::ActionCompleted {
                    tick: self.tick,
                    record: resolving.record,
                    report,
                });
            }
        }
    }

    /// Interrupts the resolving action if it allows it.
    ///
    /// Returns true if an action was interrupted.
    pub fn interrupt(&mut self) -> bool {
        let Some(resolving) = self.resolving.take() else {
            return false;
        };
        let Some(instance) = self
            .loadouts
            .get_mut(&resolving.slot.entity)
            .and_then(|l| l.get_mut(resolving.slot.index))
        else {
            return false;
        };

        if !instance.interrupt() {
            self.resolving = Some(resolving);
            return false;
        }
        instance.cancel();
        info!(tick = %self.tick, record = %resolving.record, "action interrupted");
        self.events.push(SessionEvent::ActionInterrupted {
            tick: self.tick,
            record: resolving.record,
        });
        true
    }

    /// Cancels the prepped action, if any.
    pub fn cancel(&mut self) -> Result<()> {
        self.ensure_idle()?;
        if let Some(slot) = self.prepped.take()
            && let Some(instance) = self.instance_mut(slot)
        {
            instance.cancel();
        }
        Ok(())
    }

    /// Ticks until the resolving action completes.
    pub fn run_to_completion(&mut self, max_ticks: u64) -> Result<Vec<SessionEvent>> {
        let mut events = std::mem::take(&mut self.events);
        let mut ticks = 0;
        while self.resolving.is_some() {
            if ticks >= max_ticks {
                return Err(RuntimeError::TickBudgetExceeded(max_ticks));
            }
            events.extend(self.tick(self.config.tick_ms));
            ticks += 1;
        }
        Ok(events)
    }

    /// Ticks until every sprite is idle.
    pub fn settle(&mut self, max_ticks: u64) -> Result<()> {
        let mut ticks = 0;
        while !self.world.animations_settled() || self.resolving.is_some() {
            if ticks >= max_ticks {
                return Err(RuntimeError::TickBudgetExceeded(max_ticks));
            }
            let events = self.tick(self.config.tick_ms);
            self.events.extend(events);
            ticks += 1;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    pub fn into_world(self) -> WorldState {
        self.world
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn is_busy(&self) -> bool {
        self.resolving.is_some()
    }

    /// Record currently resolving.
    pub fn resolving(&self) -> Option<&ExecutionRecord> {
        self.resolving.as_ref().map(|r| &r.record)
    }

    /// Entity and action name of the prepped action.
    pub fn prepped(&self) -> Option<(EntityId, &str)> {
        let slot = self.prepped?;
        self.instance(slot).map(|i| (slot.entity, i.name()))
    }

    pub fn log(&self) -> Option<&dyn ActionLog> {
        self.log.as_deref()
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn require_entity(&self, entity: EntityId) -> Result<()> {
        match self.world.get(entity) {
            Some(_) => Ok(()),
            None => Err(RuntimeError::UnknownEntity(entity)),
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        match &self.resolving {
            Some(resolving) => Err(RuntimeError::Busy(resolving.record.to_string())),
            None => Ok(()),
        }
    }

    fn find_slot(&self, entity: EntityId, name: &str) -> Option<Slot> {
        self.loadouts
            .get(&entity)?
            .iter()
            .position(|instance| instance.name() == name)
            .map(|index| Slot { entity, index })
    }

    fn slot(&self, entity: EntityId, name: &str) -> Result<Slot> {
        self.require_entity(entity)?;
        self.find_slot(entity, name)
            .ok_or_else(|| RuntimeError::NotEquipped {
                entity,
                action: name.to_string(),
            })
    }

    fn instance(&self, slot: Slot) -> Option<&ActionInstance> {
        self.loadouts.get(&slot.entity)?.get(slot.index)
    }

    fn instance_mut(&mut self, slot: Slot) -> Option<&mut ActionInstance> {
        self.loadouts.get_mut(&slot.entity)?.get_mut(slot.index)
    }
}

#[cfg(test)]
mod tests {
    use tactics_core::{
        ActionDefinition, ActionPhase, CombatConfig, CombatStats, DamageKind, EntityState,
        InputEvent, InputKey, Position, SideId, Sprite,
    };

    use super::*;
    use crate::repository::InMemoryActionLog;

    const HERO: EntityId = EntityId(1);
    const RAT: EntityId = EntityId(2);

    fn session() -> Session {
        let registry = ActionRegistry::from_definitions([
            ActionDefinition::new("Stab")
                .with_ap_cost(2)
                .with_strength(5)
                .with_range(1)
                .with_damage(3, DamageKind::Physical)
                .with_animation("stab"),
            ActionDefinition::new("Sling")
                .with_ap_cost(1)
                .with_ammo(2)
                .with_strength(5)
                .with_range(4)
                .with_damage(1, DamageKind::Physical)
                .with_animation("throw"),
        ])
        .unwrap();

        let mut world = WorldState::new(3, CombatConfig::default());
        world
            .spawn(
                EntityState::new(HERO, Position::ORIGIN, SideId::EXPLORERS)
                    .with_stats(CombatStats::new(4, 10, 0)),
            )
            .unwrap();
        world
            .spawn(
                EntityState::new(RAT, Position::new(1, 0), SideId::HAUNT)
                    .with_stats(CombatStats::new(2, 5, 0)),
            )
            .unwrap();

        let mut session = Session::new(world, registry, RuntimeConfig::default());
        session.equip(HERO, "Stab").unwrap();
        session.equip(HERO, "Sling").unwrap();
        session.equip(RAT, "Stab").unwrap();
        session
    }

    fn hp(session: &Session, id: EntityId) -> i32 {
        session.world().get(id).unwrap().stats.as_ref().unwrap().hp.current
    }

    #[test]
    fn input_flow_resolves_attack() {
        let log = InMemoryActionLog::default();
        let mut session = session().with_log(log.clone());

        assert!(session.prep(HERO, "Stab").unwrap());
        assert_eq!(session.prepped(), Some((HERO, "Stab")));
        session.world_mut().set_hovered(Some(RAT));

        let click = EventGroup::new().with(InputEvent::press(InputKey::PrimarySelect));
        assert!(session.handle_input(&click).unwrap());
        assert!(session.is_busy());
        assert_eq!(log.len(), 1);

        let events = session.run_to_completion(10).unwrap();
        assert!(matches!(events[0], SessionEvent::ActionStarted { .. }));
        let SessionEvent::ActionCompleted { report, .. } = &events[1] else {
            panic!("expected completion, got {events:?}");
        };
        assert!(report.as_ref().unwrap().hit);
        assert_eq!(hp(&session, RAT), 2);
        assert!(!session.is_busy());

        let stab = session.action(HERO, "Stab").unwrap();
        assert_eq!(stab.phase(), ActionPhase::Idle);
    }

    #[test]
    fn submit_rejects_foreign_records() {
        let mut session = session();
        let record = session.ai_select(HERO, "Sling", RAT).unwrap().unwrap();

        let mut forged = record.clone();
        forged.actor = RAT;
        assert!(matches!(
            session.submit(forged),
            Err(RuntimeError::LoadoutMismatch { .. })
        ));

        session.submit(record.clone()).unwrap();
        assert!(matches!(session.submit(record), Err(RuntimeError::Busy(_))));
    }

    #[test]
    fn interrupt_stops_waiting_attack() {
        let mut session = session();
        session
            .world_mut()
            .get_mut(RAT)
            .unwrap()
            .sprite_state_mut()
            .play("scurry");

        let record = session.ai_select(HERO, "Stab", RAT).unwrap().unwrap();
        session.submit(record).unwrap();
        let events = session.tick(16);
        assert_eq!(events.len(), 1);
        assert!(session.is_busy());

        assert!(session.interrupt());
        assert!(!session.is_busy());
        let events = session.tick(16);
        assert!(matches!(events[..], [SessionEvent::ActionInterrupted { .. }]));
        assert_eq!(hp(&session, RAT), 5);
    }

    #[test]
    fn available_actions_hide_unusable_ones() {
        let mut session = session();
        assert_eq!(session.available_actions(HERO), ["Stab", "Sling"]);

        session.world_mut().move_entity(RAT, Position::new(3, 0)).unwrap();
        assert_eq!(session.available_actions(HERO), ["Sling"]);
        assert!(!session.prep(HERO, "Stab").unwrap());
    }

    #[test]
    fn loadouts_survive_snapshot_and_restore() {
        let mut session = session();
        let record = session.ai_select(HERO, "Sling", RAT).unwrap().unwrap();
        session.submit(record).unwrap();
        session.run_to_completion(10).unwrap();

        let snapshot = session.snapshot_loadouts();
        assert_eq!(snapshot[&HERO][1].current_ammo, 1);

        session.unequip(HERO, "Sling").unwrap();
        assert_eq!(session.loadout(HERO).len(), 1);
        session.restore_loadouts(&snapshot).unwrap();
        assert_eq!(session.action(HERO, "Sling").unwrap().current_ammo(), 1);
    }

    #[test]
    fn unknown_entities_and_actions_are_errors() {
        let mut session = session();
        assert!(matches!(
            session.equip(EntityId(99), "Stab"),
            Err(RuntimeError::UnknownEntity(_))
        ));
        assert!(matches!(
            session.prep(RAT, "Sling"),
            Err(RuntimeError::NotEquipped { .. })
        ));
        assert!(matches!(
            session.equip(RAT, "Fireball"),
            Err(RuntimeError::Registry(_))
        ));
    }
}
