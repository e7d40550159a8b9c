//! Enum dispatch over concrete action kinds.

use crate::action::{
    Action, ActionDefinition, ActionKind, ActionPhase, BasicAttack, EventGroup, ExecutionRecord,
    MaintenanceStatus,
};
use crate::combat::AttackReport;
use crate::env::World;
use crate::state::EntityId;

/// An equipped action of any kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionInstance {
    BasicAttack(BasicAttack),
}

/// Persistent part of an instance: enough to rebuild it from a registry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceSnapshot {
    pub name: String,
    pub kind: ActionKind,
    pub current_ammo: i32,
}

impl ActionInstance {
    pub fn definition(&self) -> &ActionDefinition {
        match self {
            Self::BasicAttack(attack) => attack.definition(),
        }
    }

    pub fn icon(&self) -> &str {
        match self {
            Self::BasicAttack(attack) => attack.icon(),
        }
    }

    pub fn last_report(&self) -> Option<&AttackReport> {
        match self {
            Self::BasicAttack(attack) => attack.last_report(),
        }
    }

    pub fn as_basic_attack(&self) -> Option<&BasicAttack> {
        match self {
            Self::BasicAttack(attack) => Some(attack),
        }
    }

    pub fn snapshot(&self) -> InstanceSnapshot {
        InstanceSnapshot {
            name: self.name().to_string(),
            kind: self.kind(),
            current_ammo: self.current_ammo(),
        }
    }

    pub(crate) fn with_current_ammo(self, current_ammo: i32) -> Self {
        match self {
            Self::BasicAttack(attack) => Self::BasicAttack(attack.with_current_ammo(current_ammo)),
        }
    }
}

impl From<BasicAttack> for ActionInstance {
    fn from(attack: BasicAttack) -> Self {
        Self::BasicAttack(attack)
    }
}

impl Action for ActionInstance {
    fn name(&self) -> &str {
        match self {
            Self::BasicAttack(a) => a.name(),
        }
    }

    fn kind(&self) -> ActionKind {
        match self {
            Self::BasicAttack(a) => a.kind(),
        }
    }

    fn phase(&self) -> ActionPhase {
        match self {
            Self::BasicAttack(a) => a.phase(),
        }
    }

    fn ap_cost(&self) -> i32 {
        match self {
            Self::BasicAttack(a) => a.ap_cost(),
        }
    }

    fn current_ammo(&self) -> i32 {
        match self {
            Self::BasicAttack(a) => a.current_ammo(),
        }
    }

    fn targets(&self) -> &[EntityId] {
        match self {
            Self::BasicAttack(a) => a.targets(),
        }
    }

    fn readyable(&self) -> bool {
        match self {
            Self::BasicAttack(a) => a.readyable(),
        }
    }

    fn preppable<W: World>(&self, actor: EntityId, world: &W) -> bool {
        match self {
            Self::BasicAttack(a) => a.preppable(actor, world),
        }
    }

    fn prep<W: World>(&mut self, actor: EntityId, world: &mut W) -> bool {
        match self {
            Self::BasicAttack(a) => a.prep(actor, world),
        }
    }

    fn handle_input<W: World>(
        &mut self,
        events: &EventGroup,
        world: &W,
    ) -> (bool, Option<ExecutionRecord>) {
        match self {
            Self::BasicAttack(a) => a.handle_input(events, world),
        }
    }

    fn ai_select<W: World>(
        &mut self,
        actor: EntityId,
        target: EntityId,
        world: &W,
    ) -> Option<ExecutionRecord> {
        match self {
            Self::BasicAttack(a) => a.ai_select(actor, target, world),
        }
    }

    fn maintain<W: World>(
        &mut self,
        dt: u64,
        world: &mut W,
        record: Option<&ExecutionRecord>,
    ) -> MaintenanceStatus {
        match self {
            Self::BasicAttack(a) => a.maintain(dt, world, record),
        }
    }

    fn interrupt(&mut self) -> bool {
        match self {
            Self::BasicAttack(a) => a.interrupt(),
        }
    }

    fn cancel(&mut self) {
        match self {
            Self::BasicAttack(a) => a.cancel(),
        }
    }
}
