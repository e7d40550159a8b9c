//! Action domain - the lifecycle every usable action follows.
//!
//! An action is prepped for an actor, turned into an [`ExecutionRecord`] by
//! player input or AI selection, and then resolved by `maintain` across one or
//! more simulation ticks:
//!
//! ```text
//! Idle -> Prepped -> InputResolved -> Maintaining -> Complete
//!                                                 \-> Interrupted
//! ```
//!
//! # Module Structure
//!
//! - `definition`: Immutable per-kind configuration (`ActionDefinition`)
//! - `error`: Precondition, maintenance and registry errors
//! - `input`: Pre-resolved input events
//! - `instance`: `ActionInstance`, the enum dispatching over concrete kinds
//! - `kind`: `ActionKind` tag
//! - `kinds`: Concrete action implementations
//! - `record`: Execution records and their wire form
//! - `registry`: Name to maker registry built at startup
//! - `targeting`: Legal target resolution

pub mod definition;
pub mod error;
pub mod input;
pub mod instance;
pub mod kind;
pub mod kinds;
pub mod record;
pub mod registry;
pub mod targeting;

pub use definition::ActionDefinition;
pub use error::{ActionError, MaintainError, RegistryError};
pub use input::{EventGroup, InputEvent, InputKey, InputKind};
pub use instance::{ActionInstance, InstanceSnapshot};
pub use kind::ActionKind;
pub use kinds::BasicAttack;
pub use record::{ActionRef, ExecutionRecord, RecordCodecError};
pub use registry::{ActionMaker, ActionRegistry};
pub use targeting::find_targets;

use crate::env::World;
use crate::state::EntityId;

/// Outcome of one `maintain` step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MaintenanceStatus {
    /// Still waiting (e.g. on animations); call again next tick.
    InProgress,
    /// Finished, successfully or not. Further calls do nothing.
    Complete,
}

impl MaintenanceStatus {
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Lifecycle phase of an action instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionPhase {
    #[default]
    Idle,
    /// Actor bound and targets cached; waiting for input.
    Prepped,
    /// A record was produced from input.
    InputResolved,
    /// A record is bound and being resolved.
    Maintaining,
    Complete,
    Interrupted,
}

impl ActionPhase {
    /// True once resolution has ended one way or the other.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Interrupted)
    }
}

/// Contract implemented by every concrete action kind.
///
/// Precondition failures surface as `false` / `None`; maintenance failures are
/// logged and force [`MaintenanceStatus::Complete`]. Nothing here returns an
/// error to the caller.
pub trait Action {
    /// Definition name; also the registry key.
    fn name(&self) -> &str;

    fn kind(&self) -> ActionKind;

    fn phase(&self) -> ActionPhase;

    /// Action points spent per use.
    fn ap_cost(&self) -> i32;

    /// Remaining uses; -1 means unlimited.
    fn current_ammo(&self) -> i32;

    /// Legal targets cached by the last successful `prep`.
    fn targets(&self) -> &[EntityId];

    /// Whether the action can be readied for reaction use.
    fn readyable(&self) -> bool {
        false
    }

    /// True if `actor` could use this action right now. Pure.
    fn preppable<W: World>(&self, actor: EntityId, world: &W) -> bool;

    /// Binds `actor`, caches targets and maps sounds. Returns false without
    /// mutating anything if the action is not preppable.
    fn prep<W: World>(&mut self, actor: EntityId, world: &mut W) -> bool;

    /// Consumes one frame of input while prepped.
    ///
    /// Returns whether the input was consumed, and the record it produced.
    fn handle_input<W: World>(
        &mut self,
        events: &EventGroup,
        world: &W,
    ) -> (bool, Option<ExecutionRecord>);

    /// Produces a record for an AI-chosen target. Does not require `prep`.
    ///
    /// A Complete or Interrupted instance is reset first, so the record
    /// starts a new use instead of matching the finished one.
    fn ai_select<W: World>(
        &mut self,
        actor: EntityId,
        target: EntityId,
        world: &W,
    ) -> Option<ExecutionRecord>;

    /// Advances resolution by one tick.
    ///
    /// `Some(record)` binds the record (re-binding the same record is a no-op);
    /// `None` continues whatever is bound.
    fn maintain<W: World>(
        &mut self,
        dt: u64,
        world: &mut W,
        record: Option<&ExecutionRecord>,
    ) -> MaintenanceStatus;

    /// Asks the action to stop mid-resolution. Returns whether it agreed.
    fn interrupt(&mut self) -> bool;

    /// Drops transient state and returns to idle. Ammo and AP are untouched.
    fn cancel(&mut self);
}
