//! Deterministic turn-based action framework.
//!
//! `tactics-core` defines how an action moves from "available" to "resolved":
//! precondition checks, target selection, input and AI record production, and
//! tick-driven resolution against a world reached only through the
//! collaborator traits in [`env`]. [`state::WorldState`] is a serializable
//! reference world used by the runtime, replay tooling and tests.
pub mod action;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod state;

pub use action::{
    Action, ActionDefinition, ActionError, ActionInstance, ActionKind, ActionPhase, ActionRef,
    ActionRegistry, BasicAttack, EventGroup, ExecutionRecord, InputEvent, InputKey, InputKind,
    InstanceSnapshot, MaintainError, MaintenanceStatus, RegistryError, find_targets,
};
pub use combat::{AttackReport, Condition, DamageKind, DefenderCue};
pub use config::CombatConfig;
pub use env::{Entity, Sprite, Stats, SyncCommand, World};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    CombatStats, EntityId, EntityState, Facing, Position, SideId, StateError, Tick, WorldState,
};
