//! Action errors.
//!
//! Precondition failures never escape the action contract (they surface as
//! `false`/`None`), but are computed as [`ActionError`] so they can be logged
//! and tested. Maintenance failures are [`MaintainError`]s: logged at error
//! level, after which the action is forced to complete.

use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

// ============================================================================
// Precondition Errors
// ============================================================================

/// Reasons an action declines to prep or to produce an execution record.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// Acting entity not found in the world.
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    /// Acting entity has no combat stats.
    #[error("actor {0} has no combat stats")]
    ActorWithoutStats(EntityId),

    /// Target not found in the world.
    #[error("target {0} not found")]
    TargetNotFound(EntityId),

    /// Target cannot be attacked (no combat stats).
    #[error("target {0} has no combat stats")]
    TargetWithoutStats(EntityId),

    /// Target health is zero or less.
    #[error("target {0} is not living")]
    TargetNotLiving(EntityId),

    /// Actor and target share a side.
    #[error("target {0} is on the actor's side")]
    SameSide(EntityId),

    /// Target is farther than the action's range.
    #[error("target at distance {distance} exceeds range {range}")]
    OutOfRange { distance: i32, range: i32 },

    /// Actor cannot see the target's cell.
    #[error("no line of sight to target {0}")]
    NoLineOfSight(EntityId),

    /// No ammo left.
    #[error("out of ammo")]
    OutOfAmmo,

    /// Actor lacks action points.
    #[error("requires {required} action points, {available} available")]
    InsufficientActionPoints { required: i32, available: i32 },

    /// Nothing in range, in sight and alive.
    #[error("no legal targets")]
    NoTargets,

    /// Input arrived while the action was not prepped.
    #[error("action is not prepped")]
    NotPrepped,

    /// Action is mid-resolution and cannot be re-prepped.
    #[error("action is still resolving")]
    Busy,
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            ActorNotFound(_) | TargetNotFound(_) => ErrorSeverity::Validation,
            ActorWithoutStats(_) | TargetWithoutStats(_) | SameSide(_) => {
                ErrorSeverity::Validation
            }
            TargetNotLiving(_) | OutOfRange { .. } | NoLineOfSight(_) => {
                ErrorSeverity::Recoverable
            }
            OutOfAmmo | InsufficientActionPoints { .. } | NoTargets => ErrorSeverity::Recoverable,
            NotPrepped | Busy => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            ActorWithoutStats(_) => "ACTION_ACTOR_WITHOUT_STATS",
            TargetNotFound(_) => "ACTION_TARGET_NOT_FOUND",
            TargetWithoutStats(_) => "ACTION_TARGET_WITHOUT_STATS",
            TargetNotLiving(_) => "ACTION_TARGET_NOT_LIVING",
            SameSide(_) => "ACTION_SAME_SIDE",
            OutOfRange { .. } => "ACTION_OUT_OF_RANGE",
            NoLineOfSight(_) => "ACTION_NO_LINE_OF_SIGHT",
            OutOfAmmo => "ACTION_OUT_OF_AMMO",
            InsufficientActionPoints { .. } => "ACTION_INSUFFICIENT_AP",
            NoTargets => "ACTION_NO_TARGETS",
            NotPrepped => "ACTION_NOT_PREPPED",
            Busy => "ACTION_BUSY",
        }
    }
}

// ============================================================================
// Maintenance Errors
// ============================================================================

/// Invariant violations found while resolving an execution record.
///
/// These indicate a stale, replayed-out-of-order or desynchronized record.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaintainError {
    /// Record names an actor missing from the world.
    #[error("record actor {0} not found")]
    ActorNotFound(EntityId),

    /// Record names a target missing from the world.
    #[error("record target {0} not found")]
    TargetNotFound(EntityId),

    /// Record names an entity without combat stats.
    #[error("entity {0} has no combat stats")]
    MissingStats(EntityId),

    /// Actor lacks the action points the action costs.
    #[error("record requires {required} action points, {available} available")]
    InsufficientActionPoints { required: i32, available: i32 },

    /// Target was already dead when the record was consumed.
    #[error("record attacks non-living target {0}")]
    TargetNotLiving(EntityId),

    /// Target moved out of range before the record was consumed.
    #[error("record target at distance {distance} exceeds range {range}")]
    OutOfRange { distance: i32, range: i32 },

    /// Record was produced by a different action.
    #[error("record for {found} handed to {expected}")]
    ForeignRecord { expected: String, found: String },

    /// `maintain` ran with no record given and none bound.
    #[error("no execution record bound")]
    NothingBound,
}

impl GameError for MaintainError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ForeignRecord { .. } | Self::NothingBound => ErrorSeverity::Validation,
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "MAINTAIN_ACTOR_NOT_FOUND",
            Self::TargetNotFound(_) => "MAINTAIN_TARGET_NOT_FOUND",
            Self::MissingStats(_) => "MAINTAIN_MISSING_STATS",
            Self::InsufficientActionPoints { .. } => "MAINTAIN_INSUFFICIENT_AP",
            Self::TargetNotLiving(_) => "MAINTAIN_TARGET_NOT_LIVING",
            Self::OutOfRange { .. } => "MAINTAIN_OUT_OF_RANGE",
            Self::ForeignRecord { .. } => "MAINTAIN_FOREIGN_RECORD",
            Self::NothingBound => "MAINTAIN_NOTHING_BOUND",
        }
    }
}

// ============================================================================
// Registry Errors
// ============================================================================

/// Errors raised while populating an [`ActionRegistry`](crate::action::ActionRegistry).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A maker with this name is already registered.
    #[error("action '{0}' is already registered")]
    Duplicate(String),

    /// Snapshot or record names an action that is not registered.
    #[error("action '{0}' is not registered")]
    Unknown(String),

    /// Snapshot ammo that the definition cannot hold. `capacity` is -1 for
    /// unlimited actions.
    #[error("action '{name}' cannot hold {current_ammo} ammo (capacity {capacity})")]
    InvalidAmmo {
        name: String,
        current_ammo: i32,
        capacity: i32,
    },
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Duplicate(_) => "REGISTRY_DUPLICATE",
            Self::Unknown(_) => "REGISTRY_UNKNOWN",
            Self::InvalidAmmo { .. } => "REGISTRY_INVALID_AMMO",
        }
    }
}
