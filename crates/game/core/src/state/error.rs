//! World state errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

/// Errors raised while building or editing the reference world.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// An entity with this id already exists.
    #[error("entity {0} already exists")]
    DuplicateEntity(EntityId),

    /// No entity with this id exists.
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    /// Destination cell is blocked terrain.
    #[error("cell {0} is blocked")]
    Blocked(Position),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicateEntity(_) => ErrorSeverity::Internal,
            Self::EntityNotFound(_) => ErrorSeverity::Validation,
            Self::Blocked(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateEntity(_) => "STATE_DUPLICATE_ENTITY",
            Self::EntityNotFound(_) => "STATE_ENTITY_NOT_FOUND",
            Self::Blocked(_) => "STATE_BLOCKED",
        }
    }
}
