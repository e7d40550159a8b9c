//! Errors surfaced by sessions and replay.

use thiserror::Error;

use tactics_core::{EntityId, ErrorSeverity, GameError, RegistryError, StateError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("entity {0} not found")]
    UnknownEntity(EntityId),

    #[error("entity {entity} has no '{action}' equipped")]
    NotEquipped { entity: EntityId, action: String },

    #[error("record '{record}' does not match the actor's loadout")]
    LoadoutMismatch { record: String },

    #[error("session is busy resolving '{0}'")]
    Busy(String),

    #[error("action did not complete within {0} ticks")]
    TickBudgetExceeded(u64),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Repository(_) => ErrorSeverity::Fatal,
            Self::Registry(e) => e.severity(),
            Self::State(e) => e.severity(),
            Self::UnknownEntity(_) | Self::NotEquipped { .. } => ErrorSeverity::Validation,
            Self::LoadoutMismatch { .. } | Self::TickBudgetExceeded(_) => ErrorSeverity::Internal,
            Self::Busy(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::Registry(e) => e.error_code(),
            Self::State(e) => e.error_code(),
            Self::UnknownEntity(_) => "RUNTIME_UNKNOWN_ENTITY",
            Self::NotEquipped { .. } => "RUNTIME_NOT_EQUIPPED",
            Self::LoadoutMismatch { .. } => "RUNTIME_LOADOUT_MISMATCH",
            Self::Busy(_) => "RUNTIME_BUSY",
            Self::TickBudgetExceeded(_) => "RUNTIME_TICK_BUDGET_EXCEEDED",
        }
    }
}
