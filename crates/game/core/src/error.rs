//! Common error infrastructure for tactics-core.
//!
//! Domain-specific errors (`ActionError`, `MaintainError`, `StateError`, ...)
//! live next to the code that raises them and classify themselves through
//! [`GameError`].

/// Severity level of an error, used for categorization and logging.
///
/// - **Recoverable**: the situation may change (more AP next turn, target moves)
/// - **Validation**: the request itself is wrong and should not be retried
/// - **Internal**: state is inconsistent with the request (stale replay, desync)
/// - **Fatal**: the simulation cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - may succeed later or with another choice.
    ///
    /// Examples: not enough action points, target out of range
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown action name, record for a different action
    Validation,

    /// Internal error - state disagrees with a produced record.
    ///
    /// Examples: record names a dead target, actor vanished before resolution
    Internal,

    /// Fatal error - cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates desync or a bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tactics-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log filtering and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
