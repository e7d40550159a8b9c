//! Execution records - the unit of replay and network sync.
//!
//! A record says who used which action on whom. It holds ids only, so it can
//! be logged, sent and replayed after the world has been rebuilt from state.

use std::fmt;

use crate::action::ActionKind;
use crate::state::EntityId;

/// Identity of the action that produced a record.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRef {
    pub kind: ActionKind,
    /// Definition name (registry key).
    pub name: String,
}

impl ActionRef {
    pub fn new(kind: ActionKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for ActionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

/// One action invocation: `actor` used `action` on `target`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionRecord {
    pub actor: EntityId,
    pub target: EntityId,
    pub action: ActionRef,
}

impl ExecutionRecord {
    pub fn new(actor: EntityId, target: EntityId, action: ActionRef) -> Self {
        Self {
            actor,
            target,
            action,
        }
    }
}

impl fmt::Display for ExecutionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.action, self.actor, self.target)
    }
}

// ============================================================================
// Wire Form
// ============================================================================

/// Failure to encode or decode a record.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("record codec error: {0}")]
pub struct RecordCodecError(pub String);

#[cfg(feature = "serde")]
impl ExecutionRecord {
    /// Encodes the record with bincode (fixed field order, little-endian).
    pub fn to_bytes(&self) -> Result<Vec<u8>, RecordCodecError> {
        bincode::serialize(self).map_err(|e| RecordCodecError(e.to_string()))
    }

    /// Decodes a record without any world reference.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordCodecError> {
        bincode::deserialize(bytes).map_err(|e| RecordCodecError(e.to_string()))
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    fn record() -> ExecutionRecord {
        ExecutionRecord::new(
            EntityId(3),
            EntityId(9),
            ActionRef::new(ActionKind::BasicAttack, "Claw"),
        )
    }

    #[test]
    fn wire_form_is_stable() {
        // actor u32, target u32, kind variant u32, name len u64, name bytes
        let bytes = record().to_bytes().unwrap();
        assert_eq!(
            hex::encode(&bytes),
            concat!("03000000", "09000000", "00000000", "0400000000000000", "436c6177")
        );
        assert_eq!(ExecutionRecord::from_bytes(&bytes).unwrap(), record());
    }

    #[test]
    fn truncated_bytes_are_rejected() {
        let bytes = record().to_bytes().unwrap();
        assert!(ExecutionRecord::from_bytes(&bytes[..bytes.len() - 2]).is_err());
    }
}
