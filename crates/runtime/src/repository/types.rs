//! Action log entry type.

use serde::{Deserialize, Serialize};

use tactics_core::{ExecutionRecord, Tick};

/// One submitted execution record.
///
/// # Layout
///
/// Each entry is serialized using bincode and stored with a length prefix:
/// ```text
/// [u32 length][bincode serialized ActionLogEntry]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    /// Sequential submission number, starting at 0.
    pub nonce: u64,

    /// Session tick the record was submitted at.
    pub tick: Tick,

    pub record: ExecutionRecord,
}

impl ActionLogEntry {
    pub fn new(nonce: u64, tick: Tick, record: ExecutionRecord) -> Self {
        Self {
            nonce,
            tick,
            record,
        }
    }
}
