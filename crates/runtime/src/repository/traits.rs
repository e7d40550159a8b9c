//! Repository contracts.

use crate::repository::{ActionLogEntry, Result};

/// Append-only log of submitted execution records.
pub trait ActionLog: Send {
    /// Append an entry.
    ///
    /// Returns the position the entry was written at (byte offset for files,
    /// index for memory).
    fn append(&mut self, entry: &ActionLogEntry) -> Result<u64>;

    /// Every entry in append order.
    fn read_all(&self) -> Result<Vec<ActionLogEntry>>;

    /// Persist buffered writes.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Current size of the log (bytes for files, entries for memory).
    fn size(&self) -> Result<u64>;

    /// Log identifier (file name for files).
    fn session_id(&self) -> &str;
}
