//! In-memory action log.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::repository::traits::ActionLog;
use crate::repository::{ActionLogEntry, RepositoryError, Result};

/// Action log kept in memory.
///
/// Clones share the same entries, so a test can hand one clone to a session
/// and inspect the other.
#[derive(Debug, Clone)]
pub struct InMemoryActionLog {
    entries: Arc<Mutex<Vec<ActionLogEntry>>>,
    session_id: String,
}

impl InMemoryActionLog {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            session_id: session_id.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<ActionLogEntry>>> {
        self.entries.lock().map_err(|_| RepositoryError::LockPoisoned)
    }
}

impl Default for InMemoryActionLog {
    fn default() -> Self {
        Self::new("memory")
    }
}

impl ActionLog for InMemoryActionLog {
    fn append(&mut self, entry: &ActionLogEntry) -> Result<u64> {
        let mut entries = self.lock()?;
        entries.push(entry.clone());
        Ok(entries.len() as u64 - 1)
    }

    fn read_all(&self) -> Result<Vec<ActionLogEntry>> {
        Ok(self.lock()?.clone())
    }

    fn size(&self) -> Result<u64> {
        Ok(self.lock()?.len() as u64)
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }
}
