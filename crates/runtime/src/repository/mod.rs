//! Repository layer for execution records.
//!
//! Records are append-only: a session appends one [`ActionLogEntry`] per
//! submitted record, and replay tooling reads them back in order.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::{FileActionLog, FileRepository, read_log_file};
pub use memory::InMemoryActionLog;
pub use traits::ActionLog;
pub use types::ActionLogEntry;
