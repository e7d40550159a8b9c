//! File-based repository implementations.

mod log;

pub use log::{FileActionLog, FileRepository, read_log_file};
