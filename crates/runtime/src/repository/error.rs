//! Failures raised while appending to or reading an action log.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("action log I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// An entry could not be bincode-encoded into a frame.
    #[error("cannot encode log entry: {0}")]
    Encode(String),

    #[error("frame at offset {offset} does not decode: {reason}")]
    Decode { offset: u64, reason: String },

    /// The file ends partway through the frame starting at `offset`.
    #[error("truncated frame at offset {offset}")]
    TruncatedFrame { offset: u64 },

    #[error("action log {} already exists", .0.display())]
    LogExists(PathBuf),

    #[error("offset {offset} lies past the end of the log ({file_size} bytes)")]
    OffsetPastEnd { offset: u64, file_size: u64 },

    #[error("in-memory action log lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
