//! Runtime orchestration for turn-based action resolution.
//!
//! This crate drives [`tactics_core`] actions over time. A [`Session`] owns
//! the world and every entity's loadout, accepts execution records (from
//! input or AI), and resolves them tick by tick. Accepted records are appended
//! to an [`ActionLog`] so a session can be replayed bit for bit.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the session driver and its events
//! - [`replay`] re-runs logged records against a starting world
//! - [`repository`] provides the action log backends
//! - [`config`] holds environment-driven runtime settings
pub mod config;
pub mod error;
pub mod replay;
pub mod repository;
pub mod session;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use replay::{Replay, replay, replay_log};
pub use repository::{
    ActionLog, ActionLogEntry, FileActionLog, FileRepository, InMemoryActionLog, RepositoryError,
    read_log_file,
};
pub use session::{LoadoutSnapshot, Session, SessionEvent};
