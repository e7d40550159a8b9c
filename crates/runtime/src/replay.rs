//! Deterministic replay of logged execution records.
//!
//! Replaying the records a session accepted, in order, against the world and
//! loadouts the session started from reproduces the session's final world.

use tracing::{debug, info};

use tactics_core::{ActionRegistry, ExecutionRecord, WorldState};

use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::repository::ActionLogEntry;
use crate::session::{LoadoutSnapshot, Session, SessionEvent};

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct Replay {
    pub world: WorldState,
    pub events: Vec<SessionEvent>,
}

/// Re-runs `records` in order from `world`.
///
/// Each record is driven to completion and the world is left to settle
/// before the next one is submitted. `config.max_ticks` bounds every step.
pub fn replay<I>(
    world: WorldState,
    registry: ActionRegistry,
    loadouts: &LoadoutSnapshot,
    records: I,
    config: &RuntimeConfig,
) -> Result<Replay>
where
    I: IntoIterator<Item = ExecutionRecord>,
{
    let mut session = Session::new(world, registry, config.clone());
    session.restore_loadouts(loadouts)?;

    let mut events = Vec::new();
    let mut count = 0usize;
    for record in records {
        debug!(%record, "replaying");
        session.submit(record)?;
        events.extend(session.run_to_completion(config.max_ticks)?);
        session.settle(config.max_ticks)?;
        count += 1;
    }

    info!(records = count, tick = %session.current_tick(), "replay finished");
    Ok(Replay {
        world: session.into_world(),
        events,
    })
}

/// Replays the records of a read-back action log.
pub fn replay_log(
    world: WorldState,
    registry: ActionRegistry,
    loadouts: &LoadoutSnapshot,
    entries: Vec<ActionLogEntry>,
    config: &RuntimeConfig,
) -> Result<Replay> {
    replay(
        world,
        registry,
        loadouts,
        entries.into_iter().map(|entry| entry.record),
        config,
    )
}
