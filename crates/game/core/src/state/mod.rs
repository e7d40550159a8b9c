//! Reference world state.
//!
//! A concrete, serializable implementation of the collaborator traits in
//! [`crate::env`]: entities with stats, sprites driven by ticks, cell-based
//! vision and seeded attack rolls. The runtime, replay tooling and tests run
//! actions against it; a game engine may substitute its own world.
mod common;
mod entity;
mod error;
mod sprite;
mod world;

pub use common::{EntityId, Facing, Position, SideId, Tick};
pub use entity::{CombatInfo, CombatStats, Conditions, EntityState, ResourceMeter};
pub use error::StateError;
pub use sprite::SpriteState;
pub use world::WorldState;
