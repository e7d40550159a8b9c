//! Data-driven content: action definitions, scenarios and combat tuning.
//!
//! Loaders read RON/TOML files into `tactics-core` types:
//! - Action definitions (RON, one `Vec<ActionDefinition>` per file)
//! - Scenarios: seed, blocked cells, entities and their loadouts (RON)
//! - Combat configuration (TOML)
//!
//! Content is consumed when a session is built and never appears in records.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, DefinitionLoader, LoadResult, Scenario, ScenarioEntity, ScenarioLoader,
    StatsSpec, build_registry,
};
