//! Content loaders for reading game data from files.
//!
//! Every loader has a `load(path)` entry point returning [`LoadResult`], and
//! most have an embedded variant backed by the files under `data/`.

pub mod config;
pub mod definitions;
pub mod scenario;

pub use config::ConfigLoader;
pub use definitions::{DefinitionLoader, build_registry};
pub use scenario::{Scenario, ScenarioEntity, ScenarioLoader, StatsSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
