//! Runtime configuration.

use std::env;
use std::path::PathBuf;

/// Settings shared by sessions, replay and the action log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Overrides the attack roll seed of newly built worlds.
    pub seed: Option<u64>,
    /// Ticks an action may take before `run_to_completion` gives up.
    pub max_ticks: u64,
    /// Simulated milliseconds per tick, passed to `maintain` as `dt`.
    pub tick_ms: u64,
    /// Directory holding action logs.
    pub log_dir: PathBuf,
}

impl RuntimeConfig {
    pub const DEFAULT_MAX_TICKS: u64 = 600;
    pub const DEFAULT_TICK_MS: u64 = 16;

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_SEED` - attack roll seed override (default: the scenario's)
    /// - `TACTICS_MAX_TICKS` - per-action tick budget (default: 600)
    /// - `TACTICS_TICK_MS` - tick length in milliseconds (default: 16)
    /// - `TACTICS_LOG_DIR` - action log directory (default: platform data dir)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("TACTICS_SEED") {
            config.seed = Some(seed);
        }
        if let Some(max_ticks) = read_env::<u64>("TACTICS_MAX_TICKS") {
            config.max_ticks = max_ticks.max(1);
        }
        if let Some(tick_ms) = read_env::<u64>("TACTICS_TICK_MS") {
            config.tick_ms = tick_ms;
        }
        if let Some(log_dir) = read_env::<PathBuf>("TACTICS_LOG_DIR") {
            config.log_dir = log_dir;
        }

        config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_ticks: Self::DEFAULT_MAX_TICKS,
            tick_ms: Self::DEFAULT_TICK_MS,
            log_dir: default_log_dir(),
        }
    }
}

/// Platform data directory (`.../tactics/logs`), or `./logs` when unknown.
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "tactics")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = RuntimeConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.max_ticks, RuntimeConfig::DEFAULT_MAX_TICKS);
        assert!(config.log_dir.ends_with("logs"));
    }

    #[test]
    fn builders_override_fields() {
        let config = RuntimeConfig::default()
            .with_seed(9)
            .with_max_ticks(5)
            .with_log_dir("/tmp/x");
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_ticks, 5);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/x"));
    }
}
