//! Combat configuration loader.

use std::path::Path;

use tactics_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`CombatConfig`] from a TOML file.
    ///
    /// Missing keys fall back to the defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
    }

    /// Tuning shipped with the crate (`data/combat.toml`).
    pub fn embedded() -> LoadResult<CombatConfig> {
        Self::parse(include_str!("../../data/combat.toml"))
    }

    fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)?;
        if config.hit_max > 100 {
            anyhow::bail!("hit_max ({}) is a percentage and cannot exceed 100", config.hit_max);
        }
        if config.hit_min > config.hit_max {
            anyhow::bail!(
                "hit_min ({}) exceeds hit_max ({})",
                config.hit_min,
                config.hit_max
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("hit_base = 40\n").unwrap();
        assert_eq!(config.hit_base, 40);
        assert_eq!(config.hit_per_point, CombatConfig::DEFAULT_HIT_PER_POINT);
        assert_eq!(config.hit_max, 100);
    }

    #[test]
    fn inverted_clamp_is_rejected() {
        assert!(ConfigLoader::parse("hit_min = 90\nhit_max = 10\n").is_err());
    }

    #[test]
    fn hit_max_above_certainty_is_rejected() {
        assert!(ConfigLoader::parse("hit_max = 3000000000\n").is_err());
        assert!(ConfigLoader::parse("hit_max = 101\n").is_err());
        assert!(ConfigLoader::parse("hit_max = 100\n").is_ok());
    }

    #[test]
    fn embedded_config_parses() {
        let config = ConfigLoader::embedded().unwrap();
        assert_eq!(config.hit_min, 5);
        assert_eq!(config.hit_max, 95);
        assert_eq!(config.vision_radius, 12);
    }
}
