//! Action definition loader.
//!
//! Loads `Vec<ActionDefinition>` from RON files and validates it before any
//! registry is built from it.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use tactics_core::{ActionDefinition, ActionRegistry};

use crate::loaders::{LoadResult, read_file};

/// Loader for action definitions from RON files.
pub struct DefinitionLoader;

impl DefinitionLoader {
    /// Load and validate the definitions in one RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<ActionDefinition>> {
        let content = read_file(path)?;
        let definitions = Self::parse(&content)
            .with_context(|| format!("Failed to parse definitions {}", path.display()))?;
        validate(&definitions)
            .with_context(|| format!("Invalid definitions in {}", path.display()))?;
        Ok(definitions)
    }

    /// Load every `*.ron` file in `dir`, in file name order.
    ///
    /// Names must be unique across all files.
    pub fn load_dir(dir: &Path) -> LoadResult<Vec<ActionDefinition>> {
        let mut paths = Vec::new();
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut definitions = Vec::new();
        for path in &paths {
            let loaded = Self::load(path)?;
            tracing::debug!(file = %path.display(), count = loaded.len(), "loaded definitions");
            definitions.extend(loaded);
        }
        validate(&definitions)
            .with_context(|| format!("Invalid definitions in {}", dir.display()))?;
        Ok(definitions)
    }

    /// Definitions shipped with the crate (`data/actions`).
    pub fn embedded() -> LoadResult<Vec<ActionDefinition>> {
        let mut definitions = Self::parse(include_str!("../../data/actions/melee.ron"))
            .context("Failed to parse melee.ron")?;
        definitions.extend(
            Self::parse(include_str!("../../data/actions/ranged.ron"))
                .context("Failed to parse ranged.ron")?,
        );
        validate(&definitions)?;
        Ok(definitions)
    }

    fn parse(content: &str) -> LoadResult<Vec<ActionDefinition>> {
        Ok(ron::from_str(content)?)
    }
}

/// Registers every definition as a basic attack.
pub fn build_registry(definitions: Vec<ActionDefinition>) -> LoadResult<ActionRegistry> {
    ActionRegistry::from_definitions(definitions).context("Failed to build action registry")
}

fn validate(definitions: &[ActionDefinition]) -> LoadResult<()> {
    let mut seen = BTreeSet::new();
    for def in definitions {
        if def.name.trim().is_empty() {
            anyhow::bail!("definition with empty name");
        }
        if !seen.insert(def.name.as_str()) {
            anyhow::bail!("duplicate definition '{}'", def.name);
        }
        let fields = [
            ("ap_cost", def.ap_cost),
            ("ammo", def.ammo),
            ("strength", def.strength),
            ("range", def.range),
            ("damage", def.damage),
        ];
        if let Some((field, value)) = fields.iter().find(|(_, value)| *value < 0) {
            anyhow::bail!("'{}': {} must not be negative (got {})", def.name, field, value);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tactics_core::DamageKind;

    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        let mut file = std::fs::File::create(dir.join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn embedded_definitions_load() {
        let defs = DefinitionLoader::embedded().unwrap();
        let claw = defs.iter().find(|d| d.name == "Claw").unwrap();
        assert_eq!(claw.ap_cost, 2);
        assert_eq!(claw.ammo, 0);
        assert_eq!(claw.initial_ammo(), -1);
        assert_eq!(claw.conditions, ["bleeding"]);
        assert_eq!(claw.sounds.len(), 2);

        let flare = defs.iter().find(|d| d.name == "Flare").unwrap();
        assert_eq!(flare.damage_kind, DamageKind::Fire);

        let registry = build_registry(defs).unwrap();
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn load_dir_merges_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.ron", r#"[(name: "Zap", range: 3)]"#);
        write(dir.path(), "a.ron", r#"[(name: "Axe", ap_cost: 2)]"#);
        write(dir.path(), "notes.txt", "not a definition");

        let defs = DefinitionLoader::load_dir(dir.path()).unwrap();
        let names: Vec<_> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Axe", "Zap"]);
    }

    #[test]
    fn duplicates_across_files_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.ron", r#"[(name: "Axe")]"#);
        write(dir.path(), "b.ron", r#"[(name: "Axe")]"#);

        let err = DefinitionLoader::load_dir(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate definition 'Axe'"));
    }

    #[test]
    fn negative_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "bad.ron", r#"[(name: "Oops", range: -1)]"#);

        let err = DefinitionLoader::load(&dir.path().join("bad.ron")).unwrap_err();
        assert!(format!("{err:#}").contains("range must not be negative"));
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(validate(&[ActionDefinition::new("  ")]).is_err());
    }
}
