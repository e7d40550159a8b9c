//! Action log locations
//!
//! Logs live in the runtime's log directory (`TACTICS_LOG_DIR`, or the
//! platform data directory). Commands accept either a path or a bare file
//! name inside that directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use tactics_runtime::RuntimeConfig;

/// Extension of action log files
pub const LOG_EXTENSION: &str = "log";

/// Get the action log directory
pub fn log_dir() -> PathBuf {
    RuntimeConfig::from_env().log_dir
}

/// List all action logs in `dir`, newest first
pub fn list_logs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut logs = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read log directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() && path.extension().is_some_and(|ext| ext == LOG_EXTENSION) {
            let modified = entry.metadata()?.modified()?;
            logs.push((path, modified));
        }
    }

    // Sort by modification time (newest first), then name for stable output
    logs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Ok(logs.into_iter().map(|(path, _)| path).collect())
}

/// Resolve a log argument: an existing path, a name inside `dir`, or the
/// newest log in `dir` when omitted
pub fn resolve_log(dir: &Path, log: Option<&Path>) -> Result<PathBuf> {
    let Some(log) = log else {
        return list_logs(dir)?
            .into_iter()
            .next()
            .with_context(|| format!("No action logs found in {}", dir.display()));
    };

    if log.exists() {
        return Ok(log.to_path_buf());
    }

    let in_dir = dir.join(log);
    if in_dir.exists() {
        return Ok(in_dir);
    }

    anyhow::bail!("Action log not found: {}", log.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_log_prefers_explicit_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.log");
        std::fs::write(&path, []).unwrap();
        std::fs::write(dir.path().join("notes.txt"), []).unwrap();

        assert_eq!(resolve_log(dir.path(), Some(&path)).unwrap(), path);
        assert_eq!(resolve_log(dir.path(), Some(Path::new("a.log"))).unwrap(), path);
        assert_eq!(resolve_log(dir.path(), None).unwrap(), path);
        assert!(resolve_log(dir.path(), Some(Path::new("missing.log"))).is_err());
    }

    #[test]
    fn missing_directory_has_no_logs() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_logs(&dir.path().join("nope")).unwrap().is_empty());
        assert!(resolve_log(&dir.path().join("nope"), None).is_err());
    }
}
