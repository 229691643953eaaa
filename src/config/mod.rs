//! Configuration management.
//!
//! spec-tracker has no config file. The only setting is where the store
//! lives, resolved per invocation from the command line, the environment,
//! and the directory tree.

use std::path::{Path, PathBuf};

/// Name of the per-project directory holding the store.
pub const PROJECT_DIR: &str = ".spec-tracker";

/// File name of the store inside [`PROJECT_DIR`].
pub const STORE_FILE: &str = "tasks.csv";

/// Environment variable overriding the store path.
pub const STORE_ENV: &str = "ST_STORE";

/// Walk up from `start` looking for an existing [`PROJECT_DIR`].
#[must_use]
pub fn discover_project_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_DIR))
        .find(|candidate| candidate.is_dir())
}

/// Resolve the store path.
///
/// Priority:
/// 1. `explicit_path` (positional `[store]` or `--store`)
/// 2. `ST_STORE` environment variable
/// 3. `.spec-tracker/tasks.csv` in the nearest ancestor that has one
/// 4. `.spec-tracker/tasks.csv` under the current directory (created on
///    first save)
#[must_use]
pub fn resolve_store_path(explicit_path: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit_path {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(STORE_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    discover_project_dir(&cwd)
        .unwrap_or_else(|| cwd.join(PROJECT_DIR))
        .join(STORE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_store_path_with_explicit() {
        let explicit = PathBuf::from("/custom/path/tasks.csv");
        assert_eq!(resolve_store_path(Some(&explicit)), explicit);
    }

    #[test]
    fn test_resolve_store_path_default_file_name() {
        // Without an explicit path the result always ends in the store file
        // name, whether it came from the environment or discovery.
        let path = resolve_store_path(None);
        if std::env::var(STORE_ENV).is_err() {
            assert!(path.ends_with(Path::new(PROJECT_DIR).join(STORE_FILE)));
        }
    }

    #[test]
    fn test_discover_project_dir_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join(PROJECT_DIR);
        std::fs::create_dir(&project).unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(discover_project_dir(&nested), Some(project));
    }

    #[test]
    fn test_discover_project_dir_ignores_files() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(PROJECT_DIR), "not a dir").unwrap();

        let found = discover_project_dir(temp_dir.path());
        assert_ne!(found, Some(temp_dir.path().join(PROJECT_DIR)));
    }
}
