//! Matrix file discovery and loading.
//!
//! This module handles finding and loading the matrix files from a project
//! tree in the correct priority order.

use crate::config::merger::merge_configs;
use crate::config::schema::MatrixConfig;
use crate::error::{FactoError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Canonical matrix file name.
pub const MATRIX_FILE: &str = "facto.yml";

/// Local (not checked in) overlay file name.
pub const LOCAL_FILE: &str = "facto.local.yml";

/// Paths to matrix files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. Project matrix (`facto.yml`)
/// 2. Local overrides (`facto.local.yml`)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project matrix: facto.yml
    pub project: Option<PathBuf>,

    /// Local overrides: facto.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover matrix files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(MATRIX_FILE)),
            project_local: existing(project_root.join(LOCAL_FILE)),
        }
    }

    /// Use an explicit matrix file, with its sibling local overlay.
    pub fn explicit(path: &Path) -> Self {
        let local = path
            .parent()
            .map(|dir| dir.join(LOCAL_FILE))
            .and_then(existing);
        Self {
            project: Some(path.to_path_buf()),
            project_local: local,
        }
    }

    /// Returns all existing matrix paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        let mut paths = Vec::new();

        if let Some(p) = &self.project {
            paths.push(p);
        }

        if let Some(p) = &self.project_local {
            paths.push(p);
        }

        paths
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Find the project root by walking up from the starting directory.
///
/// Looks for:
/// 1. `facto.yml` (primary indicator)
/// 2. `.git` directory (fallback)
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(MATRIX_FILE).is_file() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single matrix file into an untyped YAML value.
fn load_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FactoError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            FactoError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| FactoError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge all matrix files for a project root.
///
/// # Errors
///
/// Returns `ConfigNotFound` when no `facto.yml` exists, `ConfigParse` when
/// any layer is invalid YAML or does not match the schema.
pub fn load_merged_config(project_root: &Path) -> Result<MatrixConfig> {
    load_from_paths(&ConfigPaths::discover(project_root), project_root)
}

/// Load and merge the given matrix paths.
pub fn load_from_paths(paths: &ConfigPaths, project_root: &Path) -> Result<MatrixConfig> {
    let project_path = paths
        .project
        .clone()
        .ok_or_else(|| FactoError::ConfigNotFound {
            path: project_root.join(MATRIX_FILE),
        })?;

    let mut values = vec![load_value(&project_path)?];
    if let Some(local) = &paths.project_local {
        tracing::debug!("applying local overlay: {}", local.display());
        values.push(load_value(local)?);
    }

    let merged = merge_configs(&values);
    serde_yaml::from_value(merged).map_err(|e| FactoError::ConfigParse {
        path: project_path,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_matrix(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn discover_finds_project_matrix() {
        let temp = TempDir::new().unwrap();
        write_matrix(temp.path(), MATRIX_FILE, "project:\n  name: stcal\n");

        let paths = ConfigPaths::discover(temp.path());

        assert!(paths.project.is_some());
        assert!(paths.project_local.is_none());
    }

    #[test]
    fn discover_finds_local_overlay() {
        let temp = TempDir::new().unwrap();
        write_matrix(temp.path(), MATRIX_FILE, "{}");
        write_matrix(temp.path(), LOCAL_FILE, "{}");

        let paths = ConfigPaths::discover(temp.path());

        assert_eq!(paths.all_existing().len(), 2);
    }

    #[test]
    fn find_project_root_walks_up() {
        let temp = TempDir::new().unwrap();
        write_matrix(temp.path(), MATRIX_FILE, "{}");
        let nested = temp.path().join("src").join("dark_current");
        fs::create_dir_all(&nested).unwrap();

        let root = find_project_root(&nested).unwrap();

        assert_eq!(root, temp.path());
    }

    #[test]
    fn find_project_root_falls_back_to_git() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        let nested = temp.path().join("docs");
        fs::create_dir_all(&nested).unwrap();

        let root = find_project_root(&nested).unwrap();

        assert_eq!(root, temp.path());
    }

    #[test]
    fn load_merged_config_missing_is_config_not_found() {
        let temp = TempDir::new().unwrap();

        let err = load_merged_config(temp.path()).unwrap_err();

        assert!(matches!(err, FactoError::ConfigNotFound { .. }));
    }

    #[test]
    fn load_merged_config_parses_project_matrix() {
        let temp = TempDir::new().unwrap();
        write_matrix(
            temp.path(),
            MATRIX_FILE,
            r#"
project:
  name: stcal
env_list: [check-style, test]
"#,
        );

        let config = load_merged_config(temp.path()).unwrap();

        assert_eq!(config.project.name, Some("stcal".to_string()));
        assert_eq!(config.env_list, vec!["check-style", "test"]);
    }

    #[test]
    fn local_overlay_overrides_project_matrix() {
        let temp = TempDir::new().unwrap();
        write_matrix(
            temp.path(),
            MATRIX_FILE,
            r#"
project:
  name: stcal
  install_command: python -m pip install
"#,
        );
        write_matrix(
            temp.path(),
            LOCAL_FILE,
            r#"
project:
  install_command: uv pip install
"#,
        );

        let config = load_merged_config(temp.path()).unwrap();

        assert_eq!(config.project.name, Some("stcal".to_string()));
        assert_eq!(config.project.install_command, "uv pip install");
    }

    #[test]
    fn invalid_yaml_is_config_parse_error() {
        let temp = TempDir::new().unwrap();
        write_matrix(temp.path(), MATRIX_FILE, "envs: [not, a, mapping\n");

        let err = load_merged_config(temp.path()).unwrap_err();

        assert!(matches!(err, FactoError::ConfigParse { .. }));
    }

    #[test]
    fn explicit_path_bypasses_discovery() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ci").join("matrix.yml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "project:\n  name: stcal\n").unwrap();

        let paths = ConfigPaths::explicit(&path);
        let config = load_from_paths(&paths, temp.path()).unwrap();

        assert_eq!(config.project.name, Some("stcal".to_string()));
    }
}
