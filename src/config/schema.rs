//! Configuration schema definitions for facto.
//!
//! This module contains all the struct definitions that map to
//! the YAML matrix file format (`facto.yml`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration structure for facto.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    /// Project-level settings
    pub project: ProjectConfig,

    /// Environments run by `facto run` when no names are given
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env_list: Vec<String>,

    /// Base profile applied to factor-composed environment names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultProfile>,

    /// Exact-name environment declarations
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub envs: BTreeMap<String, ProfileConfig>,
}

impl MatrixConfig {
    /// Names a user can ask for: declared envs plus the default prefixes.
    pub fn declared_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.envs.keys().cloned().collect();
        if let Some(default) = &self.default {
            for prefix in &default.prefixes {
                if !names.iter().any(|n| n == prefix) {
                    names.push(prefix.clone());
                }
            }
        }
        names.sort();
        names
    }
}

/// Project-level settings that apply to every environment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project name (for display purposes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Install target for the package under test
    #[serde(
        default = "default_package",
        skip_serializing_if = "is_default_package"
    )]
    pub package: String,

    /// Command prefix used for all install steps
    #[serde(
        default = "default_install_command",
        skip_serializing_if = "is_default_install_command"
    )]
    pub install_command: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: None,
            package: default_package(),
            install_command: default_install_command(),
        }
    }
}

fn default_package() -> String {
    ".".to_string()
}

fn is_default_package(v: &str) -> bool {
    v == "."
}

fn default_install_command() -> String {
    "python -m pip install".to_string()
}

fn is_default_install_command(v: &str) -> bool {
    v == "python -m pip install"
}

/// The base profile plus the leading factors it applies to.
///
/// A requested name with no exact `envs:` entry resolves against this
/// profile only when its first factor token is listed in `prefixes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultProfile {
    /// Leading factor tokens the base profile applies to
    #[serde(
        default = "default_prefixes",
        skip_serializing_if = "is_default_prefixes"
    )]
    pub prefixes: Vec<String>,

    /// Base profile fields
    #[serde(flatten)]
    pub profile: ProfileConfig,
}

impl Default for DefaultProfile {
    fn default() -> Self {
        Self {
            prefixes: default_prefixes(),
            profile: ProfileConfig::default(),
        }
    }
}

fn default_prefixes() -> Vec<String> {
    vec!["test".to_string()]
}

fn is_default_prefixes(v: &[String]) -> bool {
    v.len() == 1 && v[0] == "test"
}

/// Configuration for one environment profile.
///
/// Every field is optional — an absent field inherits from the base
/// profile; a present list replaces the inherited list entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Skip installing the package under test
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_install: Option<bool>,

    /// Optional dependency groups installed with the package
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Vec<Gated>>,

    /// Additional requirement specifiers installed before the package
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deps: Option<Vec<Gated>>,

    /// Environment variables set for every step (later entries win)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_env: Option<Vec<EnvVarEntry>>,

    /// Parent-environment variables forwarded to child processes.
    /// A trailing `*` matches a prefix family (e.g. `CRDS_*`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_env: Option<Vec<String>>,

    /// Working-directory overrides (last applicable entry wins)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_dir: Option<Vec<Gated>>,

    /// Commands run after installation, before the main commands
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands_pre: Option<Vec<CommandEntry>>,

    /// Main commands
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<CommandEntry>>,
}

impl ProfileConfig {
    /// Field-wise overlay: present fields in `overlay` replace inherited
    /// fields; absent fields keep the base value.
    pub fn overlaid(&self, overlay: &ProfileConfig) -> ProfileConfig {
        ProfileConfig {
            description: overlay
                .description
                .clone()
                .or_else(|| self.description.clone()),
            skip_install: overlay.skip_install.or(self.skip_install),
            extras: overlay.extras.clone().or_else(|| self.extras.clone()),
            deps: overlay.deps.clone().or_else(|| self.deps.clone()),
            set_env: overlay.set_env.clone().or_else(|| self.set_env.clone()),
            pass_env: overlay.pass_env.clone().or_else(|| self.pass_env.clone()),
            change_dir: overlay
                .change_dir
                .clone()
                .or_else(|| self.change_dir.clone()),
            commands_pre: overlay
                .commands_pre
                .clone()
                .or_else(|| self.commands_pre.clone()),
            commands: overlay.commands.clone().or_else(|| self.commands.clone()),
        }
    }
}

/// A list entry that is either unconditional or gated on a factor.
///
/// Gates may list several factors separated by commas (`jwst,romancal`);
/// the entry is active when any listed factor is present in the
/// environment name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Gated {
    /// Always active
    Plain(String),

    /// Active only when the gate matches the environment's factors
    Conditional { factor: String, value: String },
}

impl Gated {
    /// The gate, if any.
    pub fn factor(&self) -> Option<&str> {
        match self {
            Gated::Plain(_) => None,
            Gated::Conditional { factor, .. } => Some(factor),
        }
    }

    /// The carried value.
    pub fn value(&self) -> &str {
        match self {
            Gated::Plain(value) => value,
            Gated::Conditional { value, .. } => value,
        }
    }
}

/// An environment variable assignment, optionally gated on a factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVarEntry {
    /// Variable name
    pub name: String,

    /// Variable value
    pub value: String,

    /// Gate (active only when matching)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor: Option<String>,
}

/// A command in `commands` or `commands_pre`.
///
/// The detailed form composes one command line from a base invocation and
/// factor-gated argument fragments, so `test-cov-xdist` can fold both the
/// coverage flags and the worker-distribution flag into a single run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandEntry {
    /// A plain shell command, always active
    Plain(String),

    /// A composed command, optionally gated as a whole
    Detailed {
        /// Base invocation
        run: String,

        /// Gate for the whole command
        #[serde(default, skip_serializing_if = "Option::is_none")]
        factor: Option<String>,

        /// Argument fragments appended when their gate matches
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<Gated>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_has_defaults() {
        let config: MatrixConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.project.package, ".");
        assert_eq!(config.project.install_command, "python -m pip install");
        assert!(config.env_list.is_empty());
        assert!(config.default.is_none());
        assert!(config.envs.is_empty());
    }

    #[test]
    fn parses_minimal_config() {
        let yaml = r#"
project:
  name: stcal
env_list: [check-style, test]
"#;
        let config: MatrixConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.project.name, Some("stcal".to_string()));
        assert_eq!(config.env_list, vec!["check-style", "test"]);
    }

    #[test]
    fn parses_project_overrides() {
        let yaml = r#"
project:
  package: "packages/core"
  install_command: "uv pip install"
"#;
        let config: MatrixConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.project.package, "packages/core");
        assert_eq!(config.project.install_command, "uv pip install");
    }

    #[test]
    fn default_profile_prefixes_default_to_test() {
        let yaml = r#"
default:
  deps: [pytest]
"#;
        let config: MatrixConfig = serde_yaml::from_str(yaml).unwrap();
        let default = config.default.unwrap();
        assert_eq!(default.prefixes, vec!["test"]);
        assert_eq!(
            default.profile.deps,
            Some(vec![Gated::Plain("pytest".to_string())])
        );
    }

    #[test]
    fn parses_gated_deps() {
        let yaml = r#"
default:
  deps:
    - "pytest>=6"
    - { factor: cov, value: pytest-cov }
    - { factor: xdist, value: pytest-xdist }
"#;
        let config: MatrixConfig = serde_yaml::from_str(yaml).unwrap();
        let deps = config.default.unwrap().profile.deps.unwrap();
        assert_eq!(deps.len(), 3);
        assert_eq!(deps[0], Gated::Plain("pytest>=6".to_string()));
        assert_eq!(deps[1].factor(), Some("cov"));
        assert_eq!(deps[1].value(), "pytest-cov");
    }

    #[test]
    fn parses_multi_factor_gate() {
        let yaml = r#"
default:
  change_dir:
    - { factor: "jwst,romancal", value: downstream }
"#;
        let config: MatrixConfig = serde_yaml::from_str(yaml).unwrap();
        let dirs = config.default.unwrap().profile.change_dir.unwrap();
        assert_eq!(dirs[0].factor(), Some("jwst,romancal"));
        assert_eq!(dirs[0].value(), "downstream");
    }

    #[test]
    fn parses_set_env_entries() {
        let yaml = r#"
default:
  set_env:
    - { name: CRDS_PATH, value: /tmp/crds_cache }
    - name: PIP_EXTRA_INDEX_URL
      value: "https://pypi.example.org/simple"
      factor: devdeps
"#;
        let config: MatrixConfig = serde_yaml::from_str(yaml).unwrap();
        let set_env = config.default.unwrap().profile.set_env.unwrap();
        assert_eq!(set_env[0].name, "CRDS_PATH");
        assert!(set_env[0].factor.is_none());
        assert_eq!(set_env[1].factor.as_deref(), Some("devdeps"));
    }

    #[test]
    fn parses_pass_env_patterns() {
        let yaml = r#"
default:
  pass_env: [CI, CRDS_*, CODECOV_*]
"#;
        let config: MatrixConfig = serde_yaml::from_str(yaml).unwrap();
        let pass_env = config.default.unwrap().profile.pass_env.unwrap();
        assert_eq!(pass_env, vec!["CI", "CRDS_*", "CODECOV_*"]);
    }

    #[test]
    fn parses_plain_commands() {
        let yaml = r#"
envs:
  check-style:
    skip_install: true
    deps: [pre-commit]
    commands:
      - pre-commit install-hooks
      - pre-commit run --all-files
"#;
        let config: MatrixConfig = serde_yaml::from_str(yaml).unwrap();
        let style = &config.envs["check-style"];
        assert_eq!(style.skip_install, Some(true));
        let commands = style.commands.as_ref().unwrap();
        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[0],
            CommandEntry::Plain("pre-commit install-hooks".to_string())
        );
    }

    #[test]
    fn parses_composed_command_with_gated_args() {
        let yaml = r#"
default:
  commands:
    - run: pytest
      args:
        - { factor: cov, value: "--cov stcal --cov-report xml" }
        - { factor: xdist, value: "-n auto" }
        - "{posargs}"
"#;
        let config: MatrixConfig = serde_yaml::from_str(yaml).unwrap();
        let commands = config.default.unwrap().profile.commands.unwrap();
        match &commands[0] {
            CommandEntry::Detailed { run, factor, args } => {
                assert_eq!(run, "pytest");
                assert!(factor.is_none());
                assert_eq!(args.len(), 3);
                assert_eq!(args[2], Gated::Plain("{posargs}".to_string()));
            }
            other => panic!("expected detailed command, got {:?}", other),
        }
    }

    #[test]
    fn parses_gated_whole_command() {
        let yaml = r#"
default:
  commands_pre:
    - run: "pip install -r requirements-min.txt"
      factor: oldestdeps
    - pip freeze
"#;
        let config: MatrixConfig = serde_yaml::from_str(yaml).unwrap();
        let pre = config.default.unwrap().profile.commands_pre.unwrap();
        match &pre[0] {
            CommandEntry::Detailed { factor, .. } => {
                assert_eq!(factor.as_deref(), Some("oldestdeps"));
            }
            other => panic!("expected detailed command, got {:?}", other),
        }
        assert_eq!(pre[1], CommandEntry::Plain("pip freeze".to_string()));
    }

    #[test]
    fn overlaid_present_fields_replace() {
        let base: ProfileConfig = serde_yaml::from_str(
            r#"
description: run tests
deps: [pytest]
commands: [pytest]
"#,
        )
        .unwrap();
        let overlay: ProfileConfig = serde_yaml::from_str(
            r#"
skip_install: true
commands: [sphinx-build -W docs docs/_build]
"#,
        )
        .unwrap();

        let merged = base.overlaid(&overlay);

        assert_eq!(merged.description, Some("run tests".to_string()));
        assert_eq!(merged.skip_install, Some(true));
        // deps inherited, commands replaced entirely
        assert_eq!(merged.deps, Some(vec![Gated::Plain("pytest".to_string())]));
        assert_eq!(
            merged.commands,
            Some(vec![CommandEntry::Plain(
                "sphinx-build -W docs docs/_build".to_string()
            )])
        );
    }

    #[test]
    fn overlaid_empty_list_still_replaces() {
        let base: ProfileConfig = serde_yaml::from_str("deps: [pytest]").unwrap();
        let overlay: ProfileConfig = serde_yaml::from_str("deps: []").unwrap();

        let merged = base.overlaid(&overlay);

        assert_eq!(merged.deps, Some(vec![]));
    }

    #[test]
    fn declared_names_include_envs_and_prefixes() {
        let yaml = r#"
default:
  prefixes: [test]
envs:
  check-style:
    skip_install: true
  build-docs: {}
"#;
        let config: MatrixConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.declared_names(),
            vec!["build-docs", "check-style", "test"]
        );
    }

    #[test]
    fn serialize_omits_default_values() {
        let config: MatrixConfig = serde_yaml::from_str(
            r#"
project:
  name: stcal
envs:
  check-style:
    skip_install: true
    commands: [pre-commit run]
"#,
        )
        .unwrap();

        let yaml = serde_yaml::to_string(&config).unwrap();

        assert!(yaml.contains("name"));
        assert!(yaml.contains("skip_install"));
        assert!(!yaml.contains("env_list"), "empty env_list omitted");
        assert!(!yaml.contains("install_command"), "default install omitted");
        assert!(!yaml.contains("package"), "default package omitted");
        assert!(!yaml.contains("default:"), "absent default omitted");
        assert!(!yaml.contains("deps"), "absent deps omitted");
        assert!(!yaml.contains("pass_env"), "absent pass_env omitted");
    }
}
