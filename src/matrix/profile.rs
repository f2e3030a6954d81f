//! Resolved environment profile.
//!
//! A [`Profile`] is the read-only record produced by resolving a requested
//! environment name against the matrix: base and override layers merged,
//! every gated fragment settled. It is created once per invocation and
//! never mutated afterwards.

use crate::config::ProjectConfig;
use crate::shell::quote;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A fully resolved environment profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    /// Environment name as requested.
    pub name: String,

    /// Factor tokens of the name.
    pub factors: Vec<String>,

    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the package under test is installed.
    pub skip_install: bool,

    /// Active optional dependency groups.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,

    /// Active requirement specifiers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deps: Vec<String>,

    /// Environment variables set for every step.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    /// Parent-environment variables forwarded to child processes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pass_env: Vec<String>,

    /// Working-directory override, relative to the project root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_dir: Option<PathBuf>,

    /// Commands run before the main commands.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands_pre: Vec<String>,

    /// Main commands.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
}

impl Profile {
    /// Render the install command lines for this profile.
    ///
    /// Extra deps install first, then the package under test (with active
    /// extras), unless `skip_install` is set. Requirement specifiers are
    /// shell-quoted; `pytest>=6` must not become a redirection.
    pub fn install_steps(&self, project: &ProjectConfig) -> Vec<String> {
        let mut steps = Vec::new();

        if !self.deps.is_empty() {
            let specs: Vec<String> = self.deps.iter().map(|d| quote(d)).collect();
            steps.push(format!("{} {}", project.install_command, specs.join(" ")));
        }

        if !self.skip_install {
            let target = if self.extras.is_empty() {
                project.package.clone()
            } else {
                format!("{}[{}]", project.package, self.extras.join(","))
            };
            steps.push(format!("{} {}", project.install_command, quote(&target)));
        }

        steps
    }
}
