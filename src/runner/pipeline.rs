//! Sequential step execution for one resolved profile.
//!
//! The pipeline is: install steps (extra deps, then the package under
//! test), pre-commands, main commands. Each step is an independent
//! synchronous subprocess. The first non-zero exit aborts the remaining
//! steps and becomes the run's exit code; completed steps are not rolled
//! back.

use crate::config::ProjectConfig;
use crate::error::{FactoError, Result};
use crate::matrix::Profile;
use crate::shell::{self, quote, CommandOptions};
use crate::ui::{FactoTheme, UserInterface};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Placeholder substituted by passthrough arguments in the final command.
pub const POSARGS: &str = "{posargs}";

/// What part of the pipeline a step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Dependency or package installation.
    Install,
    /// Pre-command.
    Pre,
    /// Main command.
    Main,
}

impl StepKind {
    /// Short label used in step chrome.
    pub fn label(&self) -> &'static str {
        match self {
            StepKind::Install => "install",
            StepKind::Pre => "pre",
            StepKind::Main => "run",
        }
    }
}

/// One planned step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Pipeline section.
    pub kind: StepKind,
    /// Rendered shell command.
    pub command: String,
}

/// Outcome of one executed step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Pipeline section.
    pub kind: StepKind,
    /// Rendered shell command.
    pub command: String,
    /// Child exit code.
    pub exit_code: Option<i32>,
    /// Wall-clock duration.
    pub duration: Duration,
}

/// Report for one environment run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Environment name.
    pub env: String,
    /// Outcomes of the steps that ran, in order.
    pub outcomes: Vec<StepOutcome>,
}

/// Build the ordered step sequence for a resolved profile.
///
/// Passthrough arguments attach to the final main command only: they
/// replace a `{posargs}` placeholder when present there, otherwise they
/// are appended, shell-quoted, in order.
pub fn plan(profile: &Profile, project: &ProjectConfig, passthrough: &[String]) -> Vec<Step> {
    let mut steps: Vec<Step> = profile
        .install_steps(project)
        .into_iter()
        .map(|command| Step {
            kind: StepKind::Install,
            command,
        })
        .collect();

    steps.extend(profile.commands_pre.iter().map(|command| Step {
        kind: StepKind::Pre,
        command: command.clone(),
    }));

    let last = profile.commands.len().saturating_sub(1);
    steps.extend(profile.commands.iter().enumerate().map(|(i, command)| {
        let command = if i == last {
            apply_posargs(command, passthrough)
        } else {
            command.clone()
        };
        Step {
            kind: StepKind::Main,
            command,
        }
    }));

    steps
}

fn apply_posargs(command: &str, passthrough: &[String]) -> String {
    let joined = passthrough
        .iter()
        .map(|arg| quote(arg))
        .collect::<Vec<_>>()
        .join(" ");

    if command.contains(POSARGS) {
        if joined.is_empty() {
            // Drop the placeholder together with one adjacent separator so a
            // mid-command occurrence leaves no double space behind.
            let gap = format!(" {}", POSARGS);
            command
                .replace(&gap, "")
                .replace(&format!("{} ", POSARGS), "")
                .replace(POSARGS, "")
                .trim()
                .to_string()
        } else {
            command.replace(POSARGS, &joined).trim_end().to_string()
        }
    } else if joined.is_empty() {
        command.to_string()
    } else {
        format!("{} {}", command, joined)
    }
}

/// Environment passed to every step: `pass_env` matches from the parent
/// environment, then `set_env` values on top.
///
/// Takes the parent environment as a snapshot so the selection logic is
/// testable without touching process-global state.
fn child_env(profile: &Profile, parent: &HashMap<String, String>) -> HashMap<String, String> {
    let mut env = HashMap::new();

    for pattern in &profile.pass_env {
        if let Some(prefix) = pattern.strip_suffix('*') {
            for (key, value) in parent {
                if key.starts_with(prefix) {
                    env.insert(key.clone(), value.clone());
                }
            }
        } else if let Some(value) = parent.get(pattern) {
            env.insert(pattern.clone(), value.clone());
        }
    }

    for (key, value) in &profile.env {
        env.insert(key.clone(), value.clone());
    }

    env
}

/// Execute a resolved profile's steps in order, fail-fast.
///
/// # Errors
///
/// `InstallFailed` or `CommandFailed` carrying the failing step's exit
/// code; remaining steps do not run.
pub fn execute_profile(
    profile: &Profile,
    project: &ProjectConfig,
    project_root: &Path,
    passthrough: &[String],
    dry_run: bool,
    ui: &mut dyn UserInterface,
) -> Result<RunReport> {
    let theme = FactoTheme::new();
    let steps = plan(profile, project, passthrough);
    let cwd = match &profile.change_dir {
        Some(dir) => project_root.join(dir),
        None => project_root.to_path_buf(),
    };
    let env = child_env(profile, &std::env::vars().collect());

    match &profile.description {
        Some(description) => ui.message(&format!(
            "{} {}",
            theme.env_name.apply_to(&profile.name),
            theme.dim.apply_to(description)
        )),
        None => ui.message(&format!("{}", theme.env_name.apply_to(&profile.name))),
    }
    tracing::debug!(env = %profile.name, steps = steps.len(), cwd = %cwd.display(), "starting profile");

    let mut report = RunReport {
        env: profile.name.clone(),
        outcomes: Vec::new(),
    };

    let total = steps.len();
    for (index, step) in steps.iter().enumerate() {
        let chrome = format!(
            "{} {} {}",
            theme.step_number.apply_to(format!("[{}/{}]", index + 1, total)),
            theme.highlight.apply_to(step.kind.label()),
            theme.command.apply_to(&step.command)
        );

        if dry_run {
            ui.message(&format!("{} {}", theme.dim.apply_to("(dry-run)"), chrome));
            continue;
        }

        ui.message(&chrome);
        tracing::info!(kind = step.kind.label(), command = %step.command, "running step");

        let options = CommandOptions {
            cwd: Some(cwd.clone()),
            env: env.clone(),
            clear_env: true,
            capture: false,
        };
        let result = shell::execute(&step.command, &options)?;

        report.outcomes.push(StepOutcome {
            kind: step.kind,
            command: step.command.clone(),
            exit_code: result.exit_code,
            duration: result.duration,
        });

        if !result.success {
            tracing::warn!(
                kind = step.kind.label(),
                command = %step.command,
                code = ?result.exit_code,
                "step failed, aborting remaining steps"
            );
            return Err(match step.kind {
                StepKind::Install => FactoError::InstallFailed {
                    command: step.command.clone(),
                    code: result.exit_code,
                },
                StepKind::Pre | StepKind::Main => FactoError::CommandFailed {
                    command: step.command.clone(),
                    code: result.exit_code,
                },
            });
        }
    }

    if !dry_run {
        ui.success(&format!("{}: all steps passed", profile.name));
    }
    Ok(report)
}
