//! Environment name resolution.
//!
//! Resolution layers the base (default) profile with any exact-name
//! override, then settles every gated fragment against the name's factor
//! set. The result is deterministic: the same matrix and name always
//! produce the same [`Profile`].

use crate::config::{CommandEntry, Gated, MatrixConfig, ProfileConfig};
use crate::error::{FactoError, Result};
use crate::matrix::factors::FactorSet;
use crate::matrix::profile::Profile;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Resolve a requested environment name into a [`Profile`].
///
/// Layer selection:
/// - an exact `envs:` entry is overlaid on the default profile;
/// - otherwise the default profile applies alone, but only when the name's
///   leading factor is one of its declared prefixes.
///
/// # Errors
///
/// `UnknownEnvironment` when neither layer applies; `ConfigValidation` for
/// malformed names.
pub fn resolve(config: &MatrixConfig, name: &str) -> Result<Profile> {
    let factors = FactorSet::parse(name)?;

    let layered = match config.envs.get(name) {
        Some(entry) => match &config.default {
            Some(default) => default.profile.overlaid(entry),
            None => entry.clone(),
        },
        None => {
            let default = config
                .default
                .as_ref()
                .filter(|d| d.prefixes.iter().any(|p| p == factors.first()))
                .ok_or_else(|| FactoError::UnknownEnvironment {
                    name: name.to_string(),
                    available: config.declared_names(),
                })?;
            default.profile.clone()
        }
    };

    Ok(settle(&layered, &factors))
}

/// Apply factor gating to a merged profile config.
fn settle(config: &ProfileConfig, factors: &FactorSet) -> Profile {
    let env = config
        .set_env
        .iter()
        .flatten()
        .filter(|entry| factors.is_active(entry.factor.as_deref()))
        .map(|entry| (entry.name.clone(), entry.value.clone()))
        .collect::<BTreeMap<_, _>>();

    // Last applicable override wins.
    let change_dir = config
        .change_dir
        .iter()
        .flatten()
        .filter(|item| factors.is_active(item.factor()))
        .last()
        .map(|item| PathBuf::from(item.value()));

    Profile {
        name: factors.name().to_string(),
        factors: factors.factors().to_vec(),
        description: config.description.clone(),
        skip_install: config.skip_install.unwrap_or(false),
        extras: settle_gated(&config.extras, factors),
        deps: settle_gated(&config.deps, factors),
        env,
        pass_env: config.pass_env.clone().unwrap_or_default(),
        change_dir,
        commands_pre: settle_commands(&config.commands_pre, factors),
        commands: settle_commands(&config.commands, factors),
    }
}

fn settle_gated(items: &Option<Vec<Gated>>, factors: &FactorSet) -> Vec<String> {
    items
        .iter()
        .flatten()
        .filter(|item| factors.is_active(item.factor()))
        .map(|item| item.value().to_string())
        .collect()
}

fn settle_commands(entries: &Option<Vec<CommandEntry>>, factors: &FactorSet) -> Vec<String> {
    entries
        .iter()
        .flatten()
        .filter_map(|entry| render_command(entry, factors))
        .collect()
}

/// Render one command entry, folding active argument fragments into the
/// base invocation. Returns `None` when the whole command is gated off.
fn render_command(entry: &CommandEntry, factors: &FactorSet) -> Option<String> {
    match entry {
        CommandEntry::Plain(command) => Some(command.clone()),
        CommandEntry::Detailed { run, factor, args } => {
            if !factors.is_active(factor.as_deref()) {
                return None;
            }
            let mut line = run.clone();
            for arg in args {
                if factors.is_active(arg.factor()) {
                    line.push(' ');
                    line.push_str(arg.value());
                }
            }
            Some(line)
        }
    }
}
