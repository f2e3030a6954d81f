//! List command - show the environments a matrix declares.

use crate::cli::args::ListArgs;
use crate::cli::commands::dispatcher::{Command, CommandContext, CommandResult};
use crate::error::{FactoError, Result};
use crate::ui::{FactoTheme, UserInterface};

pub struct ListCommand {
    context: CommandContext,
    args: ListArgs,
}

impl ListCommand {
    pub fn new(context: CommandContext, args: ListArgs) -> Self {
        Self { context, args }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match self.context.load_config() {
            Ok(config) => config,
            Err(FactoError::ConfigNotFound { .. }) => {
                ui.error("No facto.yml found. Run 'facto init' to create one.");
                return Ok(CommandResult::failure(2));
            }
            Err(err) => {
                ui.error(&err.to_string());
                return Ok(CommandResult::failure(err.exit_code()));
            }
        };

        let names = config.declared_names();
        if names.is_empty() {
            ui.warning("The matrix declares no environments.");
            return Ok(CommandResult::success());
        }

        if self.args.names {
            for name in &names {
                ui.message(name);
            }
            return Ok(CommandResult::success());
        }

        let theme = FactoTheme::new();
        let width = names.iter().map(String::len).max().unwrap_or(0);
        for name in &names {
            let description = config
                .envs
                .get(name)
                .and_then(|env| env.description.clone())
                .or_else(|| {
                    config
                        .default
                        .as_ref()
                        .and_then(|d| d.profile.description.clone())
                })
                .unwrap_or_default();
            let marked = if config.env_list.contains(name) {
                "*"
            } else {
                " "
            };
            ui.message(&render_row(&theme, marked, name, &description, width));
        }
        ui.detail("* = run by default when no environment is named");

        Ok(CommandResult::success())
    }
}

/// Pad the bare name before styling so ANSI escape bytes never count
/// toward the column width.
fn render_row(
    theme: &FactoTheme,
    marked: &str,
    name: &str,
    description: &str,
    width: usize,
) -> String {
    format!(
        "{} {}  {}",
        marked,
        theme.env_name.apply_to(format!("{:width$}", name)),
        theme.dim.apply_to(description),
    )
}
