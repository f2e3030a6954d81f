//! Init command - write a starter matrix file.

use std::fs;

use crate::cli::args::InitArgs;
use crate::cli::commands::dispatcher::{Command, CommandContext, CommandResult};
use crate::config::MATRIX_FILE;
use crate::error::Result;
use crate::ui::UserInterface;

/// Starter matrix written by `facto init`.
const TEMPLATE: &str = include_str!("../../../templates/facto.yml");

pub struct InitCommand {
    context: CommandContext,
    args: InitArgs,
}

impl InitCommand {
    pub fn new(context: CommandContext, args: InitArgs) -> Self {
        Self { context, args }
    }
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let path = self.context.project_root.join(MATRIX_FILE);

        if path.exists() && !self.args.force {
            ui.error(&format!(
                "{} already exists. Use --force to overwrite.",
                path.display()
            ));
            return Ok(CommandResult::failure(1));
        }

        fs::write(&path, TEMPLATE)?;
        ui.success(&format!("Created {}", path.display()));
        ui.detail("Edit the matrix, then run 'facto list' to see your environments.");

        Ok(CommandResult::success())
    }
}
