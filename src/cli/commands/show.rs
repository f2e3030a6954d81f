//! Show command - print a resolved environment profile.

use crate::cli::args::ShowArgs;
use crate::cli::commands::dispatcher::{Command, CommandContext, CommandResult};
use crate::error::Result;
use crate::matrix::resolve;
use crate::ui::UserInterface;

pub struct ShowCommand {
    context: CommandContext,
    args: ShowArgs,
}

impl ShowCommand {
    pub fn new(context: CommandContext, args: ShowArgs) -> Self {
        Self { context, args }
    }

    fn render(&self) -> Result<String> {
        let config = self.context.load_config()?;
        let profile = resolve(&config, &self.args.env)?;

        let rendered = if self.args.json {
            serde_json::to_string_pretty(&profile).map_err(anyhow::Error::from)?
        } else {
            serde_yaml::to_string(&profile).map_err(anyhow::Error::from)?
        };
        Ok(rendered.trim_end().to_string())
    }
}

impl Command for ShowCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match self.render() {
            Ok(rendered) => {
                ui.message(&rendered);
                Ok(CommandResult::success())
            }
            Err(err) => {
                ui.error(&err.to_string());
                Ok(CommandResult::failure(err.exit_code()))
            }
        }
    }
}
