//! Command trait and dispatcher.

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::cli::commands::{
    completions::CompletionsCommand, init::InitCommand, list::ListCommand, run::RunCommand,
    show::ShowCommand,
};
use crate::config::{load_from_paths, load_merged_config, ConfigPaths, MatrixConfig};
use crate::error::Result;
use crate::ui::UserInterface;

/// Result of executing a command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandResult {
    pub success: bool,
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Trait implemented by all subcommands.
pub trait Command {
    /// Execute the command, reporting through the given UI.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Shared context handed to each subcommand.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub project_root: PathBuf,
    pub config_override: Option<PathBuf>,
}

impl CommandContext {
    pub fn new(project_root: &Path, config_override: Option<&Path>) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
        }
    }

    /// Load the merged matrix config, honoring an explicit `--config` path.
    pub fn load_config(&self) -> Result<MatrixConfig> {
        match &self.config_override {
            Some(path) => load_from_paths(&ConfigPaths::explicit(path), &self.project_root),
            None => load_merged_config(&self.project_root),
        }
    }
}

/// Routes a parsed CLI invocation to the matching command.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    pub fn new(project_root: &Path, config_override: Option<&Path>) -> Self {
        Self {
            context: CommandContext::new(project_root, config_override),
        }
    }

    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Run(args) => RunCommand::new(self.context.clone(), args.clone()).execute(ui),
            Commands::List(args) => {
                ListCommand::new(self.context.clone(), args.clone()).execute(ui)
            }
            Commands::Show(args) => {
                ShowCommand::new(self.context.clone(), args.clone()).execute(ui)
            }
            Commands::Init(args) => {
                InitCommand::new(self.context.clone(), args.clone()).execute(ui)
            }
            Commands::Completions(args) => CompletionsCommand::new(args.clone()).execute(ui),
        }
    }
}
