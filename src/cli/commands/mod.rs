//! Subcommand implementations.

pub mod completions;
pub mod dispatcher;
pub mod init;
pub mod list;
pub mod run;
pub mod show;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
