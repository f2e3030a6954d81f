//! Run command - resolve environments and execute their steps.

use crate::cli::args::RunArgs;
use crate::cli::commands::dispatcher::{Command, CommandContext, CommandResult};
use crate::error::{FactoError, Result};
use crate::matrix::resolve;
use crate::runner::execute_profile;
use crate::ui::UserInterface;

pub struct RunCommand {
    context: CommandContext,
    args: RunArgs,
}

impl RunCommand {
    pub fn new(context: CommandContext, args: RunArgs) -> Self {
        Self { context, args }
    }

    fn run_all(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let config = self.context.load_config()?;

        let names: Vec<String> = if self.args.envs.is_empty() {
            config.env_list.clone()
        } else {
            self.args.envs.clone()
        };
        if names.is_empty() {
            return Err(FactoError::ConfigValidation {
                message: "no environments requested and env_list is empty".to_string(),
            });
        }

        for name in &names {
            let profile = resolve(&config, name)?;
            execute_profile(
                &profile,
                &config.project,
                &self.context.project_root,
                &self.args.passthrough,
                self.args.dry_run,
                ui,
            )?;
        }

        Ok(())
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match self.run_all(ui) {
            Ok(()) => Ok(CommandResult::success()),
            Err(err) => {
                ui.error(&err.to_string());
                Ok(CommandResult::failure(err.exit_code()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn write_matrix(dir: &TempDir, content: &str) {
        fs::write(dir.path().join("facto.yml"), content).unwrap();
    }

    fn run(dir: &TempDir, args: RunArgs) -> (CommandResult, MockUI) {
        let mut ui = MockUI::new();
        let context = CommandContext::new(dir.path(), None);
        let result = RunCommand::new(context, args).execute(&mut ui).unwrap();
        (result, ui)
    }

    #[test]
    fn missing_config_fails_with_exit_2() {
        let dir = TempDir::new().unwrap();
        let args = RunArgs {
            envs: vec!["test".to_string()],
            ..Default::default()
        };

        let (result, ui) = run(&dir, args);

        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
        assert!(!ui.errors().is_empty());
    }

    #[test]
    fn unknown_environment_fails_with_exit_2() {
        let dir = TempDir::new().unwrap();
        write_matrix(
            &dir,
            r#"
project:
  name: stcal
envs:
  check-style:
    skip_install: true
    commands:
      - "true"
"#,
        );
        let args = RunArgs {
            envs: vec!["deploy".to_string()],
            ..Default::default()
        };

        let (result, ui) = run(&dir, args);

        assert_eq!(result.exit_code, 2);
        assert!(ui.errors()[0].contains("deploy"));
    }

    #[test]
    fn runs_env_list_when_no_envs_given() {
        let dir = TempDir::new().unwrap();
        write_matrix(
            &dir,
            r#"
project:
  name: stcal
env_list: [first, second]
envs:
  first:
    skip_install: true
    commands:
      - touch first.marker
  second:
    skip_install: true
    commands:
      - touch second.marker
"#,
        );

        let (result, _ui) = run(&dir, RunArgs::default());

        assert!(result.success);
        assert!(dir.path().join("first.marker").exists());
        assert!(dir.path().join("second.marker").exists());
    }

    #[test]
    fn empty_env_list_and_no_args_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        write_matrix(&dir, "project:\n  name: stcal\n");

        let (result, _ui) = run(&dir, RunArgs::default());

        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn failing_step_propagates_child_exit_code() {
        let dir = TempDir::new().unwrap();
        write_matrix(
            &dir,
            r#"
project:
  name: stcal
envs:
  flaky:
    skip_install: true
    commands:
      - exit 7
"#,
        );
        let args = RunArgs {
            envs: vec!["flaky".to_string()],
            ..Default::default()
        };

        let (result, ui) = run(&dir, args);

        assert_eq!(result.exit_code, 7);
        assert!(!ui.errors().is_empty());
    }

    #[test]
    fn stops_at_first_failing_environment() {
        let dir = TempDir::new().unwrap();
        write_matrix(
            &dir,
            r#"
project:
  name: stcal
envs:
  bad:
    skip_install: true
    commands:
      - exit 3
  later:
    skip_install: true
    commands:
      - touch later.marker
"#,
        );
        let args = RunArgs {
            envs: vec!["bad".to_string(), "later".to_string()],
            ..Default::default()
        };

        let (result, _ui) = run(&dir, args);

        assert_eq!(result.exit_code, 3);
        assert!(!dir.path().join("later.marker").exists());
    }

    #[test]
    fn dry_run_executes_nothing() {
        let dir = TempDir::new().unwrap();
        write_matrix(
            &dir,
            r#"
project:
  name: stcal
envs:
  quick:
    skip_install: true
    commands:
      - touch quick.marker
"#,
        );
        let args = RunArgs {
            envs: vec!["quick".to_string()],
            dry_run: true,
            ..Default::default()
        };

        let (result, _ui) = run(&dir, args);

        assert!(result.success);
        assert!(!dir.path().join("quick.marker").exists());
    }
}
