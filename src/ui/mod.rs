//! Terminal output components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`ConsoleUI`] for terminal usage
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use facto::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(OutputMode::Quiet);
//! ui.error("something went wrong");
//! ```

pub mod console;
pub mod mock;
pub mod output;
pub mod theme;

pub use console::ConsoleUI;
pub use mock::MockUI;
pub use output::OutputMode;
pub use theme::{should_use_colors, FactoTheme};

/// Trait for user-facing output.
///
/// This trait allows capturing the output in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Set the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Display a status message.
    fn message(&mut self, msg: &str);

    /// Display a verbose-only detail line.
    fn detail(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);
}

/// Create the UI for the given output mode.
pub fn create_ui(mode: OutputMode) -> Box<dyn UserInterface> {
    Box::new(ConsoleUI::new(mode))
}
