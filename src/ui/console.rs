//! Console UI implementation.

use super::theme::FactoTheme;
use super::{OutputMode, UserInterface};

/// Terminal-backed UI. Messages go to stdout, warnings and errors to
/// stderr, all filtered by the output mode.
#[derive(Debug)]
pub struct ConsoleUI {
    mode: OutputMode,
    theme: FactoTheme,
}

impl ConsoleUI {
    /// Create a console UI with the given output mode.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: FactoTheme::new(),
        }
    }
}

impl UserInterface for ConsoleUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_chrome() {
            println!("{}", msg);
        }
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_detail() {
            println!("{}", self.theme.dim.apply_to(msg));
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_chrome() {
            println!("{} {}", self.theme.success.apply_to("✓"), msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{} {}", self.theme.warning.apply_to("!"), msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{} {}", self.theme.error.apply_to("✗"), msg);
    }
}
