//! Visual theme and styling.

use console::Style;

/// facto's visual theme.
#[derive(Debug, Clone)]
pub struct FactoTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for environment names (cyan bold).
    pub env_name: Style,
    /// Style for commands shown in output (dim italic).
    pub command: Style,
    /// Style for step counters (dim).
    pub step_number: Style,
    /// Style for key labels in key-value displays (bold).
    pub key: Style,
}

impl Default for FactoTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl FactoTheme {
    /// Create the default facto theme.
    pub fn new() -> Self {
        if should_use_colors() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            env_name: Style::new().cyan().bold(),
            command: Style::new().dim().italic(),
            step_number: Style::new().dim(),
            key: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            env_name: Style::new(),
            command: Style::new(),
            step_number: Style::new(),
            key: Style::new(),
        }
    }
}

/// Whether colored output should be used.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    console::colors_enabled()
}
