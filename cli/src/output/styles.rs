//! Output styles using owo-colors stylesheet pattern

use owo_colors::Style;

/// Centralized stylesheet for CLI output colors.
#[derive(Default, Clone)]
pub struct Styles {
    /// Passing checks (green)
    pub success: Style,
    /// Recommended failures and warnings (yellow)
    pub warning: Style,
    /// Required failures and errors (red)
    pub error: Style,
    /// Informational lines (blue)
    pub info: Style,
    /// Verbose detail and not-run checks
    pub dim: Style,
    /// Report headings
    pub header: Style,
}

impl Styles {
    /// Apply colors to the stylesheet.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.error = Style::new().red();
        self.info = Style::new().blue();
        self.dim = Style::new().dimmed();
        self.header = Style::new().bold().cyan();
    }
}
