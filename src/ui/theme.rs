//! Visual theme and styling.

use console::Style;

/// Colors and glyphs used across the terminal output.
#[derive(Debug, Clone)]
pub struct ProvisionTheme {
    /// Success messages (green).
    pub success: Style,
    /// Warnings (yellow).
    pub warning: Style,
    /// Errors (red bold).
    pub error: Style,
    /// Phase names and spinners (cyan).
    pub info: Style,
    /// Secondary text.
    pub dim: Style,
    /// Component ids and other emphasis (bold).
    pub highlight: Style,
    /// Banner (cyan bold).
    pub header: Style,
    /// Command lines (dim italic).
    pub command: Style,
}

impl Default for ProvisionTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ProvisionTheme {
    /// The colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            info: Style::new().cyan(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            command: Style::new().dim().italic(),
        }
    }

    /// A theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            command: Style::new(),
        }
    }

    /// The theme matching the current color setting.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_header(&self, title: &str) -> String {
        format!("{} {}", self.header.apply_to("▸"), self.highlight.apply_to(title))
    }

    /// `── package (3)`
    pub fn format_phase(&self, phase: &str, count: usize) -> String {
        format!(
            "{} {} {}",
            self.dim.apply_to("──"),
            self.info.apply_to(phase),
            self.dim.apply_to(format!("({})", count))
        )
    }

    /// `$ brew install fd`
    pub fn format_command(&self, command_line: &str) -> String {
        format!("  {}", self.command.apply_to(format!("$ {}", command_line)))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_formats_status_glyphs() {
        let theme = ProvisionTheme::plain();
        assert_eq!(theme.format_success("done"), "✓ done");
        assert_eq!(theme.format_warning("careful"), "⚠ careful");
        assert_eq!(theme.format_error("failed"), "✗ failed");
    }

    #[test]
    fn phase_shows_count() {
        let theme = ProvisionTheme::plain();
        assert_eq!(theme.format_phase("package", 3), "── package (3)");
    }

    #[test]
    fn command_is_prompted() {
        let theme = ProvisionTheme::plain();
        assert_eq!(theme.format_command("brew install fd"), "  $ brew install fd");
    }

    #[test]
    fn header_contains_title() {
        let theme = ProvisionTheme::plain();
        assert!(theme.format_header("provision").contains("provision"));
    }

    #[test]
    fn default_matches_new() {
        assert_eq!(
            ProvisionTheme::default().format_success("x"),
            ProvisionTheme::new().format_success("x")
        );
    }
}
