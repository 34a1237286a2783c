//! Plain UI for CI, pipes and redirected output.

use super::{OutputMode, SpinnerHandle, UserInterface};

/// UI implementation without colors or animation.
///
/// Spinners degrade to a single line when they start and another when they
/// finish. Under CI the start line is dropped to keep logs short.
pub struct NonInteractiveUI {
    mode: OutputMode,
    is_ci: bool,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            is_ci: crate::shell::is_ci(),
        }
    }

    /// Create with explicit CI flag (for testing).
    pub fn with_ci(mode: OutputMode, is_ci: bool) -> Self {
        Self { mode, is_ci }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_detail() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_detail() && !self.is_ci {
            println!("{}", message);
        }
        Box::new(LineSpinner {
            visible: self.mode.shows_status(),
            details: self.mode.shows_detail(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_phase(&mut self, phase: &str, count: usize) {
        if self.mode.shows_detail() {
            println!("── {} ({})", phase, count);
        }
    }

    fn show_command(&mut self, command_line: &str) {
        if self.mode.shows_commands() {
            println!("  $ {}", command_line);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that prints its outcome as one line.
struct LineSpinner {
    visible: bool,
    details: bool,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn println(&mut self, line: &str) {
        if self.details {
            println!("{}", line);
        }
    }

    fn finish_success(&mut self, msg: &str) {
        if self.visible {
            println!("✓ {}", msg);
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }
}
