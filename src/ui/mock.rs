//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use provision::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("found 'fd': 'fd 9.0.0'");
//! ui.success("Done");
//!
//! assert!(ui.has_message("found 'fd'"));
//! assert!(ui.successes().contains(&"Done".to_string()));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    phases: Vec<(String, usize)>,
    commands: Vec<String>,
    spinners: Vec<String>,
    spinner_lines: Rc<RefCell<Vec<String>>>,
    spinner_outcomes: Rc<RefCell<Vec<Result<String, String>>>>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Phases announced, as `(phase, component count)`.
    pub fn phases(&self) -> &[(String, usize)] {
        &self.phases
    }

    /// Command lines shown.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Messages spinners were started with.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Lines printed through running spinners.
    pub fn spinner_lines(&self) -> Vec<String> {
        self.spinner_lines.borrow().clone()
    }

    /// How each spinner finished: `Ok(msg)` for success, `Err(msg)` for error.
    pub fn spinner_outcomes(&self) -> Vec<Result<String, String>> {
        self.spinner_outcomes.borrow().clone()
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Every captured line of text, in capture order per category.
    pub fn all_text(&self) -> Vec<&str> {
        self.messages
            .iter()
            .chain(&self.successes)
            .chain(&self.warnings)
            .chain(&self.errors)
            .chain(&self.headers)
            .chain(&self.commands)
            .map(String::as_str)
            .collect()
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            lines: Rc::clone(&self.spinner_lines),
            outcomes: Rc::clone(&self.spinner_outcomes),
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_phase(&mut self, phase: &str, count: usize) {
        self.phases.push((phase.to_string(), count));
    }

    fn show_command(&mut self, command_line: &str) {
        self.commands.push(command_line.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Spinner returned by [`MockUI`]; records how it finished.
#[derive(Debug)]
pub struct MockSpinner {
    lines: Rc<RefCell<Vec<String>>>,
    outcomes: Rc<RefCell<Vec<Result<String, String>>>>,
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn println(&mut self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.outcomes.borrow_mut().push(Ok(msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.outcomes.borrow_mut().push(Err(msg.to_string()));
    }
}
