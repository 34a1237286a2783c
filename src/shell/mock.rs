//! Recording command runner for testing.
//!
//! `MockRunner` implements [`CommandRunner`] without spawning anything. It
//! records every invocation in order and answers from a table of scripted
//! responses keyed by command-line prefix.
//!
//! # Example
//!
//! ```
//! use provision::shell::{CommandRunner, Invocation, MockResponse, MockRunner};
//!
//! let runner = MockRunner::new();
//! runner.respond("fd --version", MockResponse::output("fd 8.7.0"));
//! runner.respond("rg --version", MockResponse::not_found());
//!
//! let found = runner.capture(&Invocation::new("fd").arg("--version")).unwrap();
//! assert_eq!(found.first_line(), "fd 8.7.0");
//! assert!(runner.capture(&Invocation::new("rg").arg("--version")).is_err());
//! assert_eq!(runner.command_lines().len(), 2);
//! ```

use std::cell::RefCell;
use std::io;
use std::time::Duration;

use super::command::{CommandResult, CommandRunner, Invocation};

/// Scripted answer for a matching invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResponse {
    /// The process ran and exited with `code`, printing `output`.
    Exit { code: i32, output: String },
    /// The executable could not be found.
    NotFound,
}

impl MockResponse {
    /// Exit 0 with the given output.
    pub fn output(output: &str) -> Self {
        Self::Exit {
            code: 0,
            output: output.to_string(),
        }
    }

    /// Exit with `code` and no output.
    pub fn exit(code: i32) -> Self {
        Self::Exit {
            code,
            output: String::new(),
        }
    }

    /// Spawn fails with `NotFound`.
    pub fn not_found() -> Self {
        Self::NotFound
    }
}

/// One recorded call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// What was invoked.
    pub invocation: Invocation,
    /// Whether output was captured (probe) or attached (install).
    pub captured: bool,
}

/// Command runner that records calls and replays scripted responses.
///
/// Responses are matched against [`Invocation::command_line`] by prefix; the
/// most recently registered matching rule wins. Unmatched invocations exit 0
/// with no output unless [`MockRunner::set_default`] says otherwise.
#[derive(Debug)]
pub struct MockRunner {
    rules: RefCell<Vec<(String, MockResponse)>>,
    default: RefCell<MockResponse>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRunner {
    /// Create a runner where every command succeeds silently.
    pub fn new() -> Self {
        Self {
            rules: RefCell::new(Vec::new()),
            default: RefCell::new(MockResponse::exit(0)),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Answer invocations whose command line starts with `prefix`.
    pub fn respond(&self, prefix: &str, response: MockResponse) {
        self.rules
            .borrow_mut()
            .push((prefix.to_string(), response));
    }

    /// Answer for invocations no rule matches.
    pub fn set_default(&self, response: MockResponse) {
        *self.default.borrow_mut() = response;
    }

    /// All recorded calls in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Command lines of every recorded call, probes included.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|c| c.invocation.command_line())
            .collect()
    }

    /// Command lines of attached (install-phase) calls only.
    pub fn run_lines(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| !c.captured)
            .map(|c| c.invocation.command_line())
            .collect()
    }

    /// Whether any call's command line starts with `prefix`.
    pub fn has_call(&self, prefix: &str) -> bool {
        self.command_lines().iter().any(|l| l.starts_with(prefix))
    }

    /// Forget recorded calls, keeping the scripted responses.
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn answer(&self, invocation: &Invocation, captured: bool) -> io::Result<CommandResult> {
        self.calls.borrow_mut().push(RecordedCall {
            invocation: invocation.clone(),
            captured,
        });

        let line = invocation.command_line();
        let response = self
            .rules
            .borrow()
            .iter()
            .rev()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| self.default.borrow().clone());

        match response {
            MockResponse::NotFound => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: not found", invocation.program()),
            )),
            MockResponse::Exit { code: 0, output } => {
                Ok(CommandResult::success(output, String::new(), Duration::ZERO))
            }
            MockResponse::Exit { code, output } => Ok(CommandResult::failure(
                Some(code),
                output,
                String::new(),
                Duration::ZERO,
            )),
        }
    }
}

impl CommandRunner for MockRunner {
    fn capture(&self, invocation: &Invocation) -> io::Result<CommandResult> {
        self.answer(invocation, true)
    }

    fn run(&self, invocation: &Invocation) -> io::Result<CommandResult> {
        self.answer(invocation, false)
    }
}
