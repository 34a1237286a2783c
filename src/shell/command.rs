//! External process invocation.
//!
//! Every external program the engine touches (probes, package managers,
//! fetchers, installers) is described by an [`Invocation`] and executed
//! through a [`CommandRunner`]. The engine never builds a
//! `std::process::Command` itself, which keeps dispatchers testable with
//! [`MockRunner`](super::MockRunner).

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use super::platform::PLATFORM_SHELL;

/// A fully described external command: program, arguments, and an
/// environment overlay applied on top of the ambient environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    env: BTreeMap<String, String>,
}

impl Invocation {
    /// Invoke `program` directly, without a shell.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    /// Interpret `script` through the platform shell.
    pub fn shell(script: impl Into<String>) -> Self {
        Self::shell_with(PLATFORM_SHELL, script)
    }

    /// Interpret `script` through an explicit interpreter (`<interpreter> -c <script>`).
    pub fn shell_with(interpreter: impl Into<String>, script: impl Into<String>) -> Self {
        Self::new(interpreter).arg("-c").arg(script)
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Overlay one environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Overlay several environment variables.
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// The program to execute.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program.
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Environment variables overlaid on the ambient environment.
    pub fn env_overrides(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Human-readable command line.
    ///
    /// Platform-shell invocations render as the script itself; everything
    /// else renders as a quoted argument vector. Environment overrides are
    /// shown as leading `KEY=value` assignments.
    pub fn command_line(&self) -> String {
        let mut parts: Vec<String> = self
            .env
            .iter()
            .map(|(k, v)| format!("{}={}", k, quote(v)))
            .collect();

        match self.args.as_slice() {
            [flag, script] if self.program == PLATFORM_SHELL && flag == "-c" => {
                parts.push(script.clone());
            }
            args => {
                parts.push(quote(&self.program));
                parts.extend(args.iter().map(|a| quote(a)));
            }
        }

        parts.join(" ")
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Quote a word for POSIX `sh` if it contains anything beyond a safe set.
pub fn quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./=:,@+%".contains(c));

    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Standard output followed by standard error.
    pub fn combined_output(&self) -> String {
        let mut combined = self.stdout.clone();
        combined.push_str(&self.stderr);
        combined
    }

    /// First line of the combined output after trimming surrounding whitespace.
    pub fn first_line(&self) -> String {
        self.combined_output()
            .trim()
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}

/// Executes [`Invocation`]s.
///
/// Spawn failures (including a missing executable) are reported as
/// `io::Error`; a process that ran and exited non-zero is a successful
/// call returning a failed [`CommandResult`].
pub trait CommandRunner {
    /// Run with stdout and stderr captured and stdin closed.
    fn capture(&self, invocation: &Invocation) -> io::Result<CommandResult>;

    /// Run attached to the operator's terminal.
    fn run(&self, invocation: &Invocation) -> io::Result<CommandResult>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for std::rc::Rc<R> {
    fn capture(&self, invocation: &Invocation) -> io::Result<CommandResult> {
        (**self).capture(invocation)
    }

    fn run(&self, invocation: &Invocation) -> io::Result<CommandResult> {
        (**self).run(invocation)
    }
}

/// Runs invocations as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn capture(&self, invocation: &Invocation) -> io::Result<CommandResult> {
        let start = Instant::now();
        tracing::debug!("capturing: {}", invocation.program());

        let output = invocation
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        let duration = start.elapsed();
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            Ok(CommandResult::success(stdout, stderr, duration))
        } else {
            Ok(CommandResult::failure(
                output.status.code(),
                stdout,
                stderr,
                duration,
            ))
        }
    }

    fn run(&self, invocation: &Invocation) -> io::Result<CommandResult> {
        let start = Instant::now();
        tracing::debug!("running: {}", invocation.program());

        let status = invocation
            .to_command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        let duration = start.elapsed();

        if status.success() {
            Ok(CommandResult::success(String::new(), String::new(), duration))
        } else {
            Ok(CommandResult::failure(
                status.code(),
                String::new(),
                String::new(),
                duration,
            ))
        }
    }
}
