//! External process execution.
//!
//! - [`command`] - [`Invocation`], [`CommandRunner`] and the real [`SystemRunner`]
//! - [`mock`] - [`MockRunner`], a recording runner for tests
//! - [`platform`] - platform shell and privilege facts

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{quote, CommandResult, CommandRunner, Invocation, SystemRunner};
pub use mock::{MockResponse, MockRunner};
pub use platform::{is_ci, is_elevated, PLATFORM_SHELL};
