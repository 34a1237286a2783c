//! provision - declarative workstation provisioning.
//!
//! A catalogue lists software components, how to tell whether each one is
//! already installed, and how to install it. A run probes every component
//! once, then walks a fixed sequence of installer phases and installs only
//! what is missing, so it is safe to run again and again.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Catalogue loading, interpolation and validation
//! - [`detection`] - Presence probes and the per-run snapshot
//! - [`error`] - Error types and result aliases
//! - [`install`] - One dispatcher per installer kind
//! - [`privilege`] - Non-interactive `sudo` checks
//! - [`registry`] - Components and their installer descriptors
//! - [`runner`] - Run orchestration
//! - [`secrets`] - Output masking for credentials
//! - [`shell`] - External process execution
//! - [`ui`] - Spinners, tables and terminal output
//!
//! # Example
//!
//! ```
//! use provision::config::{parse_catalogue, HostEnvironment};
//! use provision::privilege::StaticGuard;
//! use provision::registry::ComponentRegistry;
//! use provision::runner::{RunController, RunOptions};
//! use provision::shell::MockRunner;
//! use provision::ui::MockUI;
//! use std::path::Path;
//!
//! let yaml = "components:\n  fd:\n    detect: { command: [fd, --version] }\n    package: { name: fd }\n";
//! let catalogue = parse_catalogue(yaml, Path::new("provision.yml")).unwrap();
//! let host = HostEnvironment::from_lookup(|_| Err(std::env::VarError::NotPresent));
//! let registry = ComponentRegistry::from_config(&catalogue, &host).unwrap();
//!
//! let runner = MockRunner::new();
//! let guard = StaticGuard(true);
//! let mut ui = MockUI::new();
//! let report = RunController::new(&registry, &host, &runner, &guard)
//!     .run(&mut ui, &RunOptions { dry_run: true })
//!     .unwrap();
//!
//! // The mock answers every probe with success, so nothing needs installing.
//! assert_eq!(report.total_invocations(), 0);
//! ```

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod install;
pub mod privilege;
pub mod registry;
pub mod runner;
pub mod secrets;
pub mod shell;
pub mod ui;

pub use error::{ProvisionError, Result};
