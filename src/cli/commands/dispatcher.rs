//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CatalogueContext`] for locating and loading the catalogue
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::config::{discover_catalogue, load_catalogue, CatalogueSource, HostEnvironment};
use crate::error::Result;
use crate::registry::ComponentRegistry;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
///
/// Failures travel as errors; a command that returns normally succeeded.
#[derive(Debug)]
pub struct CommandResult {
    /// Exit code to use.
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self { exit_code: 0 }
    }
}

/// Where the catalogue comes from and the host it is resolved against.
#[derive(Debug, Clone)]
pub struct CatalogueContext {
    pub working_dir: PathBuf,
    pub explicit: Option<PathBuf>,
    pub host: HostEnvironment,
}

impl CatalogueContext {
    pub fn new(working_dir: PathBuf, explicit: Option<PathBuf>, host: HostEnvironment) -> Self {
        Self {
            working_dir,
            explicit,
            host,
        }
    }

    /// Discover, parse, validate and build the registry.
    pub fn load_registry(&self) -> Result<(CatalogueSource, ComponentRegistry)> {
        let source = discover_catalogue(
            self.explicit.as_deref(),
            &self.working_dir,
            &self.host.home,
        )?;
        tracing::debug!(source = %source, "loading catalogue");

        let config = load_catalogue(&source)?;
        let registry = ComponentRegistry::from_config(&config, &self.host)?;
        tracing::debug!(components = registry.len(), "registry built");
        Ok((source, registry))
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CatalogueContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher resolving the catalogue from `working_dir`.
    pub fn new(working_dir: PathBuf, explicit: Option<PathBuf>, host: HostEnvironment) -> Self {
        Self {
            context: CatalogueContext::new(working_dir, explicit, host),
        }
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Run(args)) => {
                let cmd = super::run::RunCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Status(args)) => {
                let cmd = super::status::StatusCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::List(args)) => {
                let cmd = super::list::ListCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            None => {
                // Default to run command with default args
                let cmd = super::run::RunCommand::new(self.context.clone(), RunArgs::default());
                cmd.execute(ui)
            }
        }
    }
}
