//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Installs and configures a developer workstation.
#[derive(Debug, Parser)]
#[command(name = "provision")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a catalogue file (overrides ./provision.yml and the built-in catalogue)
    #[arg(short, long, global = true, env = "PROVISION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show every command as it runs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect and install everything missing (default if no command specified)
    Run(RunArgs),

    /// Show which components are already installed
    Status(StatusArgs),

    /// List catalogue components and their installers
    List(ListArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Print install commands without executing them
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["provision"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn run_dry_run_short_flag() {
        let cli = Cli::try_parse_from(["provision", "run", "-n"]).unwrap();
        match cli.command {
            Some(Commands::Run(args)) => assert!(args.dry_run),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["provision", "status", "--json", "-v", "-c", "x.yml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("x.yml")));
        match cli.command {
            Some(Commands::Status(args)) => assert!(args.json),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["provision", "-v", "-q"]).is_err());
    }

    #[test]
    fn list_json() {
        let cli = Cli::try_parse_from(["provision", "list", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List(ListArgs { json: true }))));
    }
}
