//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`provision run`, `provision status`)
//! - One place that locates and loads the catalogue
//! - Consistent global flag handling

pub mod dispatcher;
pub mod list;
pub mod run;
pub mod status;

pub use dispatcher::{CatalogueContext, Command, CommandDispatcher, CommandResult};
