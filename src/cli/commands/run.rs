//! Run command implementation.
//!
//! The `provision run` command detects what is installed and installs the rest.

use crate::cli::args::RunArgs;
use crate::error::Result;
use crate::privilege::SudoGuard;
use crate::runner::{RunController, RunOptions};
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{CatalogueContext, Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    context: CatalogueContext,
    args: RunArgs,
    runner: Box<dyn CommandRunner>,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(context: CatalogueContext, args: RunArgs) -> Self {
        Self {
            context,
            args,
            runner: Box::new(SystemRunner),
        }
    }

    /// Replace the process runner.
    pub fn with_runner(mut self, runner: Box<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }


    fn build_options(&self) -> RunOptions {
        RunOptions {
            dry_run: self.args.dry_run,
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (source, registry) = self.context.load_registry()?;

        let title = if self.args.dry_run {
            format!("Provisioning from {} (dry run)", source)
        } else {
            format!("Provisioning from {}", source)
        };
        ui.show_header(&title);

        let runner = self.runner.as_ref();
        let guard = SudoGuard::new(runner);
        let controller = RunController::new(&registry, &self.context.host, runner, &guard);
        controller.run(ui, &self.build_options())?;

        Ok(CommandResult::success())
    }
}
