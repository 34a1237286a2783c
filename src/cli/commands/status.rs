//! Status command implementation.
//!
//! The `provision status` command runs detection only and reports what it found.

use crate::cli::args::StatusArgs;
use crate::detection::{Detector, Presence, PresenceSnapshot};
use crate::error::{ProvisionError, Result};
use crate::registry::ComponentRegistry;
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::{NonInteractiveUI, OutputMode, Table, UserInterface};

use super::dispatcher::{CatalogueContext, Command, CommandResult};

/// The status command implementation.
pub struct StatusCommand {
    context: CatalogueContext,
    args: StatusArgs,
    runner: Box<dyn CommandRunner>,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(context: CatalogueContext, args: StatusArgs) -> Self {
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

}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (source, registry) = self.context.load_registry()?;
        let detector = Detector::new(self.runner.as_ref());

        if self.args.json {
            // Keep stdout clean for the document.
            let mut silent = NonInteractiveUI::with_ci(OutputMode::Silent, true);
            let snapshot = detector.detect(&registry, &mut silent);
            let json = serde_json::to_string_pretty(&snapshot)
                .map_err(|e| ProvisionError::Other(e.into()))?;
            println!("{}", json);
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!("Status of {}", source));
        let snapshot = detector.detect(&registry, ui);
        ui.message(&status_table(&registry, &snapshot).render());

        let missing = snapshot.len() - snapshot.present_count();
        if missing > 0 {
            ui.message("");
            ui.message(&format!(
                "{} component(s) missing. Run `provision run` to install them.",
                missing
            ));
        }

        Ok(CommandResult::success())
    }
}

fn status_table(registry: &ComponentRegistry, snapshot: &PresenceSnapshot) -> Table {
    let mut table = Table::new(&["COMPONENT", "STATUS", "FOUND"]);
    for component in registry.iter() {
        let (status, found) = match snapshot.presence(component.id()) {
            Presence::Present(identifier) => ("present", identifier.as_str()),
            Presence::Absent => ("absent", ""),
        };
        table.add_row([component.id(), status, found]);
    }
    table
}
