//! List command implementation.
//!
//! The `provision list` command shows the catalogue without running anything.

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::error::{ProvisionError, Result};
use crate::registry::{ComponentRegistry, InstallerKind};
use crate::ui::{Table, UserInterface};

use super::dispatcher::{CatalogueContext, Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    context: CatalogueContext,
    args: ListArgs,
}

/// One catalogue entry as shown by `list --json`.
#[derive(Debug, Serialize)]
struct ListEntry<'a> {
    id: &'a str,
    detect: bool,
    installers: Vec<InstallerKind>,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(context: CatalogueContext, args: ListArgs) -> Self {
        Self { context, args }
    }

}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (source, registry) = self.context.load_registry()?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&entries(&registry))
                .map_err(|e| ProvisionError::Other(e.into()))?;
            println!("{}", json);
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!("{} components in {}", registry.len(), source));
        ui.message(&list_table(&registry).render());
        Ok(CommandResult::success())
    }
}

fn entries(registry: &ComponentRegistry) -> Vec<ListEntry<'_>> {
    registry
        .iter()
        .map(|c| ListEntry {
            id: c.id(),
            detect: c.probe().is_some(),
            installers: c.kinds(),
        })
        .collect()
}

fn list_table(registry: &ComponentRegistry) -> Table {
    let mut table = Table::new(&["COMPONENT", "DETECT", "INSTALLERS"]);
    for component in registry.iter() {
        let kinds: Vec<&str> = component.kinds().into_iter().map(InstallerKind::name).collect();
        let detect = if component.probe().is_some() { "yes" } else { "no" };
        table.add_row([component.id().to_string(), detect.to_string(), kinds.join(", ")]);
    }
    table
}
