//! Running detection probes.

use std::io;

use crate::detection::snapshot::{Presence, PresenceSnapshot};
use crate::registry::{Component, ComponentRegistry};
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

/// Runs every component's probe once and records the outcome.
pub struct Detector<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Detector<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Probe every component in catalogue order.
    ///
    /// Never fails: anything short of a zero exit status means absent.
    pub fn detect(
        &self,
        registry: &ComponentRegistry,
        ui: &mut dyn UserInterface,
    ) -> PresenceSnapshot {
        let mut spinner = ui.start_spinner("Detecting installed components");
        let mut entries = Vec::with_capacity(registry.len());

        for component in registry.iter() {
            spinner.set_message(&format!("Checking {}", component.id()));
            let presence = self.probe(component);
            if let Presence::Present(identifier) = &presence {
                tracing::info!(component = component.id(), %identifier, "found");
                spinner.println(&format!("found '{}': '{}'", component.id(), identifier));
            }
            entries.push((component.id().to_string(), presence));
        }

        let snapshot = PresenceSnapshot::from_entries(entries);
        spinner.finish_success(&format!(
            "{} of {} components present",
            snapshot.present_count(),
            snapshot.len()
        ));
        snapshot
    }

    /// Presence of a single component.
    pub fn probe(&self, component: &Component) -> Presence {
        let Some(probe) = component.probe() else {
            return Presence::Absent;
        };

        let invocation = probe.invocation();
        tracing::debug!(component = component.id(), command = %invocation, "probing");

        match self.runner.capture(&invocation) {
            Ok(result) if result.success => Presence::Present(result.first_line()),
            Ok(result) => {
                tracing::debug!(
                    component = component.id(),
                    code = ?result.exit_code,
                    "probe exited non-zero"
                );
                Presence::Absent
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    component = component.id(),
                    program = invocation.program(),
                    "probe program not found"
                );
                Presence::Absent
            }
            Err(e) => {
                tracing::warn!(component = component.id(), error = %e, "probe could not start");
                Presence::Absent
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Probe;
    use crate::shell::{MockResponse, MockRunner};
    use crate::ui::MockUI;

    fn argv(id: &str, argv: &[&str]) -> Component {
        Component::new(id).with_probe(Probe::Argv {
            argv: argv.iter().map(|s| s.to_string()).collect(),
            interpreter: None,
        })
    }

    #[test]
    fn zero_exit_is_present_with_first_line() {
        let runner = MockRunner::new();
        runner.respond("fd --version", MockResponse::output("fd 9.0.0\nextra\n"));
        let registry = ComponentRegistry::new(vec![argv("fd", &["fd", "--version"])]);
        let mut ui = MockUI::new();

        let snapshot = Detector::new(&runner).detect(&registry, &mut ui);

        assert_eq!(
            snapshot.presence("fd"),
            &Presence::Present("fd 9.0.0".to_string())
        );
        assert!(ui.spinner_lines().contains(&"found 'fd': 'fd 9.0.0'".to_string()));
        assert!(ui.messages().is_empty());
    }

    #[test]
    fn non_zero_exit_is_absent_and_silent() {
        let runner = MockRunner::new();
        runner.respond("tmux -V", MockResponse::exit(1));
        let registry = ComponentRegistry::new(vec![argv("tmux", &["tmux", "-V"])]);
        let mut ui = MockUI::new();

        let snapshot = Detector::new(&runner).detect(&registry, &mut ui);

        assert_eq!(snapshot.presence("tmux"), &Presence::Absent);
        assert!(ui.messages().is_empty());
    }

    #[test]
    fn missing_program_is_absent() {
        let runner = MockRunner::new();
        runner.respond("rg", MockResponse::not_found());
        let registry = ComponentRegistry::new(vec![argv("rg", &["rg", "--version"])]);
        let mut ui = MockUI::new();

        let snapshot = Detector::new(&runner).detect(&registry, &mut ui);
        assert!(!snapshot.is_present("rg"));
    }

    #[test]
    fn component_without_probe_is_absent_and_not_run() {
        let runner = MockRunner::new();
        let registry = ComponentRegistry::new(vec![Component::new("dotfiles")]);
        let mut ui = MockUI::new();

        let snapshot = Detector::new(&runner).detect(&registry, &mut ui);

        assert_eq!(snapshot.presence("dotfiles"), &Presence::Absent);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn shell_probe_runs_through_platform_shell() {
        let runner = MockRunner::new();
        runner.respond("[ -d", MockResponse::output("installed\n"));
        let registry = ComponentRegistry::new(vec![Component::new("obsidian").with_probe(
            Probe::Shell {
                script: "[ -d /Applications/Obsidian.app ] && echo installed".to_string(),
                interpreter: None,
            },
        )]);
        let mut ui = MockUI::new();

        let snapshot = Detector::new(&runner).detect(&registry, &mut ui);

        assert_eq!(snapshot.presence("obsidian").identifier(), Some("installed"));
        let calls = runner.calls();
        assert_eq!(calls[0].invocation.program(), "/bin/sh");
        assert!(calls[0].captured);
    }

    #[test]
    fn each_probe_runs_once_in_catalogue_order() {
        let runner = MockRunner::new();
        let registry = ComponentRegistry::new(vec![
            argv("b", &["b", "--version"]),
            argv("a", &["a", "--version"]),
        ]);
        let mut ui = MockUI::new();

        Detector::new(&runner).detect(&registry, &mut ui);

        assert_eq!(runner.command_lines(), vec!["b --version", "a --version"]);
    }

    #[test]
    fn identical_probe_results_give_identical_snapshots() {
        let runner = MockRunner::new();
        runner.respond("git --version", MockResponse::output("git version 2.39.2\n"));
        let registry = ComponentRegistry::new(vec![argv("git", &["git", "--version"])]);

        let first = Detector::new(&runner).detect(&registry, &mut MockUI::new());
        let second = Detector::new(&runner).detect(&registry, &mut MockUI::new());
        assert_eq!(first, second);
    }

    #[test]
    fn spinner_reports_counts() {
        let runner = MockRunner::new();
        runner.respond("x", MockResponse::exit(1));
        let registry = ComponentRegistry::new(vec![
            argv("git", &["git", "--version"]),
            argv("x", &["x"]),
        ]);
        let mut ui = MockUI::new();

        Detector::new(&runner).detect(&registry, &mut ui);
        assert_eq!(
            ui.spinner_outcomes(),
            vec![Ok("1 of 2 components present".to_string())]
        );
    }
}
