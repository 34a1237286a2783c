//! Run orchestration.

use std::time::{Duration, Instant};

use crate::config::host::HostEnvironment;
use crate::detection::{Detector, PresenceSnapshot};
use crate::error::Result;
use crate::install::{self, InstallContext, PhaseReport};
use crate::privilege::PrivilegeGuard;
use crate::registry::{ComponentRegistry, InstallerKind, PHASES};
use crate::secrets;
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

/// Options for one run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Report install invocations instead of executing them.
    pub dry_run: bool,
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunReport {
    /// Presence as detected before any installer ran.
    pub snapshot: PresenceSnapshot,
    /// One report per phase, in phase order, including empty phases.
    pub phases: Vec<PhaseReport>,
    pub dry_run: bool,
    pub duration: Duration,
}

impl RunReport {
    /// Install invocations issued (or reported) across all phases.
    pub fn total_invocations(&self) -> usize {
        self.phases.iter().map(|p| p.invocations).sum()
    }

    /// The phase report for `kind`.
    pub fn phase(&self, kind: InstallerKind) -> Option<&PhaseReport> {
        self.phases.iter().find(|p| p.kind == kind)
    }
}

/// Detects presence once, then runs every installer phase in order.
pub struct RunController<'a> {
    registry: &'a ComponentRegistry,
    host: &'a HostEnvironment,
    runner: &'a dyn CommandRunner,
    guard: &'a dyn PrivilegeGuard,
}

impl<'a> RunController<'a> {
    pub fn new(
        registry: &'a ComponentRegistry,
        host: &'a HostEnvironment,
        runner: &'a dyn CommandRunner,
        guard: &'a dyn PrivilegeGuard,
    ) -> Self {
        Self {
            registry,
            host,
            runner,
            guard,
        }
    }

    /// Run detection only.
    pub fn detect(&self, ui: &mut dyn UserInterface) -> PresenceSnapshot {
        Detector::new(self.runner).detect(self.registry, ui)
    }

    /// Detect, then dispatch every phase against the same snapshot.
    ///
    /// # Errors
    ///
    /// The first fatal installer error stops the run and is returned as is.
    pub fn run(&self, ui: &mut dyn UserInterface, options: &RunOptions) -> Result<RunReport> {
        let start = Instant::now();
        tracing::info!(
            components = self.registry.len(),
            dry_run = options.dry_run,
            "starting run"
        );

        let snapshot = self.detect(ui);
        let masker = secrets::masker_for(self.registry, self.host);
        let mut ctx = InstallContext::new(
            self.runner,
            self.guard,
            self.host,
            &masker,
            ui,
            options.dry_run,
        );

        let mut phases = Vec::with_capacity(PHASES.len());
        for kind in PHASES {
            let report = install::dispatch(kind, self.registry, &snapshot, &mut ctx)?;
            phases.push(report);
        }
        drop(ctx);

        let report = RunReport {
            snapshot,
            phases,
            dry_run: options.dry_run,
            duration: start.elapsed(),
        };
        tracing::info!(
            invocations = report.total_invocations(),
            duration = ?report.duration,
            "run finished"
        );

        let total = report.total_invocations();
        if options.dry_run {
            ui.success(&format!("Dry run: {} command(s) would run", total));
        } else if total == 0 {
            ui.success("Everything is already installed");
        } else {
            ui.success(&format!("Done: {} command(s) run", total));
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProvisionError;
    use crate::privilege::StaticGuard;
    use crate::registry::{
        Component, Installer, Package, PipedScript, Probe, RawFiles, ShellCommand,
    };
    use crate::shell::{MockResponse, MockRunner};
    use crate::ui::MockUI;
    use std::path::PathBuf;

    fn host() -> HostEnvironment {
        HostEnvironment::from_lookup(|key| match key {
            "HOME" => Ok("/Users/dev".to_string()),
            "SHELL" => Ok("/bin/zsh".to_string()),
            _ => Err(std::env::VarError::NotPresent),
        })
    }

    fn probe(program: &str) -> Probe {
        Probe::Argv {
            argv: vec![program.to_string(), "--version".to_string()],
            interpreter: None,
        }
    }

    fn package(id: &str) -> Component {
        Component::new(id)
            .with_probe(probe(id))
            .with_installer(Installer::Package(Package {
                name: format!("pkg{}", id),
            }))
    }

    fn dotfile(id: &str) -> Installer {
        Installer::Files(RawFiles {
            files: vec![(
                format!("https://example.com/{}rc", id),
                PathBuf::from(format!("/Users/dev/.{}rc", id)),
            )],
            headers: vec![],
            authenticated: false,
        })
    }

    fn absent(runner: &MockRunner, program: &str) {
        runner.respond(&format!("{} --version", program), MockResponse::not_found());
    }

    #[test]
    fn present_component_is_not_installed() {
        let registry = ComponentRegistry::new(vec![package("A")]);
        let runner = MockRunner::new();
        runner.respond("A --version", MockResponse::output("A version 2.1\n"));
        let host = host();
        let guard = StaticGuard(true);
        let mut ui = MockUI::new();

        let report = RunController::new(&registry, &host, &runner, &guard)
            .run(&mut ui, &RunOptions::default())
            .unwrap();

        assert_eq!(
            report.snapshot.presence("A").identifier(),
            Some("A version 2.1")
        );
        assert_eq!(report.total_invocations(), 0);
        assert!(!runner.has_call("brew"));
        assert!(ui.spinner_lines().contains(&"found 'A': 'A version 2.1'".to_string()));
        assert!(ui.has_success("Everything is already installed"));
    }

    #[test]
    fn absent_packages_are_batched() {
        let registry = ComponentRegistry::new(vec![package("B"), package("C")]);
        let runner = MockRunner::new();
        absent(&runner, "B");
        absent(&runner, "C");
        let host = host();
        let guard = StaticGuard(true);
        let mut ui = MockUI::new();

        let report = RunController::new(&registry, &host, &runner, &guard)
            .run(&mut ui, &RunOptions::default())
            .unwrap();

        assert_eq!(runner.run_lines(), vec!["brew install pkgB pkgC"]);
        assert_eq!(
            report.phase(InstallerKind::Package).map(|p| p.invocations),
            Some(1)
        );
    }

    #[test]
    fn file_fetch_runs_for_present_component() {
        let registry = ComponentRegistry::new(vec![Component::new("D")
            .with_probe(probe("D"))
            .with_installer(dotfile("d"))]);
        let runner = MockRunner::new();
        runner.respond("D --version", MockResponse::output("D 1.0"));
        let host = host();
        let guard = StaticGuard(true);
        let mut ui = MockUI::new();

        RunController::new(&registry, &host, &runner, &guard)
            .run(&mut ui, &RunOptions::default())
            .unwrap();

        assert_eq!(
            runner.run_lines(),
            vec!["curl -fsSL -o /Users/dev/.drc https://example.com/drc"]
        );
    }

    #[test]
    fn missing_privilege_stops_before_any_action_for_component_and_later_phases() {
        let registry = ComponentRegistry::new(vec![
            Component::new("E")
                .with_probe(probe("E"))
                .with_installer(Installer::Run(ShellCommand {
                    command: "sudo softwareupdate --install-rosetta".to_string(),
                    requires_privilege: true,
                }))
                .with_installer(dotfile("e")),
            Component::new("F")
                .with_probe(probe("F"))
                .with_installer(dotfile("f")),
        ]);
        let runner = MockRunner::new();
        absent(&runner, "E");
        absent(&runner, "F");
        let host = host();
        let guard = StaticGuard(false);
        let mut ui = MockUI::new();

        let err = RunController::new(&registry, &host, &runner, &guard)
            .run(&mut ui, &RunOptions::default())
            .unwrap_err();

        assert!(matches!(err, ProvisionError::PrivilegeRequired { .. }));
        assert!(runner.run_lines().is_empty());
    }

    #[test]
    fn piped_script_phase_runs_before_package_manager() {
        let registry = ComponentRegistry::new(vec![
            package("fd"),
            Component::new("brew")
                .with_probe(probe("brew"))
                .with_installer(Installer::Script(PipedScript {
                    url: "https://example.com/install.sh".to_string(),
                    fetch_args: "-fsSL".to_string(),
                    interpreter: "/bin/bash".to_string(),
                    env: vec![],
                    script_args: None,
                })),
        ]);
        let runner = MockRunner::new();
        absent(&runner, "fd");
        absent(&runner, "brew");
        let host = host();
        let guard = StaticGuard(true);
        let mut ui = MockUI::new();

        RunController::new(&registry, &host, &runner, &guard)
            .run(&mut ui, &RunOptions::default())
            .unwrap();

        let lines = runner.run_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("/bin/bash -c"));
        assert_eq!(lines[1], "brew install pkgfd");
    }

    #[test]
    fn detection_finishes_before_first_install() {
        let registry = ComponentRegistry::new(vec![package("B"), package("C")]);
        let runner = MockRunner::new();
        absent(&runner, "B");
        absent(&runner, "C");
        let host = host();
        let guard = StaticGuard(true);
        let mut ui = MockUI::new();

        RunController::new(&registry, &host, &runner, &guard)
            .run(&mut ui, &RunOptions::default())
            .unwrap();

        let captured: Vec<bool> = runner.calls().iter().map(|c| c.captured).collect();
        assert_eq!(captured, vec![true, true, false]);
    }

    #[test]
    fn second_run_installs_nothing_new() {
        let registry = ComponentRegistry::new(vec![package("B").with_installer(dotfile("b"))]);
        let runner = MockRunner::new();
        absent(&runner, "B");
        let host = host();
        let guard = StaticGuard(true);
        let controller = RunController::new(&registry, &host, &runner, &guard);

        let first = controller
            .run(&mut MockUI::new(), &RunOptions::default())
            .unwrap();
        assert_eq!(first.total_invocations(), 2);

        runner.respond("B --version", MockResponse::output("B 1.0"));
        runner.clear_calls();

        let second = controller
            .run(&mut MockUI::new(), &RunOptions::default())
            .unwrap();
        assert_eq!(second.total_invocations(), 1);
        assert!(!runner.has_call("brew"));
        assert!(runner.has_call("curl"));
    }

    #[test]
    fn dry_run_executes_nothing_but_still_detects() {
        let registry = ComponentRegistry::new(vec![package("B"), package("C")]);
        let runner = MockRunner::new();
        absent(&runner, "B");
        absent(&runner, "C");
        let host = host();
        let guard = StaticGuard(false);
        let mut ui = MockUI::new();

        let report = RunController::new(&registry, &host, &runner, &guard)
            .run(&mut ui, &RunOptions { dry_run: true })
            .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.total_invocations(), 1);
        assert!(runner.run_lines().is_empty());
        assert_eq!(runner.calls().len(), 2);
        assert!(ui.has_message("would run: brew install pkgB pkgC"));
        assert!(ui.has_success("Dry run: 1 command(s) would run"));
    }

    #[test]
    fn every_phase_is_reported_in_order() {
        let registry = ComponentRegistry::default();
        let runner = MockRunner::new();
        let host = host();
        let guard = StaticGuard(true);

        let report = RunController::new(&registry, &host, &runner, &guard)
            .run(&mut MockUI::new(), &RunOptions::default())
            .unwrap();

        let kinds: Vec<InstallerKind> = report.phases.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, PHASES.to_vec());
    }
}
