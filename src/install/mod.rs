//! Installer dispatchers, one module per installer kind.
//!
//! Every dispatcher receives the components selected for its kind (absent
//! ones, or all declaring ones for kinds that ignore presence) and issues
//! external invocations through an [`InstallContext`]. The context is the
//! only place commands are displayed, masked, executed or skipped for a
//! dry run, and the only place a failing command becomes an error.

pub mod app_store;
pub mod command;
pub mod disk_image;
pub mod files;
pub mod git;
pub mod installer_pkg;
pub mod package;
pub mod runtime;
pub mod script;

use crate::config::host::HostEnvironment;
use crate::detection::PresenceSnapshot;
use crate::error::{ProvisionError, Result};
use crate::privilege::PrivilegeGuard;
use crate::registry::{
    AppStoreApp, Component, ComponentRegistry, Descriptor, DiskImage, GitCheckout,
    InstallerKind, InstallerPackage, Package, PipedScript, RawFiles, Runtime, ShellCommand,
};
use crate::secrets::OutputMasker;
use crate::shell::{CommandRunner, Invocation};
use crate::ui::UserInterface;

/// Everything a dispatcher needs to act on the host.
pub struct InstallContext<'a> {
    pub runner: &'a dyn CommandRunner,
    pub guard: &'a dyn PrivilegeGuard,
    pub host: &'a HostEnvironment,
    pub masker: &'a OutputMasker,
    pub ui: &'a mut dyn UserInterface,
    /// Report invocations instead of executing them.
    pub dry_run: bool,
    invocations: usize,
}

impl<'a> InstallContext<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        guard: &'a dyn PrivilegeGuard,
        host: &'a HostEnvironment,
        masker: &'a OutputMasker,
        ui: &'a mut dyn UserInterface,
        dry_run: bool,
    ) -> Self {
        Self {
            runner,
            guard,
            host,
            masker,
            ui,
            dry_run,
            invocations: 0,
        }
    }

    /// Invocations issued (or reported, in a dry run) so far.
    pub fn invocations(&self) -> usize {
        self.invocations
    }

    /// Run one install invocation on behalf of `subject`.
    ///
    /// # Errors
    ///
    /// Returns `CommandFailed` if the command cannot be started or exits
    /// non-zero. The command line in the error is masked.
    pub fn execute(&mut self, subject: &str, invocation: &Invocation) -> Result<()> {
        let line = self.masker.mask(&invocation.command_line());
        self.invocations += 1;

        if self.dry_run {
            tracing::info!(component = subject, command = %line, "dry run");
            self.ui.message(&format!("would run: {}", line));
            return Ok(());
        }

        tracing::info!(component = subject, command = %line, "running");
        self.ui.show_command(&line);

        let result = self.runner.run(invocation).map_err(|e| {
            tracing::error!(component = subject, error = %e, "could not start command");
            ProvisionError::CommandFailed {
                command: line.clone(),
                code: None,
            }
        })?;

        if !result.success {
            tracing::error!(component = subject, code = ?result.exit_code, "command failed");
            return Err(ProvisionError::CommandFailed {
                command: line,
                code: result.exit_code,
            });
        }

        tracing::debug!(component = subject, duration = ?result.duration, "command finished");
        Ok(())
    }

    /// Abort unless non-interactive elevated privilege is available.
    ///
    /// In a dry run a missing privilege is only reported.
    ///
    /// # Errors
    ///
    /// Returns `PrivilegeRequired` naming `component`.
    pub fn require_privilege(&mut self, component: &str) -> Result<()> {
        if self.guard.has_elevated_privilege() {
            return Ok(());
        }

        let err = ProvisionError::PrivilegeRequired {
            component: component.to_string(),
        };
        if self.dry_run {
            tracing::warn!(component, "privilege missing during dry run");
            self.ui.warning(&format!("would abort: {}", err));
            return Ok(());
        }

        tracing::error!(component, "privilege required");
        Err(err)
    }
}

/// Components and invocations handled by one phase.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PhaseReport {
    pub kind: InstallerKind,
    pub components: Vec<String>,
    pub invocations: usize,
}

/// Run the dispatcher for `kind` over the components selected for it.
pub fn dispatch(
    kind: InstallerKind,
    registry: &ComponentRegistry,
    snapshot: &PresenceSnapshot,
    ctx: &mut InstallContext<'_>,
) -> Result<PhaseReport> {
    match kind {
        InstallerKind::Script => run_phase::<PipedScript>(registry, snapshot, ctx, script::install),
        InstallerKind::Package => run_phase::<Package>(registry, snapshot, ctx, package::install),
        InstallerKind::Runtime => run_phase::<Runtime>(registry, snapshot, ctx, runtime::install),
        InstallerKind::Run => run_phase::<ShellCommand>(registry, snapshot, ctx, command::install),
        InstallerKind::Pkg => {
            run_phase::<InstallerPackage>(registry, snapshot, ctx, installer_pkg::install)
        }
        InstallerKind::AppStore => {
            run_phase::<AppStoreApp>(registry, snapshot, ctx, app_store::install)
        }
        InstallerKind::Dmg => run_phase::<DiskImage>(registry, snapshot, ctx, disk_image::install),
        InstallerKind::Files => run_phase::<RawFiles>(registry, snapshot, ctx, files::install),
        InstallerKind::Git => run_phase::<GitCheckout>(registry, snapshot, ctx, git::install),
    }
}

type InstallFn<D> = fn(&mut InstallContext<'_>, &[(&Component, &D)]) -> Result<()>;

fn run_phase<D: Descriptor>(
    registry: &ComponentRegistry,
    snapshot: &PresenceSnapshot,
    ctx: &mut InstallContext<'_>,
    install: InstallFn<D>,
) -> Result<PhaseReport> {
    let selected: Vec<(&Component, &D)> = registry.select::<D>(snapshot).collect();
    let components: Vec<String> = selected.iter().map(|(c, _)| c.id().to_string()).collect();

    if selected.is_empty() {
        tracing::debug!(phase = %D::KIND, "nothing to do");
    } else if D::KIND.is_batched() {
        ctx.ui
            .show_phase(&format!("{} (one batch)", D::KIND), selected.len());
        tracing::info!(phase = %D::KIND, components = ?components, "starting batched phase");
    } else {
        ctx.ui.show_phase(D::KIND.name(), selected.len());
        tracing::info!(phase = %D::KIND, components = ?components, "starting phase");
    }

    let before = ctx.invocations();
    install(ctx, &selected)?;

    Ok(PhaseReport {
        kind: D::KIND,
        components,
        invocations: ctx.invocations() - before,
    })
}

/// Ids of a selection joined for batch logging.
pub(crate) fn joined_ids<D>(selected: &[(&Component, &D)]) -> String {
    selected
        .iter()
        .map(|(c, _)| c.id())
        .collect::<Vec<_>>()
        .join(",")
}
