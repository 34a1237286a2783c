//! Non-interactive privilege checks.
//!
//! Installers that call `sudo` must never trigger a password prompt in the
//! middle of a run. They ask a [`PrivilegeGuard`] first and abort when the
//! answer is no.

use crate::shell::{is_elevated, CommandRunner, Invocation};

/// Answers whether elevated privilege is available without prompting.
pub trait PrivilegeGuard {
    fn has_elevated_privilege(&self) -> bool;
}

/// Production guard: root, or a cached `sudo` credential.
pub struct SudoGuard<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> SudoGuard<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// `sudo -n -v`: refresh the cached credential, failing instead of prompting.
    pub fn check_invocation() -> Invocation {
        Invocation::new("sudo").args(["-n", "-v"])
    }
}

impl PrivilegeGuard for SudoGuard<'_> {
    fn has_elevated_privilege(&self) -> bool {
        if is_elevated() {
            return true;
        }

        match self.runner.capture(&Self::check_invocation()) {
            Ok(result) => {
                tracing::debug!(success = result.success, "sudo -n -v");
                result.success
            }
            Err(e) => {
                tracing::debug!(error = %e, "could not run sudo");
                false
            }
        }
    }
}

/// Guard with a fixed answer, for tests and dry-run previews.
#[derive(Debug, Clone, Copy)]
pub struct StaticGuard(pub bool);

impl PrivilegeGuard for StaticGuard {
    fn has_elevated_privilege(&self) -> bool {
        self.0
    }
}
