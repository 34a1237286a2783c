//! Installer kinds and the fixed phase order.

use serde::Serialize;
use std::fmt;

/// One of the fixed installation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallerKind {
    /// Remote script piped into an interpreter.
    Script,
    /// Package manager (`brew`).
    Package,
    /// Runtime version manager (`nvm`) via the login shell.
    Runtime,
    /// Literal shell command.
    Run,
    /// Signed installer package.
    Pkg,
    /// App-store install (`mas`).
    AppStore,
    /// Disk image with application bundles.
    Dmg,
    /// Raw files fetched into place.
    Files,
    /// Source-control checkout.
    Git,
}

/// Every kind, in the order a run executes them.
///
/// Piped scripts go first because the package manager is itself installed
/// by one.
pub const PHASES: [InstallerKind; 9] = [
    InstallerKind::Script,
    InstallerKind::Package,
    InstallerKind::Runtime,
    InstallerKind::Run,
    InstallerKind::Pkg,
    InstallerKind::AppStore,
    InstallerKind::Dmg,
    InstallerKind::Files,
    InstallerKind::Git,
];

impl InstallerKind {
    /// Catalogue key for this kind.
    pub fn name(self) -> &'static str {
        match self {
            InstallerKind::Script => "script",
            InstallerKind::Package => "package",
            InstallerKind::Runtime => "runtime",
            InstallerKind::Run => "run",
            InstallerKind::Pkg => "pkg",
            InstallerKind::AppStore => "app_store",
            InstallerKind::Dmg => "dmg",
            InstallerKind::Files => "files",
            InstallerKind::Git => "git",
        }
    }

    /// Whether components already found present are skipped.
    ///
    /// Raw files are always refetched so dotfiles track upstream.
    pub fn honours_presence(self) -> bool {
        !matches!(self, InstallerKind::Files)
    }

    /// Whether all selected components are handled by one invocation.
    pub fn is_batched(self) -> bool {
        matches!(self, InstallerKind::Package | InstallerKind::AppStore)
    }

    /// Position in [`PHASES`].
    pub fn phase(self) -> usize {
        PHASES.iter().position(|k| *k == self).unwrap_or(PHASES.len())
    }
}

impl fmt::Display for InstallerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
