//! Component model: detection probe plus installer descriptors.
//!
//! Descriptors are plain resolved data. Interpolation has already happened
//! by the time a [`Component`] exists, and no descriptor refers to another
//! component.

use crate::registry::kind::InstallerKind;
use crate::shell::Invocation;
use std::path::PathBuf;

/// How to tell whether a component is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// Execute an argument vector directly.
    Argv {
        argv: Vec<String>,
        /// Prepended to `argv` when set.
        interpreter: Option<String>,
    },
    /// Interpret a script through a shell.
    Shell {
        script: String,
        /// Replaces the platform shell when set.
        interpreter: Option<String>,
    },
}

impl Probe {
    /// The invocation the detector runs for this probe.
    pub fn invocation(&self) -> Invocation {
        match self {
            Probe::Shell {
                script,
                interpreter: Some(interpreter),
            } => Invocation::shell_with(interpreter.as_str(), script.as_str()),
            Probe::Shell {
                script,
                interpreter: None,
            } => Invocation::shell(script.as_str()),
            Probe::Argv {
                argv,
                interpreter: Some(interpreter),
            } => Invocation::new(interpreter.as_str()).args(argv),
            Probe::Argv {
                argv,
                interpreter: None,
            } => match argv.split_first() {
                Some((program, rest)) => Invocation::new(program.as_str()).args(rest),
                // Rejected when the registry is built.
                None => Invocation::new(""),
            },
        }
    }
}

/// `brew install <name>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
}

/// `<interpreter> -c "$(curl <fetch_args> <url>)" [-- <script_args>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipedScript {
    pub url: String,
    pub fetch_args: String,
    pub interpreter: String,
    pub env: Vec<(String, String)>,
    pub script_args: Option<String>,
}

/// `nvm install <version>` then `nvm use <version>` in a login shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runtime {
    pub version: String,
}

/// A literal shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub command: String,
    pub requires_privilege: bool,
}

/// A signed `.pkg` fetched and handed to `installer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerPackage {
    pub url: String,
}

/// An app-store id for `mas install`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppStoreApp {
    pub app_id: String,
}

/// A `.dmg` whose application bundles are copied out of the mounted volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskImage {
    pub url: String,
    pub volume_path: String,
}

/// Remote files fetched to local destinations, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFiles {
    pub files: Vec<(String, PathBuf)>,
    pub headers: Vec<String>,
    /// Send the host credential as a bearer token.
    pub authenticated: bool,
}

/// `git clone [clone_args] <repo> <dest>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCheckout {
    pub repo: String,
    pub dest: PathBuf,
    pub clone_args: Vec<String>,
}

/// One installer descriptor; at most one per kind on a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Installer {
    Script(PipedScript),
    Package(Package),
    Runtime(Runtime),
    Run(ShellCommand),
    Pkg(InstallerPackage),
    AppStore(AppStoreApp),
    Dmg(DiskImage),
    Files(RawFiles),
    Git(GitCheckout),
}

impl Installer {
    pub fn kind(&self) -> InstallerKind {
        match self {
            Installer::Script(_) => InstallerKind::Script,
            Installer::Package(_) => InstallerKind::Package,
            Installer::Runtime(_) => InstallerKind::Runtime,
            Installer::Run(_) => InstallerKind::Run,
            Installer::Pkg(_) => InstallerKind::Pkg,
            Installer::AppStore(_) => InstallerKind::AppStore,
            Installer::Dmg(_) => InstallerKind::Dmg,
            Installer::Files(_) => InstallerKind::Files,
            Installer::Git(_) => InstallerKind::Git,
        }
    }
}

/// A descriptor type tied to exactly one [`InstallerKind`].
///
/// Lets dispatchers ask the registry for typed descriptors instead of
/// matching on [`Installer`] themselves.
pub trait Descriptor: Sized {
    const KIND: InstallerKind;

    /// Borrow the descriptor out of `installer` if the variant matches.
    fn from_installer(installer: &Installer) -> Option<&Self>;
}

macro_rules! descriptor {
    ($ty:ty, $variant:ident) => {
        impl Descriptor for $ty {
            const KIND: InstallerKind = InstallerKind::$variant;

            fn from_installer(installer: &Installer) -> Option<&Self> {
                match installer {
                    Installer::$variant(d) => Some(d),
                    _ => None,
                }
            }
        }
    };
}

descriptor!(PipedScript, Script);
descriptor!(Package, Package);
descriptor!(Runtime, Runtime);
descriptor!(ShellCommand, Run);
descriptor!(InstallerPackage, Pkg);
descriptor!(AppStoreApp, AppStore);
descriptor!(DiskImage, Dmg);
descriptor!(RawFiles, Files);
descriptor!(GitCheckout, Git);

/// One provisionable unit from the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    id: String,
    probe: Option<Probe>,
    installers: Vec<Installer>,
}

impl Component {
    /// A component with no probe and no installers.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            probe: None,
            installers: Vec::new(),
        }
    }

    pub fn with_probe(mut self, probe: Probe) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Attach an installer, replacing any existing one of the same kind.
    pub fn with_installer(mut self, installer: Installer) -> Self {
        let kind = installer.kind();
        self.installers.retain(|i| i.kind() != kind);
        self.installers.push(installer);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn probe(&self) -> Option<&Probe> {
        self.probe.as_ref()
    }

    pub fn installers(&self) -> &[Installer] {
        &self.installers
    }

    /// Declared kinds, in phase order.
    pub fn kinds(&self) -> Vec<InstallerKind> {
        let mut kinds: Vec<_> = self.installers.iter().map(Installer::kind).collect();
        kinds.sort_by_key(|k| k.phase());
        kinds
    }

    pub fn declares(&self, kind: InstallerKind) -> bool {
        self.installers.iter().any(|i| i.kind() == kind)
    }

    /// The typed descriptor of kind `D::KIND`, if declared.
    pub fn descriptor<D: Descriptor>(&self) -> Option<&D> {
        self.installers.iter().find_map(D::from_installer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argv_probe_runs_directly() {
        let probe = Probe::Argv {
            argv: vec!["fd".to_string(), "--version".to_string()],
            interpreter: None,
        };
        let inv = probe.invocation();
        assert_eq!(inv.program(), "fd");
        assert_eq!(inv.arguments(), ["--version"]);
    }

    #[test]
    fn argv_probe_with_interpreter_is_prefixed() {
        let probe = Probe::Argv {
            argv: vec!["-c".to_string(), "nvm --version".to_string()],
            interpreter: Some("/bin/zsh".to_string()),
        };
        let inv = probe.invocation();
        assert_eq!(inv.program(), "/bin/zsh");
        assert_eq!(inv.arguments(), ["-c", "nvm --version"]);
    }

    #[test]
    fn shell_probe_uses_platform_shell() {
        let probe = Probe::Shell {
            script: "[ -d /Applications/Discord.app ] && echo installed".to_string(),
            interpreter: None,
        };
        let inv = probe.invocation();
        assert_eq!(inv.program(), "/bin/sh");
        assert_eq!(
            inv.command_line(),
            "[ -d /Applications/Discord.app ] && echo installed"
        );
    }

    #[test]
    fn shell_probe_interpreter_replaces_shell() {
        let probe = Probe::Shell {
            script: "nvm --version".to_string(),
            interpreter: Some("/bin/zsh".to_string()),
        };
        let inv = probe.invocation();
        assert_eq!(inv.program(), "/bin/zsh");
        assert_eq!(inv.arguments(), ["-c", "nvm --version"]);
    }

    #[test]
    fn typed_descriptor_lookup() {
        let component = Component::new("fzf")
            .with_installer(Installer::Package(Package {
                name: "fzf".to_string(),
            }))
            .with_installer(Installer::Files(RawFiles {
                files: vec![],
                headers: vec![],
                authenticated: false,
            }));

        assert_eq!(
            component.descriptor::<Package>().map(|p| p.name.as_str()),
            Some("fzf")
        );
        assert!(component.descriptor::<GitCheckout>().is_none());
        assert!(component.declares(InstallerKind::Files));
    }

    #[test]
    fn kinds_are_listed_in_phase_order() {
        let component = Component::new("vim")
            .with_installer(Installer::Files(RawFiles {
                files: vec![],
                headers: vec![],
                authenticated: false,
            }))
            .with_installer(Installer::Run(ShellCommand {
                command: "mkdir -p ~/.vim".to_string(),
                requires_privilege: false,
            }));

        assert_eq!(
            component.kinds(),
            vec![InstallerKind::Run, InstallerKind::Files]
        );
    }

    #[test]
    fn with_installer_replaces_same_kind() {
        let component = Component::new("jq")
            .with_installer(Installer::Package(Package {
                name: "jq".to_string(),
            }))
            .with_installer(Installer::Package(Package {
                name: "jq@1.7".to_string(),
            }));

        assert_eq!(component.installers().len(), 1);
        assert_eq!(component.descriptor::<Package>().unwrap().name, "jq@1.7");
    }
}
