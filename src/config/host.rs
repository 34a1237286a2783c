//! Host environment snapshot.
//!
//! Every value the engine takes from the process environment is read once,
//! here, and passed explicitly to whatever needs it.

use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

/// Variable holding the bearer credential for authenticated file fetches.
pub const CREDENTIAL_VAR: &str = "GITHUB_TOKEN";

/// Values read from the operator's environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnvironment {
    /// Operator's home directory (`HOME`).
    pub home: PathBuf,

    /// Operator's login shell (`SHELL`), used for login-shell scoped commands.
    pub shell: String,

    /// Bearer credential for private remote resources.
    pub credential: Option<String>,

    /// Where downloaded installer artifacts are staged.
    pub temp_dir: PathBuf,

    /// Where application bundles from disk images are copied.
    pub applications_dir: PathBuf,
}

impl HostEnvironment {
    /// Read the real process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key: &str| std::env::var(key))
    }

    /// Build from a custom variable lookup.
    ///
    /// This allows testing without modifying actual environment variables.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let home = lookup("HOME")
            .ok()
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("/"));

        let shell = lookup("SHELL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "/bin/sh".to_string());

        let credential = lookup(CREDENTIAL_VAR).ok().filter(|t| !t.is_empty());

        Self {
            home,
            shell,
            credential,
            temp_dir: PathBuf::from("/tmp"),
            applications_dir: PathBuf::from("/Applications"),
        }
    }

    /// Variables available to `${name}` interpolation in the catalogue.
    ///
    /// The credential is deliberately absent; it only ever reaches an
    /// `Authorization` header.
    pub fn variables(&self) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert("home".to_string(), self.home.display().to_string());
        vars.insert("shell".to_string(), self.shell.clone());
        vars
    }
}
