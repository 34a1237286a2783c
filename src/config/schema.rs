//! Catalogue schema definitions.
//!
//! These structs map one-to-one onto the YAML catalogue format. They are
//! deliberately dumb: interpolation and validation happen when the
//! catalogue is turned into a [`ComponentRegistry`](crate::registry::ComponentRegistry).

use indexmap::IndexMap;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};

/// Root of a catalogue file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogueConfig {
    /// Components keyed by id, in catalogue order.
    pub components: IndexMap<String, ComponentConfig>,
}

/// One component: an optional detection probe plus any installer blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentConfig {
    /// How to tell whether the component is already installed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detect: Option<DetectConfig>,

    /// Package-manager install.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageConfig>,

    /// Remote script piped into an interpreter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<ScriptConfig>,

    /// Runtime version installed through the login shell's version manager.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<RuntimeConfig>,

    /// Literal shell command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<RunConfig>,

    /// Signed installer package.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkg: Option<InstallerPackageConfig>,

    /// App-store install.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_store: Option<AppStoreConfig>,

    /// Disk image containing application bundles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dmg: Option<DiskImageConfig>,

    /// Raw files fetched into place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<FilesConfig>,

    /// Source-control checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git: Option<GitConfig>,
}

/// Detection probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectConfig {
    /// Argument vector, or a script string when `shell` is set.
    ///
    /// Only lowercase `${name}` references are catalogue variables.
    pub command: ProbeCommand,

    /// Interpret `command` through a shell.
    #[serde(default, skip_serializing_if = "is_false")]
    pub shell: bool,

    /// Alternate interpreter (replaces the platform shell for scripts,
    /// prefixes the argument vector otherwise).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,
}

/// Probe command as written in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProbeCommand {
    /// `command: [fd, --version]`
    Argv(Vec<String>),
    /// `command: "[ -d /Applications/X.app ] && echo installed"`
    Script(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageConfig {
    /// Package identifier passed to the package manager.
    #[serde(alias = "package")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptConfig {
    /// Script location.
    pub url: String,

    /// Flags for the fetch utility (a shell fragment).
    #[serde(default = "default_fetch_args")]
    pub fetch_args: String,

    /// Interpreter the fetched script is handed to.
    #[serde(default = "default_script_interpreter", alias = "shell")]
    pub interpreter: String,

    /// Environment overrides for the script.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub env: IndexMap<String, String>,

    /// Arguments passed to the script after `--` (a shell fragment).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_scalar"
    )]
    pub script_args: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Version handed to `nvm install` / `nvm use`.
    #[serde(deserialize_with = "scalar")]
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Command interpreted by the platform shell.
    ///
    /// `${home}` and `${shell}` are filled in from the catalogue; other
    /// `${NAME}` forms reach the shell unchanged.
    pub command: String,

    /// Abort unless non-interactive sudo is available.
    #[serde(default, alias = "require_sudo", skip_serializing_if = "is_false")]
    pub requires_privilege: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallerPackageConfig {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppStoreConfig {
    /// Numeric app id; quoted or bare in YAML.
    #[serde(deserialize_with = "scalar")]
    pub app: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiskImageConfig {
    pub url: String,

    /// Where the image mounts, e.g. `/Volumes/Discord`.
    pub volume_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesConfig {
    /// Remote URL to local destination, fetched in this order.
    #[serde(alias = "file_map")]
    pub map: IndexMap<String, String>,

    /// Extra request headers (`Name: value`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<String>,

    /// Send the host credential as a bearer token.
    #[serde(default, skip_serializing_if = "is_false")]
    pub authenticated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitConfig {
    /// Remote to clone.
    pub repo: String,

    /// Checkout destination.
    pub dest: String,

    /// Extra flags for `git clone`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clone_args: Vec<String>,
}

fn default_fetch_args() -> String {
    "-fsSL".to_string()
}

fn default_script_interpreter() -> String {
    "/bin/bash".to_string()
}

fn is_false(v: &bool) -> bool {
    !v
}

/// YAML scalars that must end up as strings even when written bare
/// (`app: 904280696`). Bare decimals such as `version: 16.20` are rejected:
/// YAML reads them as floats and the trailing zero is already gone.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(u64),
    Float(f64),
}

impl Scalar {
    fn into_text<E: de::Error>(self) -> Result<String, E> {
        match self {
            Scalar::Text(s) => Ok(s),
            Scalar::Integer(i) => Ok(i.to_string()),
            Scalar::Float(f) => Err(E::custom(format!(
                "bare number {} would lose its exact spelling, quote it as a string",
                f
            ))),
        }
    }
}

fn scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer)?.into_text()
}

fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_text)
        .transpose()
}
