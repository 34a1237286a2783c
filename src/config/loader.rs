//! Catalogue discovery and loading.
//!
//! The catalogue is looked up in this order, first match wins:
//! 1. An explicit `--config` path (must exist)
//! 2. `./provision.yml` in the working directory
//! 3. `~/.provision/catalogue.yml`
//! 4. The built-in catalogue compiled into the binary

use crate::config::schema::CatalogueConfig;
use crate::error::{ProvisionError, Result};
use include_dir::{include_dir, Dir};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const PROJECT_CATALOGUE: &str = "provision.yml";

static BUILTIN_CATALOGUES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/catalogue");

const BUILTIN_NAME: &str = "default.yml";

/// Where a catalogue comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueSource {
    /// A catalogue file on disk.
    File(PathBuf),
    /// The catalogue shipped inside the binary.
    Builtin,
}

impl fmt::Display for CatalogueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Builtin => write!(f, "built-in catalogue"),
        }
    }
}

/// Decide which catalogue to load.
///
/// # Errors
///
/// Returns `ConfigNotFound` if `explicit` is given but does not exist.
pub fn discover_catalogue(
    explicit: Option<&Path>,
    working_dir: &Path,
    home: &Path,
) -> Result<CatalogueSource> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(CatalogueSource::File(path.to_path_buf()));
        }
        return Err(ProvisionError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let project = working_dir.join(PROJECT_CATALOGUE);
    if project.is_file() {
        return Ok(CatalogueSource::File(project));
    }

    let user = home.join(".provision").join("catalogue.yml");
    if user.is_file() {
        return Ok(CatalogueSource::File(user));
    }

    Ok(CatalogueSource::Builtin)
}

/// Load the catalogue a source points at.
pub fn load_catalogue(source: &CatalogueSource) -> Result<CatalogueConfig> {
    match source {
        CatalogueSource::File(path) => load_catalogue_file(path),
        CatalogueSource::Builtin => builtin_catalogue(),
    }
}

/// Load and parse a catalogue file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_catalogue_file(path: &Path) -> Result<CatalogueConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ProvisionError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ProvisionError::Io(e)
        }
    })?;

    parse_catalogue(&content, path)
}

/// Parse YAML content into a catalogue.
///
/// `source_path` is only used for error reporting.
pub fn parse_catalogue(content: &str, source_path: &Path) -> Result<CatalogueConfig> {
    serde_yaml::from_str(content).map_err(|e| ProvisionError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// The catalogue compiled into the binary.
pub fn builtin_catalogue() -> Result<CatalogueConfig> {
    let file = BUILTIN_CATALOGUES
        .get_file(BUILTIN_NAME)
        .ok_or_else(|| ProvisionError::ConfigNotFound {
            path: PathBuf::from(BUILTIN_NAME),
        })?;
    let content = file.contents_utf8().ok_or_else(|| ProvisionError::ConfigParseError {
        path: PathBuf::from(BUILTIN_NAME),
        message: "built-in catalogue is not UTF-8".to_string(),
    })?;

    parse_catalogue(content, Path::new(BUILTIN_NAME))
}
