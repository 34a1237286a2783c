//! Catalogue loading and host configuration.
//!
//! This module handles all aspects of configuration:
//! - Catalogue schema definitions in [`schema`]
//! - Catalogue discovery and loading in [`loader`]
//! - `${var}` interpolation in [`interpolation`]
//! - Catalogue validation in [`validator`]
//! - Environment-derived values in [`host`]
//!
//! # Example
//!
//! ```
//! use provision::config::parse_catalogue;
//! use std::path::Path;
//!
//! let yaml = "components:\n  fd:\n    detect: { command: [fd, --version] }\n    package: { name: fd }\n";
//! let catalogue = parse_catalogue(yaml, Path::new("provision.yml")).unwrap();
//! assert!(catalogue.components.contains_key("fd"));
//! ```

pub mod host;
pub mod interpolation;
pub mod loader;
pub mod schema;
pub mod validator;

pub use host::{HostEnvironment, CREDENTIAL_VAR};
pub use interpolation::{parse_interpolation, resolve_string, InterpolationContext, Segment};
pub use loader::{
    builtin_catalogue, discover_catalogue, load_catalogue, load_catalogue_file, parse_catalogue,
    CatalogueSource, PROJECT_CATALOGUE,
};
pub use schema::{
    AppStoreConfig, CatalogueConfig, ComponentConfig, DetectConfig, DiskImageConfig, FilesConfig,
    GitConfig, InstallerPackageConfig, PackageConfig, ProbeCommand, RunConfig, RuntimeConfig,
    ScriptConfig,
};
pub use validator::{validate, validate_catalogue, ValidationError};

#[cfg(test)]
mod tests {
    #[test]
    fn serde_yaml_handles_nested_structures() {
        let yaml = r#"
          components:
            fd:
              package:
                name: fd
        "#;
        let parsed: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed["components"]["fd"]["package"]["name"], "fd");
    }
}
