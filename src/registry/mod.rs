//! Component registry.
//!
//! The registry is the in-memory form of the catalogue: every component's
//! detection probe and installer descriptors, in catalogue order. It is
//! built once at startup and never changes afterwards.
//!
//! # Example
//!
//! ```
//! use provision::config::{parse_catalogue, HostEnvironment};
//! use provision::detection::PresenceSnapshot;
//! use provision::registry::{ComponentRegistry, InstallerKind, Package};
//! use std::path::Path;
//!
//! let yaml = "components:\n  fd:\n    package: { name: fd }\n  jq:\n    package: { name: jq }\n";
//! let catalogue = parse_catalogue(yaml, Path::new("provision.yml")).unwrap();
//! let host = HostEnvironment::from_lookup(|_| Err(std::env::VarError::NotPresent));
//! let registry = ComponentRegistry::from_config(&catalogue, &host).unwrap();
//!
//! let snapshot = PresenceSnapshot::default();
//! let names: Vec<&str> = registry
//!     .select::<Package>(&snapshot)
//!     .map(|(_, pkg)| pkg.name.as_str())
//!     .collect();
//! assert_eq!(names, vec!["fd", "jq"]);
//! assert_eq!(registry.declaring(InstallerKind::Package).count(), 2);
//! ```

mod builder;
pub mod component;
pub mod kind;

pub use component::{
    AppStoreApp, Component, Descriptor, DiskImage, GitCheckout, Installer, InstallerPackage,
    Package, PipedScript, Probe, RawFiles, Runtime, ShellCommand,
};
pub use kind::{InstallerKind, PHASES};

use crate::config::host::HostEnvironment;
use crate::config::schema::CatalogueConfig;
use crate::config::validator;
use crate::detection::PresenceSnapshot;
use crate::error::Result;

/// Every component in the catalogue, in catalogue order.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: Vec<Component>,
}

impl ComponentRegistry {
    /// Registry from already-built components.
    ///
    /// Later components with a duplicate id replace earlier ones in place.
    pub fn new(components: Vec<Component>) -> Self {
        let mut registry = Self::default();
        for component in components {
            match registry
                .components
                .iter_mut()
                .find(|c| c.id() == component.id())
            {
                Some(existing) => *existing = component,
                None => registry.components.push(component),
            }
        }
        registry
    }

    /// Validate and resolve a parsed catalogue.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` for invalid entries and
    /// `UndefinedVariable` for unknown `${name}` references.
    pub fn from_config(config: &CatalogueConfig, host: &HostEnvironment) -> Result<Self> {
        validator::validate(config)?;

        let components = config
            .components
            .iter()
            .map(|(id, entry)| builder::build_component(id, entry, host))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(count = components.len(), "Built component registry");
        Ok(Self { components })
    }

    /// Look up a component by id.
    pub fn get(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id() == id)
    }

    /// All components, in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components declaring `kind`, in catalogue order.
    pub fn declaring(&self, kind: InstallerKind) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(move |c| c.declares(kind))
    }

    /// Components a dispatcher for `D` should act on, with their descriptor.
    ///
    /// Components found present are skipped unless the kind ignores presence.
    pub fn select<'a, D: Descriptor + 'a>(
        &'a self,
        snapshot: &'a PresenceSnapshot,
    ) -> impl Iterator<Item = (&'a Component, &'a D)> + 'a {
        self.declaring(D::KIND).filter_map(move |c| {
            let descriptor = c.descriptor::<D>()?;
            if D::KIND.honours_presence() && snapshot.is_present(c.id()) {
                return None;
            }
            Some((c, descriptor))
        })
    }
}
