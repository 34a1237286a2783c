//! Keeping credentials out of displayed output.
//!
//! - [`OutputMasker`] replaces secret values in text
//! - [`SecretMatcher`] spots secret-looking environment variable names
//!
//! [`masker_for`] gathers every secret a run could display: the bearer
//! credential and any script environment override whose name looks secret.

pub mod mask;
pub mod pattern;

pub use mask::OutputMasker;
pub use pattern::{SecretMatcher, SecretPattern, BUILTIN_PATTERNS};

use crate::config::host::HostEnvironment;
use crate::registry::{ComponentRegistry, PipedScript};

/// Build the masker for one run.
pub fn masker_for(registry: &ComponentRegistry, host: &HostEnvironment) -> OutputMasker {
    let mut masker = OutputMasker::new();
    if let Some(credential) = &host.credential {
        masker.add_secret(credential.as_str());
    }

    let matcher = SecretMatcher::with_builtins();
    for component in registry.iter() {
        if let Some(script) = component.descriptor::<PipedScript>() {
            masker.add_secrets(
                script
                    .env
                    .iter()
                    .filter(|(name, _)| matcher.is_secret(name))
                    .map(|(_, value)| value.as_str()),
            );
        }
    }

    tracing::debug!(secrets = masker.secret_count(), "output masker ready");
    masker
}
