//! Remote files fetched with `curl`, every run.
//!
//! This kind ignores presence: dotfiles are refreshed even when the tool they
//! configure is already installed.

use super::InstallContext;
use crate::config::host::CREDENTIAL_VAR;
use crate::error::{ProvisionError, Result};
use crate::registry::{Component, RawFiles};
use crate::shell::Invocation;
use std::path::Path;

/// `curl -fsSL -o <dest> [-H <header>]... <url>`
///
/// `bearer`, when given, becomes the last header.
pub fn invocation(url: &str, dest: &Path, headers: &[String], bearer: Option<&str>) -> Invocation {
    let mut inv = Invocation::new("curl")
        .args(["-fsSL", "-o"])
        .arg(dest.display().to_string());
    for header in headers {
        inv = inv.arg("-H").arg(header.as_str());
    }
    if let Some(token) = bearer {
        inv = inv.arg("-H").arg(format!("Authorization: Bearer {}", token));
    }
    inv.arg(url)
}

pub fn install(ctx: &mut InstallContext<'_>, selected: &[(&Component, &RawFiles)]) -> Result<()> {
    for (component, files) in selected {
        let bearer = if files.authenticated {
            credential(ctx, component.id())?
        } else {
            None
        };

        for (url, dest) in &files.files {
            let inv = invocation(url, dest, &files.headers, bearer.as_deref());
            ctx.execute(component.id(), &inv)?;
        }
    }
    Ok(())
}

/// The host credential for an authenticated component.
///
/// A dry run without a credential warns and fetches unauthenticated.
fn credential(ctx: &mut InstallContext<'_>, component: &str) -> Result<Option<String>> {
    if let Some(token) = &ctx.host.credential {
        return Ok(Some(token.clone()));
    }

    let err = ProvisionError::MissingCredential {
        component: component.to_string(),
        variable: CREDENTIAL_VAR.to_string(),
    };
    if ctx.dry_run {
        tracing::warn!(component, "credential missing during dry run");
        ctx.ui.warning(&format!("would abort: {}", err));
        return Ok(None);
    }

    tracing::error!(component, variable = CREDENTIAL_VAR, "credential missing");
    Err(err)
}
