//! Version-control checkouts.

use super::InstallContext;
use crate::error::Result;
use crate::registry::{Component, GitCheckout};
use crate::shell::Invocation;

/// `git clone [clone_args] <repo> <dest>`
pub fn invocation(checkout: &GitCheckout) -> Invocation {
    Invocation::new("git")
        .arg("clone")
        .args(&checkout.clone_args)
        .arg(checkout.repo.as_str())
        .arg(checkout.dest.display().to_string())
}

pub fn install(
    ctx: &mut InstallContext<'_>,
    selected: &[(&Component, &GitCheckout)],
) -> Result<()> {
    for (component, checkout) in selected {
        ctx.execute(component.id(), &invocation(checkout))?;
    }
    Ok(())
}
