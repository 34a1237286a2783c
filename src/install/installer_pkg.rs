//! Signed installer packages (`.pkg`).

use super::InstallContext;
use crate::error::Result;
use crate::registry::{Component, InstallerPackage};
use crate::shell::Invocation;
use std::path::Path;

/// Download to `<temp>/<id>.pkg`, then `sudo installer -pkg ... -target /`.
pub fn invocations(temp_dir: &Path, id: &str, pkg: &InstallerPackage) -> [Invocation; 2] {
    let staged = temp_dir.join(format!("{}.pkg", id)).display().to_string();
    [
        Invocation::new("curl").args(["-fsSL", "-o", staged.as_str(), pkg.url.as_str()]),
        Invocation::new("sudo").args(["installer", "-pkg", staged.as_str(), "-target", "/"]),
    ]
}

pub fn install(
    ctx: &mut InstallContext<'_>,
    selected: &[(&Component, &InstallerPackage)],
) -> Result<()> {
    let temp_dir = ctx.host.temp_dir.clone();
    for (component, pkg) in selected {
        ctx.require_privilege(component.id())?;
        for invocation in invocations(&temp_dir, component.id(), pkg) {
            ctx.execute(component.id(), &invocation)?;
        }
    }
    Ok(())
}
