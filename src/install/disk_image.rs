//! Disk images (`.dmg`) whose application bundles are copied out.

use super::InstallContext;
use crate::error::Result;
use crate::registry::{Component, DiskImage};
use crate::shell::{quote, Invocation};
use std::path::Path;

/// Download, attach, copy `*.app` into the applications directory, unmount.
pub fn invocations(
    temp_dir: &Path,
    applications_dir: &Path,
    id: &str,
    dmg: &DiskImage,
) -> [Invocation; 4] {
    let staged = temp_dir.join(format!("{}.dmg", id)).display().to_string();
    let copy = format!(
        "sudo cp -R {}/*.app {}/",
        quote(&dmg.volume_path),
        quote(&applications_dir.display().to_string())
    );

    [
        Invocation::new("curl").args(["-fsSL", "-o", staged.as_str(), dmg.url.as_str()]),
        Invocation::new("sudo").args(["hdiutil", "attach", staged.as_str()]),
        Invocation::shell(copy),
        Invocation::new("sudo").args(["hdiutil", "unmount", dmg.volume_path.as_str()]),
    ]
}

pub fn install(ctx: &mut InstallContext<'_>, selected: &[(&Component, &DiskImage)]) -> Result<()> {
    let temp_dir = ctx.host.temp_dir.clone();
    let applications_dir = ctx.host.applications_dir.clone();
    for (component, dmg) in selected {
        ctx.require_privilege(component.id())?;
        for invocation in invocations(&temp_dir, &applications_dir, component.id(), dmg) {
            ctx.execute(component.id(), &invocation)?;
        }
    }
    Ok(())
}
