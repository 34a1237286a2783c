//! Package manager (`brew`), batched into one invocation.

use super::{joined_ids, InstallContext};
use crate::error::Result;
use crate::registry::{Component, Package};
use crate::shell::Invocation;

/// `brew install <name>...`
pub fn invocation(selected: &[(&Component, &Package)]) -> Invocation {
    Invocation::new("brew")
        .arg("install")
        .args(selected.iter().map(|(_, p)| p.name.as_str()))
}

pub fn install(ctx: &mut InstallContext<'_>, selected: &[(&Component, &Package)]) -> Result<()> {
    if selected.is_empty() {
        return Ok(());
    }
    ctx.execute(&joined_ids(selected), &invocation(selected))
}
