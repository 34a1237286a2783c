//! App store (`mas`), batched into one invocation.

use super::{joined_ids, InstallContext};
use crate::error::Result;
use crate::registry::{AppStoreApp, Component};
use crate::shell::Invocation;

/// `mas install <id>...`
pub fn invocation(selected: &[(&Component, &AppStoreApp)]) -> Invocation {
    Invocation::new("mas")
        .arg("install")
        .args(selected.iter().map(|(_, app)| app.app_id.as_str()))
}

pub fn install(
    ctx: &mut InstallContext<'_>,
    selected: &[(&Component, &AppStoreApp)],
) -> Result<()> {
    if selected.is_empty() {
        return Ok(());
    }
    ctx.execute(&joined_ids(selected), &invocation(selected))
}
