//! Runtime versions through `nvm` in the operator's login shell.
//!
//! `nvm` is a shell function, so it only exists inside a login shell that
//! sourced the operator's profile.

use super::InstallContext;
use crate::error::Result;
use crate::registry::{Component, Runtime};
use crate::shell::Invocation;

/// `<shell> --login -c "nvm install <v>"` then `... "nvm use <v>"`.
pub fn invocations(login_shell: &str, runtime: &Runtime) -> [Invocation; 2] {
    let step = |verb: &str| {
        Invocation::new(login_shell)
            .arg("--login")
            .arg("-c")
            .arg(format!("nvm {} {}", verb, runtime.version))
    };
    [step("install"), step("use")]
}

pub fn install(ctx: &mut InstallContext<'_>, selected: &[(&Component, &Runtime)]) -> Result<()> {
    let shell = ctx.host.shell.clone();
    for (component, runtime) in selected {
        for invocation in invocations(&shell, runtime) {
            ctx.execute(component.id(), &invocation)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::testing::Fixture;
    use crate::shell::MockResponse;

    #[test]
    fn installs_then_activates_in_login_shell() {
        let node = Component::new("node");
        let runtime = Runtime {
            version: "18.15.0".to_string(),
        };
        let mut fx = Fixture::new();
        install(&mut fx.context(false), &[(&node, &runtime)]).unwrap();

        assert_eq!(
            fx.runner.run_lines(),
            vec![
                "/bin/zsh --login -c 'nvm install 18.15.0'",
                "/bin/zsh --login -c 'nvm use 18.15.0'",
            ]
        );
    }

    #[test]
    fn failed_install_skips_activation() {
        let node = Component::new("node");
        let runtime = Runtime {
            version: "18".to_string(),
        };
        let mut fx = Fixture::new();
        fx.runner
            .respond("/bin/zsh --login -c 'nvm install", MockResponse::exit(3));

        assert!(install(&mut fx.context(false), &[(&node, &runtime)]).is_err());
        assert_eq!(fx.runner.run_lines().len(), 1);
    }
}
