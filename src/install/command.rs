//! Arbitrary shell commands.

use super::InstallContext;
use crate::error::Result;
use crate::registry::{Component, ShellCommand};
use crate::shell::Invocation;

pub fn install(
    ctx: &mut InstallContext<'_>,
    selected: &[(&Component, &ShellCommand)],
) -> Result<()> {
    for (component, command) in selected {
        if command.requires_privilege {
            ctx.require_privilege(component.id())?;
        }
        ctx.execute(component.id(), &Invocation::shell(command.command.as_str()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProvisionError;
    use crate::install::testing::Fixture;

    fn command(cmd: &str, requires_privilege: bool) -> ShellCommand {
        ShellCommand {
            command: cmd.to_string(),
            requires_privilege,
        }
    }

    #[test]
    fn runs_through_platform_shell() {
        let vim = Component::new("vim");
        let cmd = command("mkdir -p ~/.vim/pack", false);
        let mut fx = Fixture::new().without_privilege();

        install(&mut fx.context(false), &[(&vim, &cmd)]).unwrap();

        let calls = fx.runner.calls();
        assert_eq!(calls[0].invocation.program(), "/bin/sh");
        assert_eq!(fx.runner.run_lines(), vec!["mkdir -p ~/.vim/pack"]);
    }

    #[test]
    fn privileged_command_aborts_before_running() {
        let vim = Component::new("vim");
        let rosetta = Component::new("rosetta");
        let plain = command("mkdir -p ~/.vim/pack", false);
        let privileged = command("sudo softwareupdate --install-rosetta", true);
        let mut fx = Fixture::new().without_privilege();

        let err = install(
            &mut fx.context(false),
            &[(&vim, &plain), (&rosetta, &privileged)],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ProvisionError::PrivilegeRequired { ref component } if component == "rosetta"
        ));
        assert_eq!(fx.runner.run_lines(), vec!["mkdir -p ~/.vim/pack"]);
    }

    #[test]
    fn privileged_command_runs_with_sudo_cached() {
        let rosetta = Component::new("rosetta");
        let privileged = command("sudo softwareupdate --install-rosetta", true);
        let mut fx = Fixture::new();

        install(&mut fx.context(false), &[(&rosetta, &privileged)]).unwrap();
        assert_eq!(fx.runner.run_lines().len(), 1);
    }
}
