//! Turning a parsed catalogue into resolved components.

use crate::config::host::HostEnvironment;
use crate::config::interpolation::{resolve_string, InterpolationContext};
use crate::config::schema::{ComponentConfig, DetectConfig, ProbeCommand};
use crate::error::Result;
use crate::registry::component::{
    AppStoreApp, Component, DiskImage, GitCheckout, Installer, InstallerPackage, Package,
    PipedScript, Probe, RawFiles, Runtime, ShellCommand,
};
use std::path::PathBuf;

/// Resolves one component's strings against the host variables.
struct Resolver<'a> {
    ctx: &'a InterpolationContext,
    id: &'a str,
}

impl Resolver<'_> {
    fn string(&self, value: &str) -> Result<String> {
        resolve_string(value, self.ctx, self.id)
    }

    fn strings(&self, values: &[String]) -> Result<Vec<String>> {
        values.iter().map(|v| self.string(v)).collect()
    }

    fn optional(&self, value: Option<&String>) -> Result<Option<String>> {
        value.map(|v| self.string(v)).transpose()
    }
}

/// Build a [`Component`] from its catalogue entry.
///
/// The catalogue must already have passed validation.
pub(crate) fn build_component(
    id: &str,
    config: &ComponentConfig,
    host: &HostEnvironment,
) -> Result<Component> {
    let ctx = InterpolationContext::from_host(host);
    let r = Resolver { ctx: &ctx, id };

    let mut component = Component::new(id);

    if let Some(detect) = &config.detect {
        component = component.with_probe(build_probe(&r, detect)?);
    }

    if let Some(script) = &config.script {
        component = component.with_installer(Installer::Script(PipedScript {
            url: r.string(&script.url)?,
            fetch_args: r.string(&script.fetch_args)?,
            interpreter: r.string(&script.interpreter)?,
            env: script
                .env
                .iter()
                .map(|(k, v)| -> Result<(String, String)> { Ok((k.clone(), r.string(v)?)) })
                .collect::<Result<_>>()?,
            script_args: r.optional(script.script_args.as_ref())?,
        }));
    }

    if let Some(package) = &config.package {
        component = component.with_installer(Installer::Package(Package {
            name: r.string(&package.name)?,
        }));
    }

    if let Some(runtime) = &config.runtime {
        component = component.with_installer(Installer::Runtime(Runtime {
            version: r.string(&runtime.version)?,
        }));
    }

    if let Some(run) = &config.run {
        component = component.with_installer(Installer::Run(ShellCommand {
            command: r.string(&run.command)?,
            requires_privilege: run.requires_privilege,
        }));
    }

    if let Some(pkg) = &config.pkg {
        component = component.with_installer(Installer::Pkg(InstallerPackage {
            url: r.string(&pkg.url)?,
        }));
    }

    if let Some(app_store) = &config.app_store {
        component = component.with_installer(Installer::AppStore(AppStoreApp {
            app_id: app_store.app.trim().to_string(),
        }));
    }

    if let Some(dmg) = &config.dmg {
        component = component.with_installer(Installer::Dmg(DiskImage {
            url: r.string(&dmg.url)?,
            volume_path: r.string(&dmg.volume_path)?,
        }));
    }

    if let Some(files) = &config.files {
        let mut resolved = Vec::with_capacity(files.map.len());
        for (url, dest) in &files.map {
            resolved.push((r.string(url)?, PathBuf::from(r.string(dest)?)));
        }
        component = component.with_installer(Installer::Files(RawFiles {
            files: resolved,
            headers: r.strings(&files.headers)?,
            authenticated: files.authenticated,
        }));
    }

    if let Some(git) = &config.git {
        component = component.with_installer(Installer::Git(GitCheckout {
            repo: r.string(&git.repo)?,
            dest: PathBuf::from(r.string(&git.dest)?),
            clone_args: r.strings(&git.clone_args)?,
        }));
    }

    Ok(component)
}

fn build_probe(r: &Resolver<'_>, detect: &DetectConfig) -> Result<Probe> {
    let interpreter = r.optional(detect.interpreter.as_ref())?;
    Ok(match &detect.command {
        ProbeCommand::Script(script) => Probe::Shell {
            script: r.string(script)?,
            interpreter,
        },
        ProbeCommand::Argv(argv) => Probe::Argv {
            argv: r.strings(argv)?,
            interpreter,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::CatalogueConfig;
    use crate::error::ProvisionError;

    fn host() -> HostEnvironment {
        HostEnvironment::from_lookup(|key| match key {
            "HOME" => Ok("/Users/dev".to_string()),
            "SHELL" => Ok("/bin/zsh".to_string()),
            _ => Err(std::env::VarError::NotPresent),
        })
    }

    fn component(yaml: &str, id: &str) -> Result<Component> {
        let config: CatalogueConfig = serde_yaml::from_str(yaml).unwrap();
        build_component(id, &config.components[id], &host())
    }

    #[test]
    fn interpolates_home_in_destinations() {
        let c = component(
            r#"
components:
  vim-csris:
    detect:
      command: "[ -d ${home}/.vim/pack/vim-csris ] && echo installed"
      shell: true
    git:
      repo: https://github.com/csris/vim-csris.git
      dest: ${home}/.vim/pack/vim-csris
      clone_args: [--recurse-submodules]
"#,
            "vim-csris",
        )
        .unwrap();

        let git = c.descriptor::<GitCheckout>().unwrap();
        assert_eq!(git.dest, PathBuf::from("/Users/dev/.vim/pack/vim-csris"));
        assert_eq!(
            c.probe(),
            Some(&Probe::Shell {
                script: "[ -d /Users/dev/.vim/pack/vim-csris ] && echo installed".to_string(),
                interpreter: None,
            })
        );
    }

    #[test]
    fn interpolates_shell_in_probe_vector() {
        let c = component(
            r#"
components:
  nvm:
    detect:
      command: ["${shell}", --login, -c, nvm --version]
"#,
            "nvm",
        )
        .unwrap();

        let inv = c.probe().unwrap().invocation();
        assert_eq!(inv.program(), "/bin/zsh");
        assert_eq!(inv.arguments(), ["--login", "-c", "nvm --version"]);
    }

    #[test]
    fn file_map_keeps_order() {
        let c = component(
            r#"
components:
  zsh:
    files:
      map:
        https://example.com/.zprofile: ${home}/.zprofile
        https://example.com/.zshrc: ${home}/.zshrc
      authenticated: true
"#,
            "zsh",
        )
        .unwrap();

        let files = c.descriptor::<RawFiles>().unwrap();
        assert!(files.authenticated);
        assert_eq!(files.files[0].1, PathBuf::from("/Users/dev/.zprofile"));
        assert_eq!(files.files[1].1, PathBuf::from("/Users/dev/.zshrc"));
    }

    #[test]
    fn undefined_variable_names_component() {
        let err = component(
            r#"
components:
  git:
    files:
      map:
        https://example.com/.gitconfig: ${xdg_config}/git/config
"#,
            "git",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ProvisionError::UndefinedVariable { ref component, ref name }
                if component == "git" && name == "xdg_config"
        ));
    }

    #[test]
    fn script_env_and_args_resolve() {
        let c = component(
            r#"
components:
  rust:
    script:
      url: https://sh.rustup.rs
      fetch_args: "--proto '=https' --tlsv1.2 -sSf"
      script_args: -y
      env: { CARGO_HOME: "${home}/.cargo" }
"#,
            "rust",
        )
        .unwrap();

        let script = c.descriptor::<PipedScript>().unwrap();
        assert_eq!(script.interpreter, "/bin/bash");
        assert_eq!(script.script_args.as_deref(), Some("-y"));
        assert_eq!(
            script.env,
            vec![("CARGO_HOME".to_string(), "/Users/dev/.cargo".to_string())]
        );
    }
}
