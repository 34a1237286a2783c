//! Remote install scripts piped into an interpreter.

use super::InstallContext;
use crate::error::Result;
use crate::registry::{Component, PipedScript};
use crate::shell::{quote, Invocation};

/// `<interpreter> -c "$(curl <fetch_args> <url>)" [-- <script_args>]`, run
/// through the platform shell with the descriptor's environment overlaid.
///
/// `fetch_args` and `script_args` are shell fragments and are not quoted.
pub fn invocation(script: &PipedScript) -> Invocation {
    let mut line = format!(
        "{} -c \"$(curl {} {})\"",
        quote(&script.interpreter),
        script.fetch_args,
        quote(&script.url)
    );
    if let Some(args) = &script.script_args {
        line.push_str(" -- ");
        line.push_str(args);
    }

    Invocation::shell(line).envs(script.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}

pub fn install(
    ctx: &mut InstallContext<'_>,
    selected: &[(&Component, &PipedScript)],
) -> Result<()> {
    for (component, script) in selected {
        ctx.execute(component.id(), &invocation(script))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::testing::Fixture;
    use crate::shell::MockResponse;

    fn script(url: &str) -> PipedScript {
        PipedScript {
            url: url.to_string(),
            fetch_args: "-fsSL".to_string(),
            interpreter: "/bin/bash".to_string(),
            env: vec![],
            script_args: None,
        }
    }

    #[test]
    fn builds_piped_command() {
        let inv = invocation(&script(
            "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh",
        ));
        assert_eq!(inv.program(), "/bin/sh");
        assert_eq!(
            inv.arguments()[1],
            "/bin/bash -c \"$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)\""
        );
    }

    #[test]
    fn appends_script_args_and_env() {
        let mut s = script("https://sh.rustup.rs");
        s.fetch_args = "--proto '=https' --tlsv1.2 -sSf".to_string();
        s.script_args = Some("-y".to_string());
        s.env = vec![("NONINTERACTIVE".to_string(), "1".to_string())];

        let inv = invocation(&s);
        assert_eq!(
            inv.command_line(),
            "NONINTERACTIVE=1 /bin/bash -c \"$(curl --proto '=https' --tlsv1.2 -sSf https://sh.rustup.rs)\" -- -y"
        );
        assert_eq!(
            inv.env_overrides().get("NONINTERACTIVE").map(String::as_str),
            Some("1")
        );
    }

    #[test]
    fn url_with_query_is_quoted() {
        let inv = invocation(&script("https://example.com/get?platform=osx&arch=arm64"));
        assert!(inv.arguments()[1]
            .contains("'https://example.com/get?platform=osx&arch=arm64'"));
    }

    #[test]
    fn runs_each_component_in_order_and_stops_on_failure() {
        let a = Component::new("brew");
        let b = Component::new("rust");
        let c = Component::new("poetry");
        let sa = script("https://a.example/install.sh");
        let sb = script("https://b.example/install.sh");
        let sc = script("https://c.example/install.sh");

        let mut fx = Fixture::new();
        fx.runner.respond(
            "/bin/bash -c \"$(curl -fsSL https://b.example",
            MockResponse::exit(1),
        );

        let result = install(
            &mut fx.context(false),
            &[(&a, &sa), (&b, &sb), (&c, &sc)],
        );

        assert!(result.is_err());
        assert_eq!(fx.runner.run_lines().len(), 2);
    }
}
