//! provision CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use provision::cli::{Cli, CommandDispatcher};
use provision::config::HostEnvironment;
use provision::shell::is_ci;
use provision::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN, so normal runs only show the UI
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("provision=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("provision=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("provision starting with args: {:?}", cli);

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let working_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: cannot read working directory: {}", e);
            return ExitCode::from(1);
        }
    };

    let mut ui = create_ui(!is_ci(), output_mode);
    let host = HostEnvironment::from_env();
    let dispatcher = CommandDispatcher::new(working_dir, cli.config.clone(), host);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            tracing::error!(error = %e, "run aborted");
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
