//! providerkit CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use providerkit::cli::{Cli, CommandDispatcher};
use providerkit::readiness::Probe;
use providerkit::registry::TypeRegistry;
use providerkit::ui::{TerminalUI, UserInterface};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr so listings on stdout stay parseable.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("providerkit=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("providerkit=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("providerkit starting with args: {:?}", cli);

    let mut ui = TerminalUI::new();
    let dispatcher = CommandDispatcher::new(TypeRegistry::with_builtins(), Probe::system());

    match dispatcher.dispatch(&cli, &mut ui) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
