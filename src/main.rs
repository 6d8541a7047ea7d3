//! Muster CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use muster::cli::Cli;
use muster::config::{config_path, load_config, validate, ResolvedConfig};
use muster::engine::Reconciler;
use muster::report::{print_summary, summarize};
use muster::shell::ShellRunner;
use muster::ui::{Output, OutputMode};
use muster::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("muster=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("muster=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Muster starting with args: {:?}", cli);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let output = Output::new(mode);

    match run(&cli, &output) {
        Ok(code) => code,
        Err(e) => {
            output.error(&format!("Error: {}", e));
            if e.is_config_error() {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}

fn run(cli: &Cli, output: &Output) -> Result<ExitCode> {
    let path = config_path(cli.config.as_deref());
    let config = load_config(&path)?;
    validate(&config)?;
    let resolved = ResolvedConfig::from_config(&config)?;

    if cli.lint {
        output.result("Configuration is valid!");
        return Ok(ExitCode::SUCCESS);
    }

    output.banner(&format!("{} Workstation Setup", resolved.version));

    let runner = ShellRunner::new();
    let outcome = Reconciler::new(&resolved, &runner, output).run();

    let summary = summarize(&outcome);
    print_summary(&summary, output);

    Ok(ExitCode::from(summary.exit_code()))
}
