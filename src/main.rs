//! modrename - Gradle module path rename CLI tool
//!
//! Renames the last segment of a module path and rewrites every
//! `project(...)` reference and settings include that points at it.

use clap::Parser;
use modrename::cli::CliArgs;
use modrename::orchestrator::Orchestrator;
use modrename::output::{create_formatter, OutputConfig};
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    // Run the main logic and handle errors
    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; RUST_LOG overrides the level picked from --verbose
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("modrename v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Root: {}", args.root.display());
        if args.dry_run {
            eprintln!("Mode: dry-run");
        }
    }

    let orchestrator = Orchestrator::new(args.clone())?;
    let outcome = orchestrator.run()?;

    let mut stdout = io::stdout().lock();
    let config = OutputConfig::from_cli(&args).with_color(stdout.is_terminal());
    let formatter = create_formatter(config);
    formatter.format(&outcome, &mut stdout)?;
    stdout.flush()?;

    if outcome.has_errors() {
        // Renamed, but some declarations could not be parsed
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
