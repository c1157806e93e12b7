//! phantom-grid binary entry point.
//!
//! Handles CLI parsing, configuration loading and debug-log initialization,
//! then hands off to the orchestrator.
//!
//! # I/O Architecture
//!
//! - **Audit logging** goes to the append-only forensics file, never the
//!   terminal
//! - **Debug logging** (tracing) goes to stderr and is silent by default so
//!   it cannot garble the dashboard
//! - **The dashboard** owns the terminal for the life of the process

use anyhow::{Context, Result};
use clap::Parser;
use phantom_grid::{cli::Cli, config::Config, orchestrator};
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;

    let config = match cli.config.as_deref() {
        Some(path) => Config::load(path).context("failed to load configuration")?,
        None => Config::default(),
    };
    let config = cli.apply(config);

    debug!("resolved configuration: {:?}", config);

    orchestrator::run(&cli, config)
}

/// Initialize the tracing subscriber for debug logging.
///
/// # Verbosity Levels
/// - 0 (default): Only warnings and errors
/// - 1 (-v): Info level
/// - 2 (-vv): Debug level
/// - 3+ (-vvv): Trace level
fn init_tracing(verbose: u8) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .context("failed to initialize tracing subscriber")?;

    Ok(())
}
