use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use ratesweep_config::{ConfigError, ConfigLoader, SweepConfig};
use ratesweep_httperf::{resolve_binary, HttperfError, HttperfRunner};
use ratesweep_output::Report;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info};

mod cli;
mod logging;
mod sweep;

use cli::Cli;

/// Exit status when httperf cannot be used
const EXIT_MISSING_BINARY: u8 = 1;
/// Exit status when the configuration cannot be loaded
const EXIT_BAD_CONFIG: u8 = 2;

/// Load configuration from file or use defaults
fn load_config(config_path: Option<&Path>) -> Result<SweepConfig> {
    let loader = ConfigLoader::new();

    match config_path {
        Some(path) => {
            info!("Loading configuration from: {:?}", path);
            loader
                .from_file(path)
                .with_context(|| format!("Failed to load configuration from {:?}", path))
        }
        None => {
            debug!("No configuration file specified. Using defaults and environment.");
            loader
                .from_env()
                .context("Failed to load configuration from environment")
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let program = resolve_binary(config.httperf.as_deref())?;

    let runner = HttperfRunner::new();
    let mut report = Report::new();
    sweep::run_sweep(&config, &program, &runner, &mut report, Report::print_latest).await;

    info!("Sweep finished with {} runs", report.len());
    Ok(())
}

/// Print `err` and pick the exit status for it
fn report_failure(err: &anyhow::Error) -> ExitCode {
    eprintln!("{} {:#}", "error:".bright_red().bold(), err);

    if err.downcast_ref::<ConfigError>().is_some() {
        eprintln!();
        eprintln!("{}", Cli::command().render_usage());
        eprintln!("For more information, try '--help'.");
        return ExitCode::from(EXIT_BAD_CONFIG);
    }

    if let Some(e) = err.downcast_ref::<HttperfError>() {
        if e.is_missing_binary() {
            return ExitCode::from(EXIT_MISSING_BINARY);
        }
    }

    ExitCode::FAILURE
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.log_level.as_deref()) {
        eprintln!("{:#}", e);
    }

    if cli.sample_config {
        print!("{}", SweepConfig::generate_sample());
        return ExitCode::SUCCESS;
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_failure(&e),
    }
}
