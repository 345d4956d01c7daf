//! Tracing setup. Logs go to stderr so stdout carries only the report.

use anyhow::{anyhow, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Initialize tracing from `--log-level`, then `RUST_LOG`, then `warn`
pub fn init_tracing(log_level: Option<&str>) -> Result<()> {
    let env_filter = match log_level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| {
            eprintln!("Invalid log level '{}', falling back to 'warn'", level);
            EnvFilter::new("warn")
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize tracing: {}", e))?;

    debug!("Tracing initialized");
    Ok(())
}
