//! CLI argument parsing definitions

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Print the default configuration as YAML and exit
    #[arg(long)]
    pub sample_config: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_config_flag() {
        let cli = Cli::try_parse_from(["ratesweep", "-c", "sweep.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("sweep.yaml")));
        assert!(!cli.sample_config);
    }

    #[test]
    fn test_short_version_flag() {
        let err = Cli::try_parse_from(["ratesweep", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
