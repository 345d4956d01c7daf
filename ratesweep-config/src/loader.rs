//! Configuration loading and environment variable handling

use crate::discovery::discover_binary;
use crate::error::{ConfigError, ConfigResult};
use crate::sweep::SweepConfig;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Executable searched for on `PATH` when no binary is configured
pub const HTTPERF_BINARY: &str = "httperf";

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "RATESWEEP".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<SweepConfig> {
        let path = path.as_ref();
        debug!("Reading sweep configuration from {:?}", path);

        let content = std::fs::read_to_string(path)?;
        let config = Self::parse_yaml(&content)?;
        self.finish(config)
    }

    /// Load configuration from defaults and environment variables only
    pub fn from_env(&self) -> ConfigResult<SweepConfig> {
        self.finish(SweepConfig::default())
    }

    /// Load from `config_path` when given, otherwise from defaults
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<SweepConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// An empty document means "no overrides"
    fn parse_yaml(content: &str) -> ConfigResult<SweepConfig> {
        if content.trim().is_empty() {
            return Ok(SweepConfig::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    fn finish(&self, mut config: SweepConfig) -> ConfigResult<SweepConfig> {
        self.apply_env_overrides(&mut config)?;

        if config.httperf.is_none() {
            config.httperf = discover_binary(HTTPERF_BINARY);
            debug!("Discovered httperf binary: {:?}", config.httperf);
        }

        config.validate_all()?;
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut SweepConfig) -> ConfigResult<()> {
        if let Ok(server) = self.get_env_var("SERVER") {
            config.server = server;
        }

        if let Ok(host) = self.get_env_var("HOST") {
            config.host = host;
        }

        if let Some(port) = self.parse_env_var("PORT")? {
            config.port = port;
        }

        if let Some(rate) = self.parse_env_var("RATE")? {
            config.rate = rate;
        }

        if let Ok(binary) = self.get_env_var("HTTPERF") {
            config.httperf = Some(PathBuf::from(binary));
        }

        if let Ok(username) = self.get_env_var("USERNAME") {
            config.username = Some(username);
        }

        if let Ok(password) = self.get_env_var("PASSWORD") {
            config.password = Some(password);
        }

        Ok(())
    }

    fn parse_env_var<T>(&self, name: &str) -> ConfigResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get_env_var(name) {
            Ok(raw) => raw.trim().parse().map(Some).map_err(|e| {
                ConfigError::EnvError(format!("Invalid {}_{}: {}", self.prefix, name, e))
            }),
            Err(_) => Ok(None),
        }
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
