//! Configuration management for ratesweep
//!
//! A sweep is described by a single flat [`SweepConfig`]. Values come from
//! built-in defaults, an optional YAML file and `RATESWEEP_*` environment
//! variables, in that order of precedence (last wins).

pub mod discovery;
pub mod error;
pub mod loader;
pub mod sweep;
pub mod utils;
pub mod validation;

pub use discovery::discover_binary;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use sweep::{Credentials, SweepConfig, DEFAULT_RATE_STEP};

pub use utils::serde_duration_option;
