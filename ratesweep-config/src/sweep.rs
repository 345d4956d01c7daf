//! Sweep configuration schema and defaults

use crate::error::ConfigResult;
use crate::validation::{
    validate_ordered, validate_port, validate_positive, validate_required_string, Validatable,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Step used between `low_rate` and `high_rate` when `rate_step` is unset
pub const DEFAULT_RATE_STEP: u32 = 10;

/// Everything needed to drive a sweep of httperf runs.
///
/// Keys missing from a configuration file keep their default; keys that
/// are not fields of this struct are ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Address httperf connects to
    #[serde(default = "default_localhost")]
    pub server: String,

    /// Value sent in the `Host` header
    #[serde(default = "default_localhost")]
    pub host: String,

    /// Target port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Rate used when no range is configured (requests per second)
    #[serde(default = "default_rate")]
    pub rate: u32,

    /// First rate of a sweep
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_rate: Option<u32>,

    /// Last rate of a sweep (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_rate: Option<u32>,

    /// Increment between sweep rates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_step: Option<u32>,

    /// Pause between consecutive runs
    #[serde(
        with = "crate::utils::serde_duration_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub wait_time: Option<Duration>,

    /// Total connections per run (`--num-conns`)
    #[serde(default = "default_connections")]
    pub connections: u32,

    /// Socket send buffer size in bytes
    #[serde(default = "default_send_buffer")]
    pub send_buffer: u32,

    /// Socket receive buffer size in bytes
    #[serde(default = "default_recv_buffer")]
    pub recv_buffer: u32,

    /// URIs to test, each gets its own series of runs
    #[serde(default = "default_uri_list")]
    pub uri_list: Vec<String>,

    /// Path to the httperf executable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub httperf: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Calls issued per connection (`--num-call`)
    #[serde(default = "default_num_call")]
    pub num_call: u32,

    /// Pass `--hog` so httperf may use the whole ephemeral port range
    #[serde(default = "crate::utils::default_true")]
    pub hog: bool,
}

/// Basic-auth credentials, present only when both halves are configured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            server: default_localhost(),
            host: default_localhost(),
            port: default_port(),
            rate: default_rate(),
            low_rate: None,
            high_rate: None,
            rate_step: None,
            wait_time: None,
            connections: default_connections(),
            send_buffer: default_send_buffer(),
            recv_buffer: default_recv_buffer(),
            uri_list: default_uri_list(),
            httperf: None,
            username: None,
            password: None,
            num_call: default_num_call(),
            hog: true,
        }
    }
}

impl SweepConfig {
    /// Rates to run, in order.
    ///
    /// A range is used only when both `low_rate` and `high_rate` are set;
    /// otherwise the single `rate` is returned.
    pub fn rates(&self) -> Vec<u32> {
        match (self.low_rate, self.high_rate) {
            (Some(low), Some(high)) => {
                let step = self.rate_step.unwrap_or(DEFAULT_RATE_STEP).max(1);
                (low..=high).step_by(step as usize).collect()
            }
            _ => vec![self.rate],
        }
    }

    pub fn credentials(&self) -> Option<Credentials<'_>> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            _ => None,
        }
    }

    /// Validate the merged configuration
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.validate()
    }

    /// Generate a sample configuration file from the defaults
    pub fn generate_sample() -> String {
        serde_yaml::to_string(&SweepConfig::default())
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}

impl Validatable for SweepConfig {
    fn validate(&self) -> ConfigResult<()> {
        let domain = self.domain_name();

        validate_required_string(&self.server, "server", domain)?;
        validate_required_string(&self.host, "host", domain)?;
        validate_port(self.port, "port", domain)?;
        validate_positive(self.rate, "rate", domain)?;
        validate_positive(self.connections, "connections", domain)?;
        validate_positive(self.num_call, "num_call", domain)?;
        validate_positive(self.send_buffer, "send_buffer", domain)?;
        validate_positive(self.recv_buffer, "recv_buffer", domain)?;

        if let Some(step) = self.rate_step {
            validate_positive(step, "rate_step", domain)?;
        }

        if let (Some(low), Some(high)) = (self.low_rate, self.high_rate) {
            validate_ordered(low, high, "low_rate", "high_rate", domain)?;
        }

        if self.uri_list.is_empty() {
            return Err(self.validation_error("uri_list must contain at least one URI"));
        }
        for uri in &self.uri_list {
            validate_required_string(uri, "uri_list entry", domain)?;
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "sweep"
    }
}

fn default_localhost() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    80
}

fn default_rate() -> u32 {
    50
}

fn default_connections() -> u32 {
    200
}

fn default_send_buffer() -> u32 {
    4096
}

fn default_recv_buffer() -> u32 {
    16384
}

fn default_uri_list() -> Vec<String> {
    vec!["/".to_string()]
}

fn default_num_call() -> u32 {
    10
}
