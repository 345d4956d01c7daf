//! Parsed outcome of a single httperf run

use crate::parser::parse_output;
use crate::runner::RunOutput;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Figures extracted from httperf's report. A field stays `None` when its
/// line never appeared in the output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttperfMetrics {
    pub total_connections: Option<u64>,
    pub total_requests: Option<u64>,
    pub total_replies: Option<u64>,
    pub test_duration_secs: Option<f64>,

    pub connection_rate: Option<f64>,
    pub connection_time_min: Option<f64>,
    pub connection_time_avg: Option<f64>,
    pub connection_time_max: Option<f64>,
    pub connection_time_median: Option<f64>,
    pub connection_time_stddev: Option<f64>,

    pub request_rate: Option<f64>,

    pub reply_rate_min: Option<f64>,
    pub reply_rate_avg: Option<f64>,
    pub reply_rate_max: Option<f64>,
    pub reply_rate_stddev: Option<f64>,
    pub reply_time_response: Option<f64>,
    pub reply_time_transfer: Option<f64>,

    pub status_1xx: Option<u64>,
    pub status_2xx: Option<u64>,
    pub status_3xx: Option<u64>,
    pub status_4xx: Option<u64>,
    pub status_5xx: Option<u64>,

    pub cpu_user_pct: Option<f64>,
    pub cpu_system_pct: Option<f64>,
    pub cpu_total_pct: Option<f64>,

    /// Throughput in KB/s
    pub net_io_kbps: Option<f64>,

    pub errors_total: Option<u64>,
    pub client_timeouts: Option<u64>,
    pub socket_timeouts: Option<u64>,
    pub conn_refused: Option<u64>,
    pub conn_reset: Option<u64>,
}

impl HttperfMetrics {
    /// Any client-side error or server 5xx was observed
    pub fn has_failures(&self) -> bool {
        self.errors_total.unwrap_or(0) > 0 || self.status_5xx.unwrap_or(0) > 0
    }
}

/// One row of the report
#[derive(Debug, Clone)]
pub struct RunResult {
    pub uri: String,
    pub rate: u32,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    /// `None` when the process was killed by a signal or never started
    pub exit_code: Option<i32>,
    pub metrics: HttperfMetrics,
    /// Merged stdout/stderr, one line per entry, in arrival order
    pub raw_output: String,
}

impl RunResult {
    pub fn from_output(uri: &str, rate: u32, started_at: DateTime<Utc>, output: RunOutput) -> Self {
        let metrics = parse_output(output.lines.iter().map(String::as_str));
        Self {
            uri: uri.to_string(),
            rate,
            started_at,
            elapsed: output.elapsed,
            exit_code: output.exit_code,
            metrics,
            raw_output: output.lines.join("\n"),
        }
    }

    /// A row for a run that produced no output at all
    pub fn failed(uri: &str, rate: u32, started_at: DateTime<Utc>, reason: impl Into<String>) -> Self {
        Self {
            uri: uri.to_string(),
            rate,
            started_at,
            elapsed: Duration::ZERO,
            exit_code: None,
            metrics: HttperfMetrics::default(),
            raw_output: reason.into(),
        }
    }

    /// Whether the raw output should be shown alongside the table
    pub fn needs_attention(&self) -> bool {
        self.metrics.has_failures()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(lines: &[&str]) -> RunOutput {
        RunOutput {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            exit_code: Some(0),
            elapsed: Duration::from_secs(4),
        }
    }

    #[test]
    fn test_from_output_parses_and_keeps_raw_text() {
        let result = RunResult::from_output(
            "/",
            100,
            Utc::now(),
            output(&["httperf --client=0/1", "Request rate: 123.4 req/s (8.1 ms/req)"]),
        );

        assert_eq!(result.metrics.request_rate, Some(123.4));
        assert_eq!(
            result.raw_output,
            "httperf --client=0/1\nRequest rate: 123.4 req/s (8.1 ms/req)"
        );
        assert!(!result.needs_attention());
    }

    #[test]
    fn test_errors_need_attention() {
        let result = RunResult::from_output("/", 10, Utc::now(), output(&["Errors: total 3"]));
        assert_eq!(result.metrics.errors_total, Some(3));
        assert!(result.needs_attention());
    }

    #[test]
    fn test_server_errors_need_attention() {
        let result = RunResult::from_output(
            "/",
            10,
            Utc::now(),
            output(&["Reply status: 1xx=0 2xx=90 3xx=0 4xx=0 5xx=10"]),
        );
        assert!(result.needs_attention());
    }

    #[test]
    fn test_failed_row_has_no_metrics() {
        let result = RunResult::failed("/", 10, Utc::now(), "spawn failed");
        assert_eq!(result.metrics, HttperfMetrics::default());
        assert_eq!(result.raw_output, "spawn failed");
        assert!(!result.needs_attention());
    }
}
