//! The accumulating sweep report

use crate::table::TableFormatter;
use chrono::{DateTime, Utc};
use colored::*;
use ratesweep_httperf::RunResult;

const HEADERS: [&str; 12] = [
    "uri",
    "rate",
    "conn/s",
    "req/s",
    "reply min",
    "reply avg",
    "reply max",
    "reply stddev",
    "resp ms",
    "net KB/s",
    "errors",
    "5xx",
];

/// Every run of the sweep so far, in the order they finished
#[derive(Debug, Clone)]
pub struct Report {
    started_at: DateTime<Utc>,
    rows: Vec<RunResult>,
    formatter: TableFormatter,
}

impl Report {
    pub fn new() -> Self {
        Self::with_formatter(TableFormatter::new())
    }

    pub fn with_formatter(formatter: TableFormatter) -> Self {
        Self {
            started_at: Utc::now(),
            rows: Vec::new(),
            formatter,
        }
    }

    pub fn push(&mut self, result: RunResult) {
        self.rows.push(result);
    }

    pub fn rows(&self) -> &[RunResult] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&RunResult> {
        self.rows.last()
    }

    /// Full table of all runs so far
    pub fn render(&self) -> String {
        let rows: Vec<Vec<String>> = self.rows.iter().map(row_cells).collect();
        format!(
            "Sweep started {} ({} run{})\n{}",
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.rows.len(),
            if self.rows.len() == 1 { "" } else { "s" },
            self.formatter.render(&HEADERS, &rows)
        )
    }

    /// Raw httperf output of `result`, framed so it stands out from the table
    pub fn render_raw_output(&self, result: &RunResult) -> String {
        let banner = format!(
            "httperf output for {} at {} req/s ({} errors, {} 5xx)",
            result.uri,
            result.rate,
            result.metrics.errors_total.unwrap_or(0),
            result.metrics.status_5xx.unwrap_or(0),
        );
        format!("{}\n{}\n", banner.bright_yellow().bold(), result.raw_output)
    }

    pub fn print(&self) {
        println!("{}", self.render());
    }

    /// Print the table, followed by the raw output of the newest run when
    /// it recorded errors or 5xx replies
    pub fn print_latest(&self) {
        self.print();
        if let Some(latest) = self.last().filter(|r| r.needs_attention()) {
            println!("{}", self.render_raw_output(latest));
        }
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

fn row_cells(result: &RunResult) -> Vec<String> {
    let m = &result.metrics;
    vec![
        result.uri.clone(),
        result.rate.to_string(),
        float(m.connection_rate),
        float(m.request_rate),
        float(m.reply_rate_min),
        float(m.reply_rate_avg),
        float(m.reply_rate_max),
        float(m.reply_rate_stddev),
        float(m.reply_time_response),
        float(m.net_io_kbps),
        int(m.errors_total),
        int(m.status_5xx),
    ]
}

fn float(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}", v))
}

fn int(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
