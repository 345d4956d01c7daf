//! Extracting metrics from httperf's textual report
//!
//! Every line is tried against an ordered list of rules; the first rule
//! whose pattern matches fills in its fields and the line is done. Lines
//! no rule recognises are ignored here and only survive in the raw output.

use crate::result::HttperfMetrics;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::trace;

/// Placeholder expanded to a decimal number capture in rule patterns
const NUM: &str = r"([-+]?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?)";

type Setter = fn(&Captures<'_>, &mut HttperfMetrics);

struct Rule {
    name: &'static str,
    pattern: Regex,
    apply: Setter,
}

impl Rule {
    fn new(name: &'static str, template: &str, apply: Setter) -> Self {
        let pattern = Regex::new(&template.replace("{n}", NUM))
            .unwrap_or_else(|e| panic!("invalid pattern for rule {}: {}", name, e));
        Self {
            name,
            pattern,
            apply,
        }
    }
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(
            "total",
            r"^Total: connections {n} requests {n} replies {n} test-duration {n} s",
            |c, m| {
                m.total_connections = count(c, 1);
                m.total_requests = count(c, 2);
                m.total_replies = count(c, 3);
                m.test_duration_secs = number(c, 4);
            },
        ),
        Rule::new("connection_rate", r"^Connection rate: {n} conn/s", |c, m| {
            m.connection_rate = number(c, 1);
        }),
        Rule::new(
            "connection_time",
            r"^Connection time \[ms\]: min {n} avg {n} max {n} median {n} stddev {n}",
            |c, m| {
                m.connection_time_min = number(c, 1);
                m.connection_time_avg = number(c, 2);
                m.connection_time_max = number(c, 3);
                m.connection_time_median = number(c, 4);
                m.connection_time_stddev = number(c, 5);
            },
        ),
        Rule::new("request_rate", r"^Request rate: {n} req/s", |c, m| {
            m.request_rate = number(c, 1);
        }),
        Rule::new(
            "reply_rate",
            r"^Reply rate \[replies/s\]: min {n} avg {n} max {n} stddev {n}",
            |c, m| {
                m.reply_rate_min = number(c, 1);
                m.reply_rate_avg = number(c, 2);
                m.reply_rate_max = number(c, 3);
                m.reply_rate_stddev = number(c, 4);
            },
        ),
        Rule::new(
            "reply_time",
            r"^Reply time \[ms\]: response {n} transfer {n}",
            |c, m| {
                m.reply_time_response = number(c, 1);
                m.reply_time_transfer = number(c, 2);
            },
        ),
        Rule::new(
            "reply_status",
            r"^Reply status: 1xx={n} 2xx={n} 3xx={n} 4xx={n} 5xx={n}",
            |c, m| {
                m.status_1xx = count(c, 1);
                m.status_2xx = count(c, 2);
                m.status_3xx = count(c, 3);
                m.status_4xx = count(c, 4);
                m.status_5xx = count(c, 5);
            },
        ),
        Rule::new(
            "cpu_time",
            r"^CPU time \[s\]: .*\(user {n}% system {n}% total {n}%\)",
            |c, m| {
                m.cpu_user_pct = number(c, 1);
                m.cpu_system_pct = number(c, 2);
                m.cpu_total_pct = number(c, 3);
            },
        ),
        Rule::new("net_io", r"^Net I/O: {n} KB/s", |c, m| {
            m.net_io_kbps = number(c, 1);
        }),
        Rule::new(
            "errors",
            r"^Errors: total {n}(?: client-timo {n} socket-timo {n} connrefused {n} connreset {n})?",
            |c, m| {
                m.errors_total = count(c, 1);
                m.client_timeouts = count(c, 2);
                m.socket_timeouts = count(c, 3);
                m.conn_refused = count(c, 4);
                m.conn_reset = count(c, 5);
            },
        ),
    ]
});

fn number(captures: &Captures<'_>, index: usize) -> Option<f64> {
    captures.get(index)?.as_str().parse().ok()
}

fn count(captures: &Captures<'_>, index: usize) -> Option<u64> {
    let value = number(captures, index)?;
    (value >= 0.0).then(|| value as u64)
}

/// Apply the first matching rule to `metrics`. Returns whether any rule
/// recognised the line.
pub fn parse_line(line: &str, metrics: &mut HttperfMetrics) -> bool {
    let line = line.trim();
    for rule in RULES.iter() {
        if let Some(captures) = rule.pattern.captures(line) {
            trace!(rule = rule.name, "matched httperf output line");
            (rule.apply)(&captures, metrics);
            return true;
        }
    }
    false
}

pub fn parse_output<'a, I>(lines: I) -> HttperfMetrics
where
    I: IntoIterator<Item = &'a str>,
{
    let mut metrics = HttperfMetrics::default();
    for line in lines {
        parse_line(line, &mut metrics);
    }
    metrics
}
