//! Driving one httperf run per (URI, rate) pair

use chrono::Utc;
use ratesweep_config::SweepConfig;
use ratesweep_httperf::{Invocation, LoadGenerator, RunResult};
use ratesweep_output::Report;
use std::path::Path;
use tracing::{error, info};

/// Invocations for the whole sweep: every rate for the first URI, then
/// every rate for the next URI, and so on.
pub fn plan(config: &SweepConfig, program: &Path) -> Vec<Invocation> {
    let rates = config.rates();
    config
        .uri_list
        .iter()
        .flat_map(|uri| {
            rates
                .iter()
                .map(move |&rate| Invocation::build(config, program, uri, rate))
        })
        .collect()
}

/// Run every planned invocation in order, appending each result to
/// `report` and handing the report to `on_run` after each one.
///
/// A run that cannot be started still gets a row, with no metrics.
pub async fn run_sweep<G, F>(
    config: &SweepConfig,
    program: &Path,
    generator: &G,
    report: &mut Report,
    mut on_run: F,
) where
    G: LoadGenerator + ?Sized,
    F: FnMut(&Report),
{
    let invocations = plan(config, program);
    info!("Sweep planned with {} runs", invocations.len());

    for (index, invocation) in invocations.iter().enumerate() {
        if index > 0 {
            if let Some(wait) = config.wait_time {
                info!("Waiting {:?} before next run", wait);
                tokio::time::sleep(wait).await;
            }
        }

        let started_at = Utc::now();
        let result = match generator.run(invocation).await {
            Ok(output) => {
                RunResult::from_output(invocation.uri(), invocation.rate(), started_at, output)
            }
            Err(e) => {
                error!(
                    uri = invocation.uri(),
                    rate = invocation.rate(),
                    "httperf run failed: {}",
                    e
                );
                RunResult::failed(invocation.uri(), invocation.rate(), started_at, e.to_string())
            }
        };

        report.push(result);
        on_run(report);
    }
}
