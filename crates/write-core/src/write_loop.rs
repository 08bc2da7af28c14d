//! The rate-limited write loop.

use crate::error::RunError;
use crate::metrics::RunMetrics;
use crate::pacer::{Pacer, PacingMode};
use crate::retry::{insert_with_retry, RetryOutcome, RetryPolicy};
use crate::sink::{RecordSink, RecordSource};
use serde::Deserialize;
use tokio::time::Instant;
use tracing::{error, info, warn};

/// What to do with a record whose retry budget is used up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Stop the whole run.
    #[default]
    Abort,
    /// Drop the record and carry on with the next iteration.
    Skip,
}

/// Knobs for a single run, resolved from configuration.
#[derive(Debug, Clone)]
pub struct WriteSettings {
    pub test_run: u64,
    pub rps: u32,
    pub pacing: PacingMode,
    pub retry: RetryPolicy,
    pub on_exhausted: ExhaustionPolicy,
}

/// Everything the write loop needs, built once at startup.
pub struct WriteContext<S, G> {
    sink: S,
    source: G,
    settings: WriteSettings,
}

impl<S, G> WriteContext<S, G>
where
    S: RecordSink,
    G: RecordSource,
{
    pub fn new(sink: S, source: G, settings: WriteSettings) -> Self {
        Self {
            sink,
            source,
            settings,
        }
    }

    /// Run `test_run` iterations, one record each, strictly in order.
    ///
    /// Returns the run metrics, or the first retry exhaustion when the
    /// policy is [`ExhaustionPolicy::Abort`].
    pub async fn run(&mut self) -> Result<RunMetrics, RunError> {
        let mut pacer = Pacer::new(self.settings.pacing, self.settings.rps);
        let mut metrics = RunMetrics::default();

        info!("================ Start Write Data Simulation");
        info!("Start time: {}", chrono::Local::now());
        info!(
            "Writing {} records at {} rps ({:?} pacing, interval {:?})",
            self.settings.test_run,
            self.settings.rps,
            self.settings.pacing,
            pacer.interval()
        );
        let start = Instant::now();

        for _ in 0..self.settings.test_run {
            let record = self.source.next_record();

            pacer.before_insert().await;
            match insert_with_retry(&self.sink, &record, &self.settings.retry).await {
                RetryOutcome::Succeeded(report) => metrics.record_success(&report),
                RetryOutcome::Exhausted {
                    attempts,
                    last_error,
                } => {
                    metrics.record_exhausted(attempts);
                    match self.settings.on_exhausted {
                        ExhaustionPolicy::Abort => {
                            error!(
                                "Failed to insert data: {}. Error: {:#}",
                                record, last_error
                            );
                            return Err(RunError::RetryExhausted {
                                description: record.description,
                                attempts,
                                last_error,
                            });
                        }
                        ExhaustionPolicy::Skip => {
                            warn!(
                                "Skipping record {} after {} attempt(s). Error: {:#}",
                                record, attempts, last_error
                            );
                            metrics.record_skip();
                        }
                    }
                }
            }
            pacer.after_iteration().await;
        }

        metrics.total_duration = start.elapsed();
        info!("End time: {}", chrono::Local::now());
        info!("Duration: {:?}", metrics.total_duration);
        log_summary(&metrics);

        Ok(metrics)
    }
}

fn log_summary(metrics: &RunMetrics) {
    info!(
        "Inserted {} rows in {:?} ({:.2} rows/sec), skipped {}",
        metrics.rows_inserted,
        metrics.total_duration,
        metrics.rows_per_second(),
        metrics.records_skipped
    );
    info!(
        "Insert latency: min {:?}, mean {:?}, max {:?}",
        metrics.min_latency.unwrap_or_default(),
        metrics.mean_latency(),
        metrics.max_latency
    );
    if metrics.failed_attempts > 0 {
        info!(
            "Failed attempts: {}, recovered records: {}, downtime total {:?} (max {:?})",
            metrics.failed_attempts,
            metrics.recovered_records,
            metrics.total_downtime,
            metrics.max_downtime
        );
    }
}
