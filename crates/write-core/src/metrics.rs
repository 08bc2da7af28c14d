//! Aggregated measurements for one run of the write loop.

use crate::retry::InsertReport;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    /// Records persisted.
    pub rows_inserted: u64,
    /// Records dropped after exhausting their retry budget (skip policy only).
    pub records_skipped: u64,
    /// Insert attempts that returned an error, across all records.
    pub failed_attempts: u64,
    /// Records that failed at least once and then succeeded.
    pub recovered_records: u64,
    /// Sum of all downtime windows.
    pub total_downtime: Duration,
    /// Longest single downtime window.
    pub max_downtime: Duration,
    /// Sum of successful insert round-trips.
    pub total_latency: Duration,
    pub min_latency: Option<Duration>,
    pub max_latency: Duration,
    /// Wall time of the whole loop, pacing included.
    pub total_duration: Duration,
}

impl RunMetrics {
    pub fn record_success(&mut self, report: &InsertReport) {
        self.rows_inserted += 1;
        self.failed_attempts += u64::from(report.failed_attempts());

        self.total_latency += report.latency;
        self.max_latency = self.max_latency.max(report.latency);
        self.min_latency = Some(match self.min_latency {
            Some(min) => min.min(report.latency),
            None => report.latency,
        });

        if let Some(downtime) = report.downtime {
            self.recovered_records += 1;
            self.total_downtime += downtime;
            self.max_downtime = self.max_downtime.max(downtime);
        }
    }

    pub fn record_exhausted(&mut self, attempts: u32) {
        self.failed_attempts += u64::from(attempts);
    }

    pub fn record_skip(&mut self) {
        self.records_skipped += 1;
    }

    /// Mean latency of successful inserts.
    pub fn mean_latency(&self) -> Duration {
        match u32::try_from(self.rows_inserted) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.total_latency / n,
            Err(_) => Duration::from_secs_f64(
                self.total_latency.as_secs_f64() / self.rows_inserted as f64,
            ),
        }
    }

    /// Achieved throughput over the whole loop.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}
