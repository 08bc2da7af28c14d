//! Bounded fixed-interval retry around a single insert.
//!
//! A record moves through `Attempting -> Succeeded` or
//! `Attempting -> Exhausted`. Every attempt re-sends the same record; a fresh
//! one is never generated mid-sequence.

use crate::record::Record;
use crate::sink::RecordSink;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// How many times an insert may be attempted and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Always at least 1.
    pub max_attempts: u32,
    /// Fixed sleep between two consecutive attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

/// Details about a record that was eventually written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertReport {
    /// Attempt number that succeeded (1 = first try).
    pub attempts: u32,
    /// Round-trip time of the successful attempt.
    pub latency: Duration,
    /// Time from the first failed attempt to the success, if any attempt failed.
    pub downtime: Option<Duration>,
}

impl InsertReport {
    pub fn failed_attempts(&self) -> u32 {
        self.attempts - 1
    }
}

/// Result of driving one record through the retry engine.
#[derive(Debug)]
pub enum RetryOutcome {
    Succeeded(InsertReport),
    Exhausted {
        attempts: u32,
        last_error: anyhow::Error,
    },
}

/// Insert `record`, retrying up to `policy.max_attempts` times in total.
///
/// The downtime window starts at the first failure and ends when an attempt
/// succeeds. Sleeps happen only between attempts, never after the last one.
pub async fn insert_with_retry<S>(sink: &S, record: &Record, policy: &RetryPolicy) -> RetryOutcome
where
    S: RecordSink + ?Sized,
{
    let mut attempt: u32 = 1;
    let mut first_failure: Option<Instant> = None;

    loop {
        let started = Instant::now();
        match sink.insert(record).await {
            Ok(()) => {
                let latency = started.elapsed();
                let downtime = first_failure.map(|at| at.elapsed());
                if let Some(downtime) = downtime {
                    info!("DownTime: {}ms", downtime.as_millis());
                }
                info!("Insert: {} success", record);
                debug!("Insert latency: {:?} (attempt {})", latency, attempt);
                return RetryOutcome::Succeeded(InsertReport {
                    attempts: attempt,
                    latency,
                    downtime,
                });
            }
            Err(e) => {
                if attempt == 1 {
                    first_failure = Some(Instant::now());
                }
                if attempt >= policy.max_attempts {
                    return RetryOutcome::Exhausted {
                        attempts: attempt,
                        last_error: e,
                    };
                }

                warn!(
                    "Failed to insert: {}. Error: {:#}. Retrying ({}/{})...",
                    record, e, attempt, policy.max_attempts
                );
                attempt += 1;
                tokio::time::sleep(policy.delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Fails the first `failures` calls, then succeeds.
    struct FlakySink {
        failures: u32,
        calls: Mutex<Vec<(Instant, String)>>,
    }

    impl FlakySink {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(Instant, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecordSink for FlakySink {
        async fn insert(&self, record: &Record) -> anyhow::Result<()> {
            let mut calls = self.calls.lock().unwrap();
            calls.push((Instant::now(), record.description.clone()));
            if calls.len() as u32 <= self.failures {
                anyhow::bail!("connection refused");
            }
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_attempt_success_has_no_downtime() {
        let sink = FlakySink::new(0);
        let policy = RetryPolicy::new(3, Duration::from_secs(1));

        let outcome = insert_with_retry(&sink, &Record::idle("a@example.com"), &policy).await;

        match outcome {
            RetryOutcome::Succeeded(report) => {
                assert_eq!(report.attempts, 1);
                assert_eq!(report.downtime, None);
                assert_eq!(report.failed_attempts(), 0);
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(sink.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovery_measures_downtime_from_first_failure() {
        let sink = FlakySink::new(2);
        let policy = RetryPolicy::new(5, Duration::from_secs(1));

        let outcome = insert_with_retry(&sink, &Record::idle("b@example.com"), &policy).await;

        let RetryOutcome::Succeeded(report) = outcome else {
            panic!("expected success");
        };
        assert_eq!(report.attempts, 3);
        // Two failures means two retry sleeps between first failure and success.
        assert_eq!(report.downtime, Some(Duration::from_secs(2)));

        let calls = sink.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|(_, d)| d == "b@example.com"));
        assert_eq!(calls[1].0 - calls[0].0, Duration::from_secs(1));
        assert_eq!(calls[2].0 - calls[1].0, Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_stops_at_max_attempts() {
        let sink = FlakySink::new(u32::MAX);
        let policy = RetryPolicy::new(4, Duration::from_secs(2));
        let start = Instant::now();

        let outcome = insert_with_retry(&sink, &Record::idle("c@example.com"), &policy).await;

        match outcome {
            RetryOutcome::Exhausted {
                attempts,
                last_error,
            } => {
                assert_eq!(attempts, 4);
                assert!(last_error.to_string().contains("connection refused"));
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
        assert_eq!(sink.calls().len(), 4);
        // Three sleeps between four attempts, none after the last.
        assert_eq!(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_attempt_budget_fails_immediately() {
        let sink = FlakySink::new(1);
        let policy = RetryPolicy::new(1, Duration::from_secs(10));
        let start = Instant::now();

        let outcome = insert_with_retry(&sink, &Record::idle("d@example.com"), &policy).await;

        assert!(matches!(outcome, RetryOutcome::Exhausted { attempts: 1, .. }));
        assert_eq!(sink.calls().len(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_policy_clamps_zero_attempts() {
        let policy = RetryPolicy::new(0, Duration::from_secs(1));
        assert_eq!(policy.max_attempts, 1);
    }
}
