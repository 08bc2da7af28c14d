//! Throughput pacing for the write loop.

use serde::Deserialize;
use std::time::Duration;
use tokio::time::Instant;

/// How the loop keeps itself at or below the target rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacingMode {
    /// Sleep `1 / rps` seconds after every iteration. Insert latency adds to
    /// the interval, so throughput drops below the target under load.
    #[default]
    FixedDelay,
    /// Admit one insert per `1 / rps` seconds measured from the previous
    /// admission. Insert latency is absorbed as long as it stays below the
    /// interval.
    TokenBucket,
}

/// Pacing state for one run.
#[derive(Debug)]
pub enum Pacer {
    FixedDelay {
        delay: Duration,
    },
    /// A bucket holding at most one token, refilled every `interval`.
    TokenBucket {
        interval: Duration,
        next_token: Option<Instant>,
    },
}

impl Pacer {
    /// `rps` must be non-zero; configuration loading rejects zero.
    ///
    /// The interval is kept at nanosecond precision so rates above 1000 rps
    /// still sleep between inserts.
    pub fn new(mode: PacingMode, rps: u32) -> Self {
        let interval = Duration::from_nanos(1_000_000_000 / u64::from(rps.max(1)));
        match mode {
            PacingMode::FixedDelay => Pacer::FixedDelay { delay: interval },
            PacingMode::TokenBucket => Pacer::TokenBucket {
                interval,
                next_token: None,
            },
        }
    }

    /// Nominal spacing between two inserts.
    pub fn interval(&self) -> Duration {
        match self {
            Pacer::FixedDelay { delay } => *delay,
            Pacer::TokenBucket { interval, .. } => *interval,
        }
    }

    /// Wait until the next insert may start.
    pub async fn before_insert(&mut self) {
        if let Pacer::TokenBucket {
            interval,
            next_token,
        } = self
        {
            let now = Instant::now();
            let admitted_at = match *next_token {
                Some(at) if at > now => {
                    tokio::time::sleep_until(at).await;
                    at
                }
                _ => now,
            };
            *next_token = Some(admitted_at + *interval);
        }
    }

    /// Wait after an iteration has finished.
    pub async fn after_iteration(&mut self) {
        if let Pacer::FixedDelay { delay } = self {
            if !delay.is_zero() {
                tokio::time::sleep(*delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_delay_interval() {
        assert_eq!(
            Pacer::new(PacingMode::FixedDelay, 10).interval(),
            Duration::from_millis(100)
        );
        assert_eq!(
            Pacer::new(PacingMode::FixedDelay, 3).interval(),
            Duration::from_nanos(333_333_333)
        );
    }

    #[test]
    fn test_fixed_delay_above_one_thousand_rps_is_not_zero() {
        assert_eq!(
            Pacer::new(PacingMode::FixedDelay, 1500).interval(),
            Duration::from_nanos(666_666)
        );
        assert_eq!(
            Pacer::new(PacingMode::FixedDelay, 5000).interval(),
            Duration::from_micros(200)
        );
    }

    #[test]
    fn test_pacing_mode_from_json() {
        let mode: PacingMode = serde_json::from_str("\"token_bucket\"").unwrap();
        assert_eq!(mode, PacingMode::TokenBucket);
        assert_eq!(PacingMode::default(), PacingMode::FixedDelay);
    }

    #[tokio::test(start_paused = true)]
    async fn test_token_bucket_absorbs_slow_inserts() {
        let mut pacer = Pacer::new(PacingMode::TokenBucket, 10);
        let start = Instant::now();

        pacer.before_insert().await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        // Insert took 60ms: the next token is only 40ms away.
        tokio::time::advance(Duration::from_millis(60)).await;
        pacer.before_insert().await;
        assert_eq!(start.elapsed(), Duration::from_millis(100));

        // Insert took longer than the interval: no wait at all.
        tokio::time::advance(Duration::from_millis(250)).await;
        pacer.before_insert().await;
        assert_eq!(start.elapsed(), Duration::from_millis(350));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_sleeps_after_iteration() {
        let mut pacer = Pacer::new(PacingMode::FixedDelay, 4);
        let start = Instant::now();

        pacer.before_insert().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
        pacer.after_iteration().await;
        assert_eq!(start.elapsed(), Duration::from_millis(250));
    }
}
