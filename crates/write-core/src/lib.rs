//! Core write loop for the busy-writer load generator.
//!
//! This crate owns everything that decides *when* and *how often* a row is
//! written, independent of the database behind it.
//!
//! # Architecture
//!
//! ```text
//! RecordSource ──► WriteContext::run
//!                      │  for i in 0..test_run
//!                      │     Pacer::before_insert
//!                      ▼
//!              insert_with_retry ──► RecordSink::insert (1..=max_attempts)
//!                      │
//!                      ▼
//!               RetryOutcome { Succeeded | Exhausted }
//!                      │
//!                      ▼
//!          ExhaustionPolicy { Abort | Skip }, Pacer::after_iteration
//! ```
//!
//! The sink and the record source are traits so the loop can be driven by a
//! real PostgreSQL connection in production and by an in-memory fake in tests.

pub mod error;
pub mod metrics;
pub mod pacer;
pub mod record;
pub mod retry;
pub mod sink;
pub mod write_loop;

pub use error::RunError;
pub use metrics::RunMetrics;
pub use pacer::{Pacer, PacingMode};
pub use record::{Record, STATUS_IDLE};
pub use retry::{insert_with_retry, InsertReport, RetryOutcome, RetryPolicy};
pub use sink::{RecordSink, RecordSource};
pub use write_loop::{ExhaustionPolicy, WriteContext, WriteSettings};
