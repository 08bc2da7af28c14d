//! busy-writer library
//!
//! Synthetic write load for PostgreSQL: provision a database and a `busy`
//! table, then insert generated rows at a bounded rate while measuring
//! latency, failed attempts and downtime.
//!
//! # Crates
//!
//! - `write_core` - rate-limited write loop, retry engine, run metrics
//! - `record_generator` - seeded synthetic records
//! - `postgresql_sink` - connection, bootstrap DDL, insert, readback
//!
//! # CLI Usage
//!
//! ```bash
//! # Bootstrap and write, reading ./config.json
//! busy-writer run
//!
//! # Same, with a different config and a higher rate
//! busy-writer --config load.json run --rps 50
//!
//! # Print the five latest rows
//! busy-writer readback --limit 5
//! ```

pub mod config;
pub mod logging;
pub mod run;

pub use config::{ConfigError, DatabaseConfig, LoadConfig};
