//! PostgreSQL side of the busy-writer load generator.
//!
//! - [`PostgreSQLSink`] owns the connection and implements
//!   [`write_core::RecordSink`] with a single-row parameterized insert. A
//!   dropped connection is re-established on the next attempt.
//! - [`bootstrap`] provisions the target database and the `busy` table.
//! - [`readback`] prints the most recently inserted rows.

pub mod bootstrap;
pub mod error;
pub mod insert;
pub mod readback;
pub mod sink;

pub use bootstrap::{BootstrapStatus, BUSY_TABLE};
pub use error::PostgreSQLSinkError;
pub use readback::BusyRow;
pub use sink::PostgreSQLSink;
