//! The unit of work written by the load loop.

use std::fmt;

/// Status label stamped on every inserted row.
pub const STATUS_IDLE: &str = "idle";

/// One generated row, prior to insertion.
///
/// A record has no identity of its own; the store assigns the serial id and
/// the insertion timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub description: String,
    pub status: &'static str,
}

impl Record {
    /// Create an idle record with the given description.
    pub fn idle(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: STATUS_IDLE,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}
