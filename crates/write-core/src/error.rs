//! Error types for the write loop.

use thiserror::Error;

/// Errors that terminate a run.
#[derive(Error, Debug)]
pub enum RunError {
    /// A record used up its whole retry budget under the abort policy.
    #[error("Failed to insert data: {description} after {attempts} attempt(s). Error: {last_error:#}")]
    RetryExhausted {
        description: String,
        attempts: u32,
        last_error: anyhow::Error,
    },
}
