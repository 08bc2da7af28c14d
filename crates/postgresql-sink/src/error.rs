//! Error types for the PostgreSQL sink.

use thiserror::Error;

/// Errors that can occur while talking to PostgreSQL.
#[derive(Error, Debug)]
pub enum PostgreSQLSinkError {
    /// PostgreSQL query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// Could not reach or ping the server.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Database or table provisioning failed.
    #[error("Schema error: {0}")]
    Schema(String),
}
