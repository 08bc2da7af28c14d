//! Idempotent provisioning of the target database and table.
//!
//! Nothing here takes a lock, so two processes bootstrapping the same server
//! at the same moment can race on `CREATE DATABASE`.

use crate::error::PostgreSQLSinkError;
use tokio_postgres::Client;
use tracing::{debug, info};

/// Table every record is written to.
pub const BUSY_TABLE: &str = "busy";

const DATABASE_EXISTS_SQL: &str =
    "SELECT datname FROM pg_catalog.pg_database WHERE lower(datname) = lower($1)";

const TABLE_EXISTS_SQL: &str = "SELECT 1 FROM information_schema.tables \
     WHERE table_schema = current_schema() AND table_name = $1";

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS busy (
    id SERIAL PRIMARY KEY,
    description VARCHAR(255),
    status VARCHAR(50),
    time TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
)";

/// What a bootstrap step found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStatus {
    Created,
    AlreadyExists,
}

/// Create database `name` unless a database with the same name, compared
/// case-insensitively, already exists.
pub async fn ensure_database(
    client: &Client,
    name: &str,
) -> Result<BootstrapStatus, PostgreSQLSinkError> {
    let sql = generate_create_database(name)?;

    let existing = client
        .query(DATABASE_EXISTS_SQL, &[&name])
        .await
        .map_err(|e| schema_error(format!("failed to look up database {name}"), e))?;
    if !existing.is_empty() {
        info!("Database {} already exists", name);
        return Ok(BootstrapStatus::AlreadyExists);
    }

    debug!("DDL: {}", sql);
    client
        .batch_execute(&sql)
        .await
        .map_err(|e| schema_error(format!("failed to create database {name}"), e))?;
    info!("Database {} created successfully", name);
    Ok(BootstrapStatus::Created)
}

/// Create the `busy` table in the connected database if it is missing.
pub async fn ensure_table(client: &Client) -> Result<BootstrapStatus, PostgreSQLSinkError> {
    let existed = !client
        .query(TABLE_EXISTS_SQL, &[&BUSY_TABLE])
        .await
        .map_err(|e| schema_error(format!("failed to look up table {BUSY_TABLE}"), e))?
        .is_empty();

    debug!("DDL: {}", CREATE_TABLE_SQL);
    client
        .batch_execute(CREATE_TABLE_SQL)
        .await
        .map_err(|e| schema_error(format!("failed to create table {BUSY_TABLE}"), e))?;

    if existed {
        info!("Table {} already exists", BUSY_TABLE);
        Ok(BootstrapStatus::AlreadyExists)
    } else {
        info!("Table {} is ready", BUSY_TABLE);
        Ok(BootstrapStatus::Created)
    }
}

/// Build `CREATE DATABASE` for a plain identifier.
///
/// The name is left unquoted so PostgreSQL folds it to lower case, matching
/// the case-insensitive existence check.
pub fn generate_create_database(name: &str) -> Result<String, PostgreSQLSinkError> {
    if !is_plain_identifier(name) {
        return Err(PostgreSQLSinkError::Schema(format!(
            "invalid database name '{name}': expected letters, digits and underscores"
        )));
    }
    Ok(format!("CREATE DATABASE {name}"))
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn schema_error(context: String, e: tokio_postgres::Error) -> PostgreSQLSinkError {
    PostgreSQLSinkError::Schema(format!("{context}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_create_database() {
        assert_eq!(
            generate_create_database("main").unwrap(),
            "CREATE DATABASE main"
        );
        assert_eq!(
            generate_create_database("_Load_Test2").unwrap(),
            "CREATE DATABASE _Load_Test2"
        );
    }

    #[test]
    fn test_rejects_unsafe_database_names() {
        for name in ["", "1main", "main; DROP TABLE busy", "ma-in", "\"main\"", "mäin"] {
            assert!(
                matches!(
                    generate_create_database(name),
                    Err(PostgreSQLSinkError::Schema(_))
                ),
                "accepted {name:?}"
            );
        }
        assert!(generate_create_database(&"a".repeat(64)).is_err());
    }

    #[test]
    fn test_create_table_shape() {
        assert!(CREATE_TABLE_SQL.starts_with("CREATE TABLE IF NOT EXISTS busy"));
        assert!(CREATE_TABLE_SQL.contains("id SERIAL PRIMARY KEY"));
        assert!(CREATE_TABLE_SQL.contains("description VARCHAR(255)"));
        assert!(CREATE_TABLE_SQL.contains("status VARCHAR(50)"));
        assert!(CREATE_TABLE_SQL
            .contains("time TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP"));
    }

    #[test]
    fn test_database_lookup_is_case_insensitive() {
        assert!(DATABASE_EXISTS_SQL.contains("lower(datname) = lower($1)"));
    }
}
