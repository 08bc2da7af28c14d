//! Read the latest rows back for manual inspection.

use crate::error::PostgreSQLSinkError;
use chrono::{DateTime, Utc};
use std::fmt;
use tokio_postgres::{Client, Row};

const LATEST_ROWS_SQL: &str =
    "SELECT id, description, status, time FROM busy ORDER BY id DESC LIMIT $1";

/// One persisted row of the `busy` table.
#[derive(Debug, Clone, PartialEq)]
pub struct BusyRow {
    pub id: i32,
    pub description: Option<String>,
    pub status: Option<String>,
    pub time: Option<DateTime<Utc>>,
}

impl BusyRow {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            description: row.try_get("description")?,
            status: row.try_get("status")?,
            time: row.try_get("time")?,
        })
    }
}

impl fmt::Display for BusyRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Description: {}, Status: {}, Time: {}",
            self.id,
            self.description.as_deref().unwrap_or(""),
            self.status.as_deref().unwrap_or(""),
            self.time.map(|t| t.to_rfc3339()).unwrap_or_default()
        )
    }
}

/// Up to `limit` rows, highest id first.
pub async fn latest_rows(client: &Client, limit: i64) -> Result<Vec<BusyRow>, PostgreSQLSinkError> {
    let rows = client.query(LATEST_ROWS_SQL, &[&limit]).await?;
    rows.iter()
        .map(|row| BusyRow::from_row(row).map_err(PostgreSQLSinkError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display() {
        let row = BusyRow {
            id: 7,
            description: Some("alice.smith42@example.com".to_string()),
            status: Some("idle".to_string()),
            time: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
        };
        assert_eq!(
            row.to_string(),
            "ID: 7, Description: alice.smith42@example.com, Status: idle, Time: 2024-01-02T03:04:05+00:00"
        );
    }

    #[test]
    fn test_display_nulls() {
        let row = BusyRow {
            id: 1,
            description: None,
            status: None,
            time: None,
        };
        assert_eq!(row.to_string(), "ID: 1, Description: , Status: , Time: ");
    }
}
