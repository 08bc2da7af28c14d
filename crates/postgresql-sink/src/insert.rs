//! Single-row INSERT into the `busy` table.

use tokio_postgres::Client;
use write_core::Record;

/// Parameterized insert; `id` and `time` are filled in by the server.
pub const INSERT_SQL: &str = "INSERT INTO busy (description, status) VALUES ($1, $2)";

/// Insert one record. Returns the number of rows written.
pub async fn insert_record(client: &Client, record: &Record) -> Result<u64, tokio_postgres::Error> {
    client
        .execute(INSERT_SQL, &[&record.description, &record.status])
        .await
}
