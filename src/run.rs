//! Command runners wiring config, sink, generator and write loop together.

use anyhow::Context;
use postgresql_sink::{BusyRow, PostgreSQLSink};
use record_generator::RecordGenerator;
use write_core::{RunMetrics, WriteContext};

use crate::config::LoadConfig;
use crate::logging::mask_connection_password;

/// Connect to the server named by the config's DSN.
pub async fn connect(config: &LoadConfig) -> anyhow::Result<PostgreSQLSink> {
    PostgreSQLSink::connect(&config.database.dsn)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to {}",
                mask_connection_password(&config.database.dsn)
            )
        })
}

/// Ensure the configured database and the `busy` table exist.
pub async fn bootstrap(sink: &PostgreSQLSink, config: &LoadConfig) -> anyhow::Result<()> {
    sink.ensure_database(&config.database.name)
        .await
        .with_context(|| format!("Failed to ensure database '{}'", config.database.name))?;
    sink.ensure_table()
        .await
        .context("Failed to ensure table 'busy'")?;
    Ok(())
}

pub fn build_generator(config: &LoadConfig) -> RecordGenerator {
    let generator = match config.seed {
        Some(seed) => RecordGenerator::new(seed),
        None => RecordGenerator::from_random_seed(),
    };
    match &config.pattern {
        Some(pattern) => generator.with_pattern(pattern.clone()),
        None => generator,
    }
}

/// Full run: connect, bootstrap, then write `test_run` records.
pub async fn run_load(config: &LoadConfig) -> anyhow::Result<RunMetrics> {
    let sink = connect(config).await?;
    bootstrap(&sink, config).await?;

    let generator = build_generator(config);
    tracing::info!(
        "Generating records with pattern '{}' (seed={})",
        generator.pattern(),
        generator.seed()
    );

    let mut ctx = WriteContext::new(sink, generator, config.write_settings());
    let metrics = ctx.run().await?;
    Ok(metrics)
}

/// Schema only: connect and bootstrap.
pub async fn run_bootstrap(config: &LoadConfig) -> anyhow::Result<()> {
    let sink = connect(config).await?;
    bootstrap(&sink, config).await
}

/// Print the `limit` most recent rows to stdout.
pub async fn run_readback(config: &LoadConfig, limit: i64) -> anyhow::Result<Vec<BusyRow>> {
    let sink = connect(config).await?;
    let rows = sink
        .latest_rows(limit)
        .await
        .context("Failed to read rows from table 'busy'")?;
    for row in &rows {
        println!("{row}");
    }
    Ok(rows)
}
