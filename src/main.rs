//! Command-line interface for busy-writer
//!
//! # Usage Examples
//!
//! ```bash
//! # Bootstrap the schema and write `test_run` rows (default command)
//! busy-writer --config config.json
//!
//! # Override the run size and rate for one invocation
//! busy-writer run --test-run 100 --rps 20
//!
//! # Only create the database and table
//! busy-writer bootstrap
//!
//! # Show the latest three rows
//! busy-writer readback --limit 3
//!
//! # Validate the config file without touching the database
//! busy-writer show-config
//! ```
//!
//! Exit status is 0 when every record was written and 1 on any fatal error:
//! bad config, unreachable database, failed bootstrap, or a record that ran
//! out of retries.

use anyhow::Context;
use busy_writer::config::LoadConfig;
use busy_writer::logging::init_tracing;
use busy_writer::run::{run_bootstrap, run_load, run_readback};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "busy-writer")]
#[command(about = "Rate-limited synthetic write load for PostgreSQL")]
#[command(long_about = None)]
struct Cli {
    /// Path to the JSON config file
    #[arg(
        long,
        short = 'c',
        global = true,
        env = "BUSY_WRITER_CONFIG",
        default_value = "config.json"
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bootstrap the schema, then run the write loop (default)
    Run {
        #[command(flatten)]
        overrides: RunOverrides,
    },

    /// Create the target database and the busy table if missing
    Bootstrap,

    /// Print the most recently inserted rows
    Readback {
        /// Number of rows to print
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(i64).range(1..))]
        limit: i64,
    },

    /// Load and validate the config file, then print it
    ShowConfig,
}

/// Per-invocation overrides of config file values.
#[derive(Args, Clone, Debug, Default)]
struct RunOverrides {
    /// Number of records to write
    #[arg(long)]
    test_run: Option<u64>,

    /// Target inserts per second
    #[arg(long)]
    rps: Option<u32>,
}

impl RunOverrides {
    fn apply(&self, config: &mut LoadConfig) -> anyhow::Result<()> {
        if let Some(test_run) = self.test_run {
            config.test_run = test_run;
        }
        if let Some(rps) = self.rps {
            config.rps = rps;
        }
        config.validate()?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let mut config = LoadConfig::from_file(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;

    match cli.command.unwrap_or(Commands::Run {
        overrides: RunOverrides::default(),
    }) {
        Commands::Run { overrides } => {
            overrides.apply(&mut config)?;
            config.log();
            run_load(&config).await?;
        }
        Commands::Bootstrap => {
            config.log();
            run_bootstrap(&config).await?;
        }
        Commands::Readback { limit } => {
            run_readback(&config, limit).await?;
        }
        Commands::ShowConfig => {
            println!("{:#?}", config.redacted());
        }
    }

    Ok(())
}
