//! nsecsv CLI: collect daily price history into per-symbol CSV files.
//!
//! With no arguments, fetches RELIANCE.NS, TCS.NS and INFY.NS for
//! 2018-01-02 .. 2020-01-31 from Yahoo Finance and writes
//! `data/india_csv/{RELIANCE,TCS,INFY}.csv`.
//!
//! Stdout carries one progress notice per step. Diagnostics go to stderr and
//! are filtered by `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use nsecsv_core::data::{StdoutProgress, YahooProvider};
use nsecsv_core::{collect_symbols, CollectConfig};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "nsecsv",
    version,
    about = "Download daily OHLCV history and save one CSV per symbol"
)]
struct Cli {
    /// Provider symbols (e.g., RELIANCE.NS TCS.NS). Defaults to the built-in list.
    symbols: Vec<String>,

    /// TOML file overriding the built-in parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start date, inclusive (YYYY-MM-DD).
    #[arg(long)]
    start: Option<String>,

    /// End date, exclusive (YYYY-MM-DD).
    #[arg(long)]
    end: Option<String>,

    /// Output directory for CSV files.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Provider suffix stripped from symbols to name the output.
    #[arg(long)]
    suffix: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(cli)?;
    debug!(?config, "resolved config");

    run(&config)
}

/// Fetch, normalize, and export every configured symbol.
fn run(config: &CollectConfig) -> Result<()> {
    let provider = YahooProvider::new()?;
    collect_symbols(&provider, config, &StdoutProgress)?;
    Ok(())
}

fn build_config(cli: Cli) -> Result<CollectConfig> {
    let mut config = match &cli.config {
        Some(path) => CollectConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => CollectConfig::default(),
    };

    if !cli.symbols.is_empty() {
        config.symbols = cli.symbols;
    }
    if let Some(start) = cli.start.as_deref() {
        config.start_date = parse_date(start).context("--start")?;
    }
    if let Some(end) = cli.end.as_deref() {
        config.end_date = parse_date(end).context("--end")?;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(suffix) = cli.suffix {
        config.suffix = suffix;
    }

    config.validate()?;
    Ok(config)
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date '{s}'"))
}
