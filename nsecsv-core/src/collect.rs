//! Collect loop: fetch, normalize, and export each configured symbol in order.
//!
//! Symbols are processed one at a time. A symbol with no rows is reported and
//! skipped without touching its output file. Any other failure stops the run
//! at that symbol; later symbols are never requested.

use crate::config::{CollectConfig, ConfigError};
use crate::data::export::write_csv;
use crate::data::frame::{normalize, raw_frame};
use crate::data::provider::{CollectProgress, DataError, DataProvider};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("{symbol}: {source}")]
    Symbol {
        symbol: String,
        #[source]
        source: DataError,
    },

    #[error(transparent)]
    Data(#[from] DataError),
}

/// What happened to one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolOutcome {
    Saved { path: PathBuf, rows: usize },
    Empty,
}

/// Per-symbol outcomes of a completed run, in processing order.
#[derive(Debug, Default)]
pub struct CollectSummary {
    pub outcomes: Vec<(String, SymbolOutcome)>,
}

impl CollectSummary {
    pub fn saved(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, SymbolOutcome::Saved { .. }))
            .count()
    }

    pub fn empty(&self) -> usize {
        self.outcomes.len() - self.saved()
    }
}

/// Run the pipeline for every symbol in `config`.
pub fn collect_symbols(
    provider: &dyn DataProvider,
    config: &CollectConfig,
    progress: &dyn CollectProgress,
) -> Result<CollectSummary, CollectError> {
    config.validate()?;

    fs::create_dir_all(&config.output_dir)
        .map_err(|e| DataError::io(&config.output_dir, e))?;

    let mut summary = CollectSummary::default();

    for symbol in &config.symbols {
        let outcome = collect_single(provider, config, progress, symbol)?;
        summary.outcomes.push((symbol.clone(), outcome));
    }

    info!(
        provider = provider.name(),
        saved = summary.saved(),
        empty = summary.empty(),
        "collect finished"
    );
    Ok(summary)
}

/// Collect a single symbol: fetch -> normalize -> write.
fn collect_single(
    provider: &dyn DataProvider,
    config: &CollectConfig,
    progress: &dyn CollectProgress,
    symbol: &str,
) -> Result<SymbolOutcome, CollectError> {
    let (start, end) = (config.start_date, config.end_date);
    progress.on_start(symbol, start, end);

    let wrap = |source: DataError| CollectError::Symbol {
        symbol: symbol.to_string(),
        source,
    };

    let fetched = provider.fetch(symbol, start, end).map_err(wrap)?;
    if fetched.is_empty() {
        info!(symbol, %start, %end, "provider returned no rows");
        progress.on_empty(symbol, start, end);
        return Ok(SymbolOutcome::Empty);
    }

    let base = config.output_symbol(symbol)?;
    let path = config.output_path(symbol)?;
    let rows = fetched.bars.len();

    let mut frame = raw_frame(&fetched.bars)
        .and_then(|raw| normalize(raw, base))
        .map_err(wrap)?;
    write_csv(&mut frame, &path).map_err(wrap)?;

    info!(
        symbol,
        rows,
        source = ?fetched.source,
        path = %path.display(),
        "saved"
    );
    progress.on_saved(symbol, &path);
    Ok(SymbolOutcome::Saved { path, rows })
}
