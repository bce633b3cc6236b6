//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over the upstream source (Yahoo Finance in
//! production, an in-memory table in tests) so the collect loop never knows
//! where rows come from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Raw daily OHLCV bar from a data provider, before any reshaping.
///
/// A field the provider left null stays `None` and is written as an empty
/// CSV field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

/// Structured error types for fetch, reshape, and export.
///
/// Every variant is fatal to a collect run. An empty result is not an error.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status} for {symbol}")]
    Http { symbol: String, status: u16 },

    #[error("provider error for {symbol}: {code}: {description}")]
    Provider {
        symbol: String,
        code: String,
        description: String,
    },

    #[error("response format changed: {0}")]
    ResponseFormat(String),

    #[error("frame error: {0}")]
    Frame(#[from] polars::error::PolarsError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl DataError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Result of a fetch for a single symbol. `bars` may be empty.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    pub bars: Vec<RawBar>,
    pub source: DataSource,
}

impl FetchResult {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    Static,
}

/// Trait for data providers.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily OHLCV bars for a symbol over `[start, end)`.
    ///
    /// A symbol with no history in the window yields `Ok` with no bars.
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<FetchResult, DataError>;
}

/// Progress callback for the collect loop.
pub trait CollectProgress {
    /// Called before a symbol is requested.
    fn on_start(&self, symbol: &str, start: NaiveDate, end: NaiveDate);

    /// Called when the provider returned no rows for a symbol.
    fn on_empty(&self, symbol: &str, start: NaiveDate, end: NaiveDate);

    /// Called after a symbol's file has been written.
    fn on_saved(&self, symbol: &str, path: &Path);
}

pub fn collecting_notice(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!("Collecting data for {symbol} from {start} to {end}...")
}

pub fn empty_notice(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!("No data found for {symbol} from {start} to {end}.")
}

pub fn saved_notice(path: &Path) -> String {
    format!("Saved: {}", path.display())
}

/// Progress reporter that prints one line per event to stdout.
pub struct StdoutProgress;

impl CollectProgress for StdoutProgress {
    fn on_start(&self, symbol: &str, start: NaiveDate, end: NaiveDate) {
        println!("{}", collecting_notice(symbol, start, end));
    }

    fn on_empty(&self, symbol: &str, start: NaiveDate, end: NaiveDate) {
        println!("{}", empty_notice(symbol, start, end));
    }

    fn on_saved(&self, _symbol: &str, path: &Path) {
        println!("{}", saved_notice(path));
    }
}

/// Progress reporter that discards everything.
pub struct SilentProgress;

impl CollectProgress for SilentProgress {
    fn on_start(&self, _symbol: &str, _start: NaiveDate, _end: NaiveDate) {}

    fn on_empty(&self, _symbol: &str, _start: NaiveDate, _end: NaiveDate) {}

    fn on_saved(&self, _symbol: &str, _path: &Path) {}
}
