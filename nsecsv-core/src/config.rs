//! Collect configuration.
//!
//! Every field has a built-in default, so a run with no config file fetches
//! the NSE large-caps for 2018-01-02 .. 2020-01-31 into `data/india_csv/`.
//! A TOML file may override any subset of fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_START: NaiveDate = ymd(2018, 1, 2);
pub const DEFAULT_END: NaiveDate = ymd(2020, 1, 31);
pub const DEFAULT_SYMBOLS: [&str; 3] = ["RELIANCE.NS", "TCS.NS", "INFY.NS"];
pub const DEFAULT_SUFFIX: &str = ".NS";
pub const DEFAULT_OUTPUT_DIR: &str = "data/india_csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no symbols configured")]
    NoSymbols,

    #[error("start date {start} must be before end date {end}")]
    EmptyRange { start: NaiveDate, end: NaiveDate },

    #[error("symbol '{symbol}' does not carry the '{suffix}' suffix")]
    MissingSuffix { symbol: String, suffix: String },
}

/// Parameters for one collect run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectConfig {
    /// First date requested (inclusive).
    pub start_date: NaiveDate,

    /// Last date requested (exclusive).
    pub end_date: NaiveDate,

    /// Provider symbols, processed in this order.
    pub symbols: Vec<String>,

    /// Provider suffix removed to form the output symbol.
    pub suffix: String,

    /// Directory receiving `<SYMBOL>.csv` files.
    pub output_dir: PathBuf,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            start_date: DEFAULT_START,
            end_date: DEFAULT_END,
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            suffix: DEFAULT_SUFFIX.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

// Evaluated at compile time, so a bad constant fails the build.
const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid default date"),
    }
}

impl CollectConfig {
    /// Load a config from a TOML file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string. Missing fields take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Check the range and that every symbol carries the suffix.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::NoSymbols);
        }
        if self.start_date >= self.end_date {
            return Err(ConfigError::EmptyRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        for symbol in &self.symbols {
            self.output_symbol(symbol)?;
        }
        Ok(())
    }

    /// Base ticker written to the `symbol` column: `RELIANCE.NS` -> `RELIANCE`.
    pub fn output_symbol<'a>(&self, symbol: &'a str) -> Result<&'a str, ConfigError> {
        symbol
            .strip_suffix(self.suffix.as_str())
            .filter(|base| !base.is_empty())
            .ok_or_else(|| ConfigError::MissingSuffix {
                symbol: symbol.to_string(),
                suffix: self.suffix.clone(),
            })
    }

    /// Target file for a provider symbol: `<output_dir>/<base>.csv`.
    pub fn output_path(&self, symbol: &str) -> Result<PathBuf, ConfigError> {
        let base = self.output_symbol(symbol)?;
        Ok(self.output_dir.join(format!("{base}.csv")))
    }
}
