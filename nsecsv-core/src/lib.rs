//! nsecsv core: fetch daily OHLCV history and export one CSV per symbol.
//!
//! - `config`: request parameters with built-in defaults and TOML overrides
//! - `data`: provider trait, Yahoo chart provider, polars reshaping, CSV export
//! - `collect`: the sequential per-symbol loop tying them together

pub mod collect;
pub mod config;
pub mod data;

pub use collect::{collect_symbols, CollectError, CollectSummary, SymbolOutcome};
pub use config::{CollectConfig, ConfigError};
