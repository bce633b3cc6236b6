//! Provider access, table reshaping, and CSV export

pub mod export;
pub mod frame;
pub mod provider;
pub mod yahoo;

pub use export::write_csv;
pub use frame::{normalize, raw_frame, CANONICAL_COLUMNS};
pub use provider::{
    collecting_notice, empty_notice, saved_notice, CollectProgress, DataError, DataProvider,
    DataSource, FetchResult, RawBar, SilentProgress, StdoutProgress,
};
pub use yahoo::YahooProvider;
