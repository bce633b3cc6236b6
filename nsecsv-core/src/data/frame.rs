//! Table reshaping: provider rows into the canonical seven-column frame.
//!
//! The raw frame keeps the provider's naming (`Date`, `Open`, ... `Volume`)
//! with `Date` acting as the row index. `normalize` renames, stamps the
//! symbol, and projects onto [`CANONICAL_COLUMNS`] in that order.

use super::provider::{DataError, RawBar};
use chrono::NaiveDate;
use polars::prelude::*;

/// Output columns, in output order.
pub const CANONICAL_COLUMNS: [&str; 7] =
    ["symbol", "date", "open", "high", "low", "close", "volume"];

/// Provider column name -> canonical column name.
pub const PRICE_RENAMES: [(&str, &str); 5] = [
    ("Open", "open"),
    ("High", "high"),
    ("Low", "low"),
    ("Close", "close"),
    ("Volume", "volume"),
];

/// Name of the provider's date index column.
pub const DATE_INDEX: &str = "Date";

/// Build the raw provider table from fetched bars.
pub fn raw_frame(bars: &[RawBar]) -> Result<DataFrame, DataError> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    let days: Vec<i32> = bars
        .iter()
        .map(|b| (b.date - epoch).num_days() as i32)
        .collect();

    let df = df!(
        DATE_INDEX => days,
        "Open" => bars.iter().map(|b| b.open).collect::<Vec<_>>(),
        "High" => bars.iter().map(|b| b.high).collect::<Vec<_>>(),
        "Low" => bars.iter().map(|b| b.low).collect::<Vec<_>>(),
        "Close" => bars.iter().map(|b| b.close).collect::<Vec<_>>(),
        "Volume" => bars.iter().map(|b| b.volume).collect::<Vec<_>>(),
    )?
    .lazy()
    .with_column(col(DATE_INDEX).cast(DataType::Date))
    .collect()?;

    Ok(df)
}

/// Reshape a raw provider table into the canonical schema.
///
/// The raw table may carry its columns in any order and may carry extra
/// columns; only the canonical seven survive.
pub fn normalize(raw: DataFrame, symbol: &str) -> Result<DataFrame, DataError> {
    let mut projection = vec![col("symbol"), col(DATE_INDEX).alias("date")];
    projection.extend(PRICE_RENAMES.iter().map(|(from, to)| col(*from).alias(*to)));

    let df = raw
        .lazy()
        .with_column(lit(symbol).alias("symbol"))
        .select(projection)
        .collect()?;

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> RawBar {
        RawBar {
            date: NaiveDate::from_ymd_opt(2018, 1, day).unwrap(),
            open: Some(close - 1.0),
            high: Some(close + 2.0),
            low: Some(close - 3.0),
            close: Some(close),
            volume: Some(1000 * day as u64),
        }
    }

    fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    #[test]
    fn raw_frame_uses_provider_names() {
        let df = raw_frame(&[bar(2, 100.0), bar(3, 101.0)]).unwrap();
        assert_eq!(
            column_names(&df),
            vec!["Date", "Open", "High", "Low", "Close", "Volume"]
        );
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("Date").unwrap().dtype(), &DataType::Date);
    }

    #[test]
    fn normalize_projects_canonical_order() {
        let raw = raw_frame(&[bar(2, 100.0), bar(3, 101.0), bar(4, 102.0)]).unwrap();
        let df = normalize(raw, "TCS").unwrap();

        assert_eq!(column_names(&df), CANONICAL_COLUMNS.to_vec());
        assert_eq!(df.height(), 3);

        let symbols = df.column("symbol").unwrap().str().unwrap();
        assert!(symbols.into_iter().all(|s| s == Some("TCS")));

        let closes = df.column("close").unwrap().f64().unwrap();
        assert_eq!(closes.get(2), Some(102.0));
    }

    #[test]
    fn normalize_ignores_raw_column_order_and_extras() {
        let raw = raw_frame(&[bar(2, 100.0)]).unwrap();
        let shuffled = raw
            .select(["Volume", "Close", "Date", "Low", "Open", "High"])
            .unwrap()
            .lazy()
            .with_column(lit(99.0).alias("Adj Close"))
            .collect()
            .unwrap();

        let df = normalize(shuffled, "INFY").unwrap();
        assert_eq!(column_names(&df), CANONICAL_COLUMNS.to_vec());
        assert_eq!(df.column("volume").unwrap().u64().unwrap().get(0), Some(2000));
    }

    #[test]
    fn missing_values_become_nulls() {
        let gap = RawBar {
            open: None,
            volume: None,
            ..bar(2, 100.0)
        };
        let df = normalize(raw_frame(&[gap, bar(3, 101.0)]).unwrap(), "TCS").unwrap();

        assert_eq!(df.column("open").unwrap().null_count(), 1);
        assert_eq!(df.column("volume").unwrap().null_count(), 1);
        assert_eq!(df.column("close").unwrap().null_count(), 0);
        assert_eq!(df.column("volume").unwrap().u64().unwrap().get(1), Some(3000));
    }

    #[test]
    fn normalize_missing_price_column_fails() {
        let raw = raw_frame(&[bar(2, 100.0)]).unwrap().drop("Volume").unwrap();
        assert!(normalize(raw, "TCS").is_err());
    }
}
