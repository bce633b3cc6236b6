//! Property tests for the normalized frame.
//!
//! Uses proptest to verify:
//! 1. Column order is fixed no matter how the raw columns are arranged
//! 2. Row count and symbol column follow the input exactly

use chrono::NaiveDate;
use nsecsv_core::data::{normalize, raw_frame, RawBar, CANONICAL_COLUMNS};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (10.0..5000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_bar() -> impl Strategy<Value = RawBar> {
    (0i64..3000, arb_price(), arb_price(), 0u64..50_000_000).prop_map(|(day, a, b, volume)| {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        RawBar {
            date: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap() + chrono::Duration::days(day),
            open: Some(low),
            high: Some(high),
            low: Some(low),
            close: Some(high),
            volume: Some(volume),
        }
    })
}

fn arb_raw_order() -> impl Strategy<Value = Vec<&'static str>> {
    Just(vec!["Date", "Open", "High", "Low", "Close", "Volume"]).prop_shuffle()
}

fn arb_base_symbol() -> impl Strategy<Value = String> {
    "[A-Z][A-Z&]{0,9}"
}

// ── 1. Column order ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn canonical_order_survives_any_raw_order(
        bars in prop::collection::vec(arb_bar(), 1..40),
        order in arb_raw_order(),
    ) {
        let raw = raw_frame(&bars).unwrap().select(order).unwrap();
        let df = normalize(raw, "RELIANCE").unwrap();

        let names: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();
        prop_assert_eq!(names, CANONICAL_COLUMNS.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    }
}

// ── 2. Rows and symbol ───────────────────────────────────────────────

proptest! {
    #[test]
    fn one_row_per_bar_all_stamped(
        bars in prop::collection::vec(arb_bar(), 1..60),
        symbol in arb_base_symbol(),
    ) {
        let df = normalize(raw_frame(&bars).unwrap(), &symbol).unwrap();

        prop_assert_eq!(df.height(), bars.len());
        let symbols = df.column("symbol").unwrap().str().unwrap();
        for s in symbols.into_iter() {
            prop_assert_eq!(s, Some(symbol.as_str()));
        }

        let volumes = df.column("volume").unwrap().u64().unwrap();
        for (i, bar) in bars.iter().enumerate() {
            prop_assert_eq!(volumes.get(i), bar.volume);
        }
    }
}
