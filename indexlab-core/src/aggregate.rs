//! Calendar-year OHLC reduction.
//!
//! Daily bars are grouped by `date.year()`. Each group's open is the open of
//! its chronologically first bar, its close the close of the last bar, and
//! high/low are the extrema over the whole group.

use crate::domain::{DailyBar, YearlyBar};
use std::collections::BTreeMap;

/// Default number of most recent years kept in a report.
pub const MAX_YEARS: usize = 10;

/// Reduce daily bars to one bar per calendar year, ascending by year.
///
/// Input order does not matter: bars are sorted by date (stable) before
/// grouping. At most `max_years` rows are returned; when more distinct years
/// are present the oldest ones are dropped. Empty input yields empty output.
pub fn yearly_ohlc(daily: &[DailyBar], max_years: usize) -> Vec<YearlyBar> {
    if daily.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&DailyBar> = daily.iter().collect();
    sorted.sort_by_key(|bar| bar.date);

    let mut by_year: BTreeMap<i32, YearlyBar> = BTreeMap::new();
    for bar in sorted {
        by_year
            .entry(bar.year())
            .and_modify(|yearly| yearly.absorb(bar))
            .or_insert_with(|| YearlyBar::open_with(bar));
    }

    let skip = by_year.len().saturating_sub(max_years);
    by_year.into_values().skip(skip).collect()
}
