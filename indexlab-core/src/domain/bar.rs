//! Bars — daily bars from the provider and the yearly bars derived from them.

use chrono::{Datelike, NaiveDate};

/// OHLC bar for a single index on a single trading day.
///
/// Prices are the provider's unadjusted index points.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl DailyBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
        }
    }

    /// Calendar year of the trading date.
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// OHLC summary of every daily bar within one calendar year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyBar {
    pub year: i32,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl YearlyBar {
    /// Seed a yearly bar from the first trading day of the year.
    pub fn open_with(bar: &DailyBar) -> Self {
        Self {
            year: bar.year(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
        }
    }

    /// Fold a later bar of the same year into this summary.
    ///
    /// Bars must arrive in ascending date order: the close always follows the
    /// most recently absorbed bar.
    pub fn absorb(&mut self, bar: &DailyBar) {
        debug_assert_eq!(bar.year(), self.year);
        self.high = self.high.max(bar.high);
        self.low = self.low.min(bar.low);
        self.close = bar.close;
    }
}
