//! Date window for the trailing-years lookback.
//!
//! The window starts on January 1st of `as_of.year() - years`, not on a
//! rolling day count, so a run in June still covers the whole first year.

use crate::config::ConfigError;
use chrono::{Datelike, NaiveDate};

/// First day of the calendar year `years` before `today`.
///
/// Returns `None` when the resulting year falls outside chrono's range.
pub fn lookback_start(today: NaiveDate, years: u32) -> Option<NaiveDate> {
    let years = i32::try_from(years).ok()?;
    let year = today.year().checked_sub(years)?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// 8-digit `YYYYMMDD` form the data service expects.
pub fn compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Inclusive date range requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Window covering `years` full calendar years before `as_of`, plus the
    /// current year to date.
    pub fn trailing_years(as_of: NaiveDate, years: u32) -> Result<Self, ConfigError> {
        if years == 0 {
            return Err(ConfigError::InvalidYears(years));
        }
        let start = lookback_start(as_of, years).ok_or(ConfigError::InvalidYears(years))?;
        Ok(Self { start, end: as_of })
    }

    /// Window ending on the local calendar date.
    pub fn trailing_years_from_today(years: u32) -> Result<Self, ConfigError> {
        Self::trailing_years(chrono::Local::now().date_naive(), years)
    }

    pub fn start_compact(&self) -> String {
        compact_date(self.start)
    }

    pub fn end_compact(&self) -> String {
        compact_date(self.end)
    }
}
