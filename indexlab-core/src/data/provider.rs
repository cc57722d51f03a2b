//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over the data service so the report loop
//! can be driven by an in-memory provider in tests.

use crate::domain::DailyBar;
use crate::window::DateWindow;
use thiserror::Error;

/// Why a single index could not be fetched.
///
/// The report loop treats every variant the same way (print, log, move on);
/// the tags exist so the message says what actually went wrong.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    Network(String),

    #[error("provider rejected request (code {code}): {msg}")]
    Api { code: i64, msg: String },

    #[error("response format changed: {0}")]
    Malformed(String),
}

/// Trait for daily index data sources.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily bars for `ts_code` within `window`, ascending by date.
    ///
    /// An index with no rows in the window yields `Ok(vec![])`, not an error.
    fn fetch_daily(&self, ts_code: &str, window: &DateWindow) -> Result<Vec<DailyBar>, DataError>;
}
