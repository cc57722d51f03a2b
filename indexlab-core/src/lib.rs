//! IndexLab Core — domain types, data provider, yearly reduction, report rendering.
//!
//! This crate contains everything between the token and the terminal:
//! - Domain types (daily bars, yearly bars, index descriptors)
//! - Date window computation for the trailing-years lookback
//! - The `DataProvider` trait and the Tushare Pro client
//! - Calendar-year OHLC reduction
//! - Per-index report orchestration and table rendering

pub mod aggregate;
pub mod config;
pub mod data;
pub mod domain;
pub mod report;
pub mod window;

pub use aggregate::{yearly_ohlc, MAX_YEARS};
pub use config::{resolve_token, ConfigError, IndexSet, TOKEN_ENV};
pub use data::{DataError, DataProvider, TushareProvider};
pub use domain::{DailyBar, IndexDescriptor, YearlyBar};
pub use report::{render_table, run_report, ReportSummary};
pub use window::{compact_date, lookback_start, DateWindow};
