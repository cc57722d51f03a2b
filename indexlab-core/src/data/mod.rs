//! Data retrieval — provider trait and the Tushare Pro client

pub mod provider;
pub mod tushare;

pub use provider::{DataError, DataProvider};
pub use tushare::{TushareProvider, DEFAULT_API_URL};
