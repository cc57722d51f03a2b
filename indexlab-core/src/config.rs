//! Run configuration — access token and the index universe.
//!
//! The token comes from the environment. The index list defaults to seven
//! mainland benchmarks and can be replaced by a TOML file:
//!
//! ```toml
//! [[index]]
//! name = "沪深300"
//! ts_code = "000300.SH"
//! ```
//!
//! Entries are reported in file order.

use crate::domain::IndexDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Environment variable holding the Tushare Pro token.
pub const TOKEN_ENV: &str = "TS_TOKEN";

/// Startup configuration errors. None of these are recoverable at runtime.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TS_TOKEN not set. export TS_TOKEN=...")]
    MissingToken,

    #[error("invalid index file: {0}")]
    InvalidIndexFile(String),

    #[error("index list is empty")]
    EmptyIndexSet,

    #[error("index '{ts_code}' is listed more than once")]
    DuplicateIndex { ts_code: String },

    #[error("lookback must be between 1 and the calendar range, got {0} years")]
    InvalidYears(u32),
}

/// Resolve the access token through `lookup` (normally `std::env::var`).
///
/// Blank values count as missing; anything else is passed through verbatim.
pub fn resolve_token<F>(lookup: F) -> Result<String, ConfigError>
where
    F: FnOnce(&str) -> Option<String>,
{
    match lookup(TOKEN_ENV) {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(ConfigError::MissingToken),
    }
}

/// Ordered list of indices to report on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSet {
    #[serde(rename = "index")]
    indexes: Vec<IndexDescriptor>,
}

impl IndexSet {
    /// Build a set, rejecting empty lists and repeated codes.
    pub fn new(indexes: Vec<IndexDescriptor>) -> Result<Self, ConfigError> {
        if indexes.is_empty() {
            return Err(ConfigError::EmptyIndexSet);
        }
        let mut seen = HashSet::new();
        for idx in &indexes {
            if !seen.insert(idx.ts_code.as_str()) {
                return Err(ConfigError::DuplicateIndex {
                    ts_code: idx.ts_code.clone(),
                });
            }
        }
        Ok(Self { indexes })
    }

    /// Load an index set from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::InvalidIndexFile(format!("read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parse an index set from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let parsed: IndexSet = toml::from_str(content)
            .map_err(|e| ConfigError::InvalidIndexFile(format!("parse TOML: {e}")))?;
        Self::new(parsed.indexes)
    }

    /// The seven mainland benchmarks: broad market, large/mid/small caps,
    /// ChiNext, and the Shenzhen component.
    pub fn default_cn() -> Self {
        let indexes = [
            ("上证综指", "000001.SH"),
            ("沪深300", "000300.SH"),
            ("中证500", "000905.SH"),
            ("中证1000", "000852.SH"),
            ("创业板指", "399006.SZ"),
            ("上证50", "000016.SH"),
            ("深证成指", "399001.SZ"),
        ]
        .into_iter()
        .map(|(name, code)| IndexDescriptor::new(name, code))
        .collect();

        Self { indexes }
    }

    pub fn as_slice(&self) -> &[IndexDescriptor] {
        &self.indexes
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Serialize the set to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidIndexFile(format!("serialize: {e}")))
    }
}

impl Default for IndexSet {
    fn default() -> Self {
        Self::default_cn()
    }
}
