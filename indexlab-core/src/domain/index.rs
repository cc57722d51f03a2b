//! Index descriptors — display name paired with a provider code.

use serde::{Deserialize, Serialize};

/// A market index as the report knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescriptor {
    /// Human-readable name printed in the table header.
    pub name: String,
    /// Exchange-qualified provider code, e.g. `000300.SH`.
    pub ts_code: String,
}

impl IndexDescriptor {
    pub fn new(name: impl Into<String>, ts_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ts_code: ts_code.into(),
        }
    }
}

impl std::fmt::Display for IndexDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.ts_code)
    }
}
