use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One short-code entry.
///
/// The serialized field names and the RFC3339 `created_at` are the snapshot
/// file format and must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub code: String,
    pub url: String,
    #[serde(default)]
    pub clicks: u64,
    pub created_at: DateTime<Utc>,
}

impl Mapping {
    pub fn new(code: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            url: url.into(),
            clicks: 0,
            created_at: Utc::now(),
        }
    }
}
