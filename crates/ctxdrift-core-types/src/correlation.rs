//! Request correlation
//!
//! Each engine endpoint call gets a fresh [`RequestId`]. It is recorded on the
//! call's tracing span and on any error the call returns.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for one engine call (UUIDv7, so ids sort by creation time)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

/// Adopt an id supplied by the caller
impl From<String> for RequestId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
