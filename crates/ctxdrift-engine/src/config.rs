//! Engine configuration loaded from TOML.
//!
//! ```toml
//! snapshot_ttl_ms = 3600000
//! index_file_name = "context_main.json"
//! bundle_file_name = "context.json"
//!
//! [diff]
//! chars_per_token = 4
//! track_prop_signatures = false
//!
//! [diff.fallback_ratios]
//! gpt4o_mini = 0.6
//! claude = 0.5
//! ```

#![allow(clippy::result_large_err)]

use ctxdrift_core::errors::{ExError, ExErrorKind, Result};
use ctxdrift_core::registry::DEFAULT_SNAPSHOT_TTL_MS;
use ctxdrift_core::DiffConfig;
use ctxdrift_store::{ContextDir, DEFAULT_BUNDLE_FILE, DEFAULT_INDEX_FILE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for every engine endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub diff: DiffConfig,
    /// Snapshots older than this are dropped before registry reads
    pub snapshot_ttl_ms: u64,
    pub index_file_name: String,
    pub bundle_file_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            diff: DiffConfig::default(),
            snapshot_ttl_ms: DEFAULT_SNAPSHOT_TTL_MS,
            index_file_name: DEFAULT_INDEX_FILE.to_string(),
            bundle_file_name: DEFAULT_BUNDLE_FILE.to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the text is not valid TOML or a key has the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| {
            ExError::new(ExErrorKind::InvalidInput)
                .with_op("config_load")
                .with_message(format!("invalid engine config: {e}"))
        })
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("config_load")
                .with_path(path.display().to_string())
                .with_message(e.to_string())
        })?;
        Self::from_toml_str(&text).map_err(|e| e.with_path(path.display().to_string()))
    }

    pub fn snapshot_ttl(&self) -> Duration {
        Duration::from_millis(self.snapshot_ttl_ms)
    }

    /// Open a context directory with the configured file names
    pub fn context_dir(&self, root: impl Into<PathBuf>) -> ContextDir {
        ContextDir::new(root).with_file_names(&self.index_file_name, &self.bundle_file_name)
    }
}
