//! Diff engine tuning knobs.
//!
//! Every constant here is a heuristic. None of them carries an accuracy
//! guarantee; they only need to be applied consistently to both sides of a
//! comparison.

use serde::{Deserialize, Serialize};

use crate::tokens::DEFAULT_CHARS_PER_TOKEN;

/// Configuration consumed by the diff engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Characters per token used by the token estimator
    pub chars_per_token: usize,

    /// Scaling applied to summed per-change token deltas when an index lacks
    /// per-model token totals
    pub fallback_ratios: FallbackRatios,

    /// Report props whose signature changed while the key set stayed the
    /// same. Off by default: only prop presence is diffed.
    pub track_prop_signatures: bool,
}

/// Approximate per-cost-model multipliers for the token delta fallback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackRatios {
    pub gpt4o_mini: f64,
    pub claude: f64,
}

impl Default for FallbackRatios {
    fn default() -> Self {
        Self {
            gpt4o_mini: 0.6,
            claude: 0.5,
        }
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
            fallback_ratios: FallbackRatios::default(),
            track_prop_signatures: false,
        }
    }
}

impl DiffConfig {
    /// Enable prop signature tracking
    pub fn with_prop_signatures(mut self) -> Self {
        self.track_prop_signatures = true;
        self
    }
}
