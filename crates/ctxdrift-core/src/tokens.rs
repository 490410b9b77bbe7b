//! Token estimation for bundles.
//!
//! A crude proxy for language-model token cost: serialized length divided by
//! a fixed characters-per-token ratio, rounded up. Only meaningful for
//! relative deltas between two estimates made the same way.

use crate::model::Bundle;

/// Default characters-per-token ratio (approximate, no accuracy guarantee)
pub const DEFAULT_CHARS_PER_TOKEN: usize = 4;

/// Estimate tokens for `text` at the given ratio
///
/// A ratio of zero is treated as one.
pub fn estimate_text_tokens(text: &str, chars_per_token: usize) -> u64 {
    text.len().div_ceil(chars_per_token.max(1)) as u64
}

/// Estimate tokens for a bundle at the default ratio
pub fn estimate_bundle_tokens(bundle: &Bundle) -> u64 {
    estimate_bundle_tokens_with(bundle, DEFAULT_CHARS_PER_TOKEN)
}

/// Estimate tokens for a bundle from its compact JSON serialization
///
/// Fields absent from the generator's file are not written back, so the
/// estimate tracks the stored bundle minus whitespace. Bundle maps are
/// ordered, so identical content always serializes to identical bytes.
pub fn estimate_bundle_tokens_with(bundle: &Bundle, chars_per_token: usize) -> u64 {
    let len = serde_json::to_vec(bundle).map(|v| v.len()).unwrap_or(0);
    len.div_ceil(chars_per_token.max(1)) as u64
}
