//! Bundle matching across baseline and current folders.
//!
//! Two strategies sit behind the [`BundleMatcher`] interface:
//!
//! - [`NameMatcher`]: pair purely by derived component name. Used when a
//!   folder's declared bundle count changed, i.e. something was structurally
//!   added or removed.
//! - [`TieredMatcher`]: pair by exact `bundleHash` first, then fall back to
//!   component name for whatever is left. Used when the declared counts
//!   agree.
//!
//! Neither strategy detects renames: a bundle whose component name changed
//! is reported as one removal plus one addition even if its content is
//! byte-identical.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::Bundle;

/// Outcome of matching one bundle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BundleMatch<'a> {
    /// Same component on both sides; hand to the contract differ
    Paired {
        baseline: &'a Bundle,
        current: &'a Bundle,
    },
    /// Only present in the baseline
    Removed(&'a Bundle),
    /// Only present in the current state
    Added(&'a Bundle),
}

/// Strategy for pairing the bundles of one folder
///
/// Bundles matched by content hash are omitted from the output entirely:
/// they cannot contribute a change. Output order is baseline order for
/// pairs and removals, then current order for additions.
pub trait BundleMatcher {
    /// Short strategy name for logs
    fn name(&self) -> &'static str;

    fn match_bundles<'a>(
        &self,
        baseline: &'a [Bundle],
        current: &'a [Bundle],
    ) -> Vec<BundleMatch<'a>>;
}

/// Bundles keyed by component name; the first bundle with a name wins
fn index_by_name(bundles: &[Bundle]) -> BTreeMap<String, &Bundle> {
    let mut map = BTreeMap::new();
    for bundle in bundles {
        map.entry(bundle.component_name()).or_insert(bundle);
    }
    map
}

/// Name-only matching
#[derive(Debug, Clone, Copy, Default)]
pub struct NameMatcher;

impl BundleMatcher for NameMatcher {
    fn name(&self) -> &'static str {
        "name"
    }

    fn match_bundles<'a>(
        &self,
        baseline: &'a [Bundle],
        current: &'a [Bundle],
    ) -> Vec<BundleMatch<'a>> {
        let baseline_by_name = index_by_name(baseline);
        let current_by_name = index_by_name(current);
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();

        for bundle in baseline {
            let name = bundle.component_name();
            if !seen.insert(name.clone()) {
                continue;
            }
            match current_by_name.get(&name) {
                Some(current) => out.push(BundleMatch::Paired {
                    baseline: bundle,
                    current,
                }),
                None => out.push(BundleMatch::Removed(bundle)),
            }
        }

        for bundle in current {
            let name = bundle.component_name();
            if baseline_by_name.contains_key(&name) || !seen.insert(name) {
                continue;
            }
            out.push(BundleMatch::Added(bundle));
        }

        out
    }
}

/// Content-hash matching with a name fallback
#[derive(Debug, Clone, Copy, Default)]
pub struct TieredMatcher;

impl BundleMatcher for TieredMatcher {
    fn name(&self) -> &'static str {
        "hash_then_name"
    }

    fn match_bundles<'a>(
        &self,
        baseline: &'a [Bundle],
        current: &'a [Bundle],
    ) -> Vec<BundleMatch<'a>> {
        let baseline_keys = identity_keys(baseline);
        let current_keys = identity_keys(current);
        let baseline_by_name = index_by_name(baseline);
        let current_by_name = index_by_name(current);
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();

        // Tier 1 leftovers on the baseline side: stable name means content
        // changed, no name means the component is gone.
        for bundle in baseline {
            let name = bundle.component_name();
            if current_keys.contains(&(bundle.bundle_hash.as_str(), name.clone())) {
                continue;
            }
            if !seen.insert(name.clone()) {
                continue;
            }
            match current_by_name.get(&name) {
                Some(current) => out.push(BundleMatch::Paired {
                    baseline: bundle,
                    current,
                }),
                None => out.push(BundleMatch::Removed(bundle)),
            }
        }

        // Tier 1 leftovers on the current side with no baseline counterpart.
        for bundle in current {
            let name = bundle.component_name();
            if baseline_keys.contains(&(bundle.bundle_hash.as_str(), name.clone())) {
                continue;
            }
            if baseline_by_name.contains_key(&name) || !seen.insert(name) {
                continue;
            }
            out.push(BundleMatch::Added(bundle));
        }

        out
    }
}

/// `(bundle hash, component name)` pairs; a hash alone never pairs bundles
/// across names, so a pure rename stays a remove plus an add
fn identity_keys(bundles: &[Bundle]) -> BTreeSet<(&str, String)> {
    bundles
        .iter()
        .map(|b| (b.bundle_hash.as_str(), b.component_name()))
        .collect()
}

static NAME_MATCHER: NameMatcher = NameMatcher;
static TIERED_MATCHER: TieredMatcher = TieredMatcher;

/// Pick the matching strategy for a folder from its declared bundle counts
pub fn matcher_for_counts(baseline_declared: usize, current_declared: usize) -> &'static dyn BundleMatcher {
    if baseline_declared == current_declared {
        &TIERED_MATCHER
    } else {
        &NAME_MATCHER
    }
}
