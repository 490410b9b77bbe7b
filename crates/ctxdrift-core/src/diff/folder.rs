//! Per-folder reconciliation.

use crate::config::DiffConfig;
use crate::diff::contract::diff_contracts;
use crate::diff::matcher::{matcher_for_counts, BundleMatch};
use crate::diff::model::{ChangeType, ComponentChange, FolderDiff, FolderStatus};
use crate::diff::source::BundleSource;
use crate::errors::Result;
use crate::model::{Bundle, FolderMetadata};
use crate::tokens::estimate_bundle_tokens_with;

pub(crate) fn bundle_added(bundle: &Bundle, config: &DiffConfig) -> ComponentChange {
    ComponentChange {
        root_component: bundle.component_name(),
        change_type: ChangeType::BundleAdded,
        semantic_hash_before: None,
        semantic_hash_after: bundle.semantic_hash().map(str::to_string),
        token_delta: estimate_bundle_tokens_with(bundle, config.chars_per_token) as i64,
        details: None,
    }
}

pub(crate) fn bundle_removed(bundle: &Bundle, config: &DiffConfig) -> ComponentChange {
    ComponentChange {
        root_component: bundle.component_name(),
        change_type: ChangeType::BundleRemoved,
        semantic_hash_before: bundle.semantic_hash().map(str::to_string),
        semantic_hash_after: None,
        token_delta: -(estimate_bundle_tokens_with(bundle, config.chars_per_token) as i64),
        details: None,
    }
}

/// A folder that only exists in the current index
pub fn added_folder(path: &str, bundles: &[Bundle], config: &DiffConfig) -> FolderDiff {
    FolderDiff {
        path: path.to_string(),
        status: FolderStatus::Added,
        changes: bundles.iter().map(|b| bundle_added(b, config)).collect(),
    }
}

/// A folder that only exists in the baseline index
pub fn removed_folder(path: &str, bundles: &[Bundle], config: &DiffConfig) -> FolderDiff {
    FolderDiff {
        path: path.to_string(),
        status: FolderStatus::Removed,
        changes: bundles.iter().map(|b| bundle_removed(b, config)).collect(),
    }
}

/// Reconcile the bundles of a folder present on both sides
///
/// The matching strategy is chosen from the declared bundle counts in the
/// index entries, not from the number of bundles actually loaded.
pub fn reconcile_bundles(
    path: &str,
    baseline_declared: usize,
    current_declared: usize,
    baseline: &[Bundle],
    current: &[Bundle],
    config: &DiffConfig,
) -> FolderDiff {
    let matcher = matcher_for_counts(baseline_declared, current_declared);
    let changes: Vec<ComponentChange> = matcher
        .match_bundles(baseline, current)
        .into_iter()
        .filter_map(|outcome| match outcome {
            BundleMatch::Paired { baseline, current } => diff_contracts(baseline, current, config),
            BundleMatch::Removed(bundle) => Some(bundle_removed(bundle, config)),
            BundleMatch::Added(bundle) => Some(bundle_added(bundle, config)),
        })
        .collect();

    tracing::debug!(
        folder_path = path,
        strategy = matcher.name(),
        change_count = changes.len(),
        "folder reconciled"
    );

    let status = if changes.is_empty() {
        FolderStatus::Unchanged
    } else {
        FolderStatus::Changed
    };
    FolderDiff {
        path: path.to_string(),
        status,
        changes,
    }
}

/// Load both sides of a folder and reconcile them
///
/// # Errors
///
/// Propagates bundle source failures (`Corrupt`, `Io`). A folder with no
/// bundle file loads as empty.
pub fn reconcile_folder<B, C>(
    baseline_meta: &FolderMetadata,
    current_meta: &FolderMetadata,
    baseline_source: &B,
    current_source: &C,
    config: &DiffConfig,
) -> Result<FolderDiff>
where
    B: BundleSource + ?Sized,
    C: BundleSource + ?Sized,
{
    let path = current_meta.path.as_str();
    let baseline = baseline_source.load_bundles(&baseline_meta.path)?;
    let current = current_source.load_bundles(path)?;
    Ok(reconcile_bundles(
        path,
        baseline_meta.bundles,
        current_meta.bundles,
        &baseline,
        &current,
        config,
    ))
}
