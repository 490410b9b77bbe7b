//! Index-level comparison.
//!
//! The core entry point is [`compare_indexes`], which walks the union of
//! folder paths from two indexes and produces a [`CompareResult`].

#![allow(clippy::result_large_err)]

use std::collections::{BTreeMap, BTreeSet};

use crate::config::DiffConfig;
use crate::diff::folder::{added_folder, reconcile_folder, removed_folder};
use crate::diff::model::{
    CompareResult, CompareStatus, CompareSummary, FolderDiff, FolderStatus, TokenDelta,
};
use crate::diff::source::BundleSource;
use crate::errors::Result;
use crate::model::{FolderMetadata, Index};

fn folders_by_path(index: &Index) -> BTreeMap<&str, &FolderMetadata> {
    index
        .folders
        .iter()
        .map(|f| (f.path.as_str(), f))
        .collect()
}

/// Token delta across the whole compare
///
/// Authoritative per-model totals win when both indexes carry them. Otherwise
/// the summed per-change estimate is scaled by the configured ratios.
fn token_delta(
    baseline: &Index,
    current: &Index,
    folder_diffs: &[FolderDiff],
    config: &DiffConfig,
) -> TokenDelta {
    if let (Some(before), Some(after)) = (
        baseline.summary.token_estimates.as_ref(),
        current.summary.token_estimates.as_ref(),
    ) {
        return TokenDelta {
            gpt4o_mini: after.gpt4o_mini as i64 - before.gpt4o_mini as i64,
            claude: after.claude as i64 - before.claude as i64,
        };
    }

    let estimated: i64 = folder_diffs
        .iter()
        .flat_map(|f| f.changes.iter())
        .map(|c| c.token_delta)
        .sum();
    let ratios = &config.fallback_ratios;
    TokenDelta {
        gpt4o_mini: (estimated as f64 * ratios.gpt4o_mini).round() as i64,
        claude: (estimated as f64 * ratios.claude).round() as i64,
    }
}

/// Compare two indexes folder by folder.
///
/// `baseline` is the descriptor echoed back in the result. Folders are
/// visited in sorted path order, so identical inputs always yield an
/// identical result.
///
/// # Errors
///
/// Propagates bundle source failures: `Corrupt` for an undecodable bundle
/// file, `Io` for a read failure.
pub fn compare_indexes<B, C>(
    baseline: &str,
    baseline_index: &Index,
    current_index: &Index,
    baseline_source: &B,
    current_source: &C,
    config: &DiffConfig,
) -> Result<CompareResult>
where
    B: BundleSource + ?Sized,
    C: BundleSource + ?Sized,
{
    let before = folders_by_path(baseline_index);
    let after = folders_by_path(current_index);
    let paths: BTreeSet<&str> = before.keys().chain(after.keys()).copied().collect();

    let mut summary = CompareSummary {
        total_folders: paths.len(),
        ..Default::default()
    };
    let mut folder_diffs = Vec::new();

    for path in paths {
        let diff = match (before.get(path), after.get(path)) {
            (None, Some(_)) => added_folder(path, &current_source.load_bundles(path)?, config),
            (Some(_), None) => removed_folder(path, &baseline_source.load_bundles(path)?, config),
            (Some(b), Some(c)) => reconcile_folder(b, c, baseline_source, current_source, config)?,
            (None, None) => continue,
        };

        match diff.status {
            FolderStatus::Added => summary.added_folders += 1,
            FolderStatus::Removed => summary.removed_folders += 1,
            FolderStatus::Changed => summary.changed_folders += 1,
            FolderStatus::Unchanged => summary.unchanged_folders += 1,
        }
        if diff.status != FolderStatus::Unchanged {
            folder_diffs.push(diff);
        }
    }

    summary.token_delta = token_delta(baseline_index, current_index, &folder_diffs, config);

    let status = if folder_diffs.iter().any(|f| !f.changes.is_empty()) {
        CompareStatus::Diff
    } else {
        CompareStatus::Pass
    };

    Ok(CompareResult {
        baseline: baseline.to_string(),
        status,
        summary,
        folder_diffs,
        error: None,
    })
}

/// Like [`compare_indexes`], but never fails
///
/// Any error becomes a result with `status: error` carrying the rendered
/// error message.
pub fn compare<B, C>(
    baseline: &str,
    baseline_index: &Index,
    current_index: &Index,
    baseline_source: &B,
    current_source: &C,
    config: &DiffConfig,
) -> CompareResult
where
    B: BundleSource + ?Sized,
    C: BundleSource + ?Sized,
{
    compare_indexes(
        baseline,
        baseline_index,
        current_index,
        baseline_source,
        current_source,
        config,
    )
    .unwrap_or_else(|e| CompareResult::error(baseline, e.to_string()))
}
