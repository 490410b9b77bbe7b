/// Scenario 1: Components Added And Removed Within A Folder
///
/// A folder loses one component and gains another, so its declared bundle
/// count changes and name matching applies.
mod common;

use common::{bundle, dataset};
use ctxdrift_core::diff::{compare_indexes, ChangeType, CompareStatus, FolderStatus};
use ctxdrift_core::DiffConfig;

#[test]
fn test_scenario_01_removed_and_added_components_are_reported() {
    // GIVEN a baseline folder with Button and Input
    let (baseline_index, baseline_data) = dataset(&[(
        "src/components",
        vec![
            bundle("src/components/Button.tsx", "H1", "S1"),
            bundle("src/components/Input.tsx", "H2", "S2"),
        ],
    )]);

    // AND a current folder with Button unchanged, Input gone and Select new
    let (mut current_index, current_data) = dataset(&[(
        "src/components",
        vec![
            bundle("src/components/Button.tsx", "H1", "S1"),
            bundle("src/components/Select.tsx", "H3", "S3"),
        ],
    )]);
    // AND the declared count differs
    current_index.folders[0].bundles = 3;

    // WHEN comparing
    let result = compare_indexes(
        "current",
        &baseline_index,
        &current_index,
        &baseline_data,
        &current_data,
        &DiffConfig::default(),
    )
    .unwrap();

    // THEN the folder is changed with exactly Input removed and Select added
    assert_eq!(result.status, CompareStatus::Diff);
    assert_eq!(result.folder_diffs.len(), 1);
    let folder = &result.folder_diffs[0];
    assert_eq!(folder.path, "src/components");
    assert_eq!(folder.status, FolderStatus::Changed);

    let changes: Vec<(&str, ChangeType)> = folder
        .changes
        .iter()
        .map(|c| (c.root_component.as_str(), c.change_type))
        .collect();
    assert_eq!(
        changes,
        vec![
            ("Input", ChangeType::BundleRemoved),
            ("Select", ChangeType::BundleAdded)
        ]
    );

    // AND Button does not appear
    assert!(result.changes().all(|(_, c)| c.root_component != "Button"));
}

#[test]
fn test_scenario_01_token_fallback_scales_summed_deltas() {
    // GIVEN indexes without per-model token totals
    let (baseline_index, baseline_data) = dataset(&[("ui", vec![])]);
    let (current_index, current_data) =
        dataset(&[("ui", vec![bundle("ui/Select.tsx", "H3", "S3")])]);

    // WHEN comparing
    let config = DiffConfig::default();
    let result = compare_indexes(
        "current",
        &baseline_index,
        &current_index,
        &baseline_data,
        &current_data,
        &config,
    )
    .unwrap();

    // THEN the summary delta is the per-change sum scaled by the ratios
    let summed: i64 = result.changes().map(|(_, c)| c.token_delta).sum();
    assert!(summed > 0);
    assert_eq!(
        result.summary.token_delta.gpt4o_mini,
        (summed as f64 * 0.6).round() as i64
    );
    assert_eq!(
        result.summary.token_delta.claude,
        (summed as f64 * 0.5).round() as i64
    );
}

#[test]
fn test_scenario_01_whole_folders_added_and_removed() {
    // GIVEN a baseline with a legacy folder and a current with a new folder
    let (baseline_index, baseline_data) = dataset(&[
        ("legacy", vec![bundle("legacy/Old.tsx", "H1", "S1")]),
        ("shared", vec![bundle("shared/Card.tsx", "H2", "S2")]),
    ]);
    let (current_index, current_data) = dataset(&[
        ("fresh", vec![bundle("fresh/New.tsx", "H3", "S3")]),
        ("shared", vec![bundle("shared/Card.tsx", "H2", "S2")]),
    ]);

    // WHEN comparing
    let result = compare_indexes(
        "current",
        &baseline_index,
        &current_index,
        &baseline_data,
        &current_data,
        &DiffConfig::default(),
    )
    .unwrap();

    // THEN folder diffs are sorted by path and classified
    let statuses: Vec<(&str, FolderStatus)> = result
        .folder_diffs
        .iter()
        .map(|f| (f.path.as_str(), f.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("fresh", FolderStatus::Added),
            ("legacy", FolderStatus::Removed)
        ]
    );
    assert_eq!(result.summary.total_folders, 3);
    assert_eq!(result.summary.unchanged_folders, 1);
    assert_eq!(result.folder_diffs[0].changes[0].change_type, ChangeType::BundleAdded);
    assert_eq!(result.folder_diffs[1].changes[0].change_type, ChangeType::BundleRemoved);
}
