#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{bundle, Dataset};
use ctxdrift_core::diff::{compare_indexes, contract_details, ChangeType, CompareStatus};
use ctxdrift_core::model::{Bundle, Contract, FolderMetadata, Index, PropSignature};
use ctxdrift_core::DiffConfig;
use proptest::prelude::*;
use std::collections::BTreeMap;

/// folder number -> [(component number, hash variant, semantic variant)]
type Shape = BTreeMap<usize, Vec<(usize, u8, u8)>>;

fn shape_strategy() -> impl Strategy<Value = Shape> {
    prop::collection::btree_map(
        0usize..5,
        prop::collection::vec((0usize..4, 0u8..3, 0u8..3), 0..4),
        0..5,
    )
}

fn build(shape: &Shape) -> (Index, Dataset) {
    let mut index = Index {
        doc_type: "LogicStampIndex".to_string(),
        ..Default::default()
    };
    let mut data = Dataset::new();
    for (folder, entries) in shape {
        let path = format!("f{folder}");
        let bundles: Vec<Bundle> = entries
            .iter()
            .map(|(c, h, s)| {
                bundle(
                    &format!("{path}/C{c}.tsx"),
                    &format!("h{c}-{h}"),
                    &format!("s{c}-{s}"),
                )
            })
            .collect();
        index.folders.push(FolderMetadata {
            path: path.clone(),
            bundles: bundles.len(),
            ..Default::default()
        });
        data.insert(path, bundles);
    }
    (index, data)
}

proptest! {
    #[test]
    fn proptest_compare_against_self_passes(shape in shape_strategy()) {
        let (index, data) = build(&shape);
        let result = compare_indexes("current", &index, &index, &data, &data, &DiffConfig::default()).unwrap();
        prop_assert_eq!(result.status, CompareStatus::Pass);
        prop_assert!(result.folder_diffs.is_empty());
        prop_assert_eq!(result.summary.token_delta.gpt4o_mini, 0);
        prop_assert_eq!(result.summary.token_delta.claude, 0);
        prop_assert_eq!(result.summary.unchanged_folders, shape.len());
    }

    #[test]
    fn proptest_folder_counts_partition_total(a in shape_strategy(), b in shape_strategy()) {
        let (baseline, baseline_data) = build(&a);
        let (current, current_data) = build(&b);
        let result = compare_indexes("current", &baseline, &current, &baseline_data, &current_data, &DiffConfig::default()).unwrap();
        let s = &result.summary;
        prop_assert_eq!(
            s.unchanged_folders + s.changed_folders + s.added_folders + s.removed_folders,
            s.total_folders
        );
        let union: std::collections::BTreeSet<usize> = a.keys().chain(b.keys()).copied().collect();
        prop_assert_eq!(s.total_folders, union.len());
    }

    #[test]
    fn proptest_equal_semantic_hash_never_contract_change(a in shape_strategy(), b in shape_strategy()) {
        let (baseline, baseline_data) = build(&a);
        let (current, current_data) = build(&b);
        let result = compare_indexes("current", &baseline, &current, &baseline_data, &current_data, &DiffConfig::default()).unwrap();
        for (_, change) in result.changes() {
            match change.change_type {
                ChangeType::UifContractChanged => {
                    prop_assert_ne!(&change.semantic_hash_before, &change.semantic_hash_after);
                }
                ChangeType::HashChanged => {
                    prop_assert_eq!(&change.semantic_hash_before, &change.semantic_hash_after);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn proptest_compare_is_deterministic(a in shape_strategy(), b in shape_strategy()) {
        let (baseline, baseline_data) = build(&a);
        let (current, current_data) = build(&b);
        let config = DiffConfig::default();
        let first = compare_indexes("current", &baseline, &current, &baseline_data, &current_data, &config).unwrap();
        let second = compare_indexes("current", &baseline, &current, &baseline_data, &current_data, &config).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

fn props(names: &[&str]) -> Contract {
    let mut contract = Contract::default();
    for name in names {
        contract
            .logic_signature
            .props
            .insert(name.to_string(), PropSignature::Type("string".to_string()));
    }
    contract
}

#[test]
fn test_prop_set_difference_is_exact() {
    let details = contract_details(
        Some(&props(&["a", "b"])),
        Some(&props(&["b", "c"])),
        &DiffConfig::default(),
    );
    assert_eq!(details.added_props, vec!["c".to_string()]);
    assert_eq!(details.removed_props, vec!["a".to_string()]);
}

#[test]
fn test_prefix_filter_is_literal() {
    let index = Index {
        doc_type: "LogicStampIndex".to_string(),
        folders: ["src/components", "srcTest", "src/"]
            .iter()
            .map(|p| FolderMetadata {
                path: p.to_string(),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    };
    let kept: Vec<String> = index
        .filtered_by_prefix("src/")
        .folders
        .into_iter()
        .map(|f| f.path)
        .collect();
    assert_eq!(kept, vec!["src/components".to_string(), "src/".to_string()]);
}
