use ctxdrift_core::model::{Bundle, BundleGraph, BundleNode, Contract, FolderMetadata, Index};
use std::collections::BTreeMap;

/// In-memory bundle files keyed by folder path
pub type Dataset = BTreeMap<String, Vec<Bundle>>;

/// Create a bundle whose root node carries a contract with `semantic` hash
#[allow(dead_code)]
pub fn bundle(entry_id: &str, bundle_hash: &str, semantic: &str) -> Bundle {
    bundle_with_contract(
        entry_id,
        bundle_hash,
        Contract {
            semantic_hash: semantic.to_string(),
            ..Default::default()
        },
    )
}

/// Create a bundle around an explicit root contract
#[allow(dead_code)]
pub fn bundle_with_contract(entry_id: &str, bundle_hash: &str, contract: Contract) -> Bundle {
    Bundle {
        entry_id: entry_id.to_string(),
        bundle_hash: bundle_hash.to_string(),
        position: "1/1".to_string(),
        graph: BundleGraph {
            nodes: vec![BundleNode {
                entry_id: entry_id.to_string(),
                contract: Some(contract),
                ..Default::default()
            }],
            edges: vec![],
        },
        ..Default::default()
    }
}

/// Build an index plus dataset from `(folder, bundles)` pairs
///
/// Declared bundle counts match the bundles actually supplied.
#[allow(dead_code)]
pub fn dataset(folders: &[(&str, Vec<Bundle>)]) -> (Index, Dataset) {
    let mut index = Index {
        doc_type: "LogicStampIndex".to_string(),
        schema_version: "0.2".to_string(),
        ..Default::default()
    };
    let mut data = Dataset::new();
    for (path, bundles) in folders {
        index.folders.push(FolderMetadata {
            path: path.to_string(),
            context_file: Some(format!("{path}/context.json")),
            bundles: bundles.len(),
            components: bundles.iter().map(|b| b.component_name()).collect(),
            ..Default::default()
        });
        data.insert(path.to_string(), bundles.clone());
    }
    (index, data)
}
