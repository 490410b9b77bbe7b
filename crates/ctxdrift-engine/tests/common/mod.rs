use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A bundle JSON value whose root node carries `semantic` as its hash
#[allow(dead_code)]
pub fn bundle_json(entry_id: &str, bundle_hash: &str, semantic: &str) -> Value {
    json!({
        "type": "LogicStampBundle",
        "schemaVersion": "0.1",
        "entryId": entry_id,
        "bundleHash": bundle_hash,
        "position": "1/1",
        "graph": {
            "nodes": [{
                "entryId": entry_id,
                "contract": {
                    "semanticHash": semantic,
                    "fileHash": format!("file-{bundle_hash}"),
                    "version": {"functions": [], "imports": [], "variables": [], "hooks": [], "components": []},
                    "logicSignature": {"props": {}},
                    "exports": "default"
                }
            }],
            "edges": []
        },
        "meta": {"missing": [], "source": "generator@test"}
    })
}

/// Write a context directory: index plus one bundle file per folder
#[allow(dead_code)]
pub fn write_context_dir(root: &Path, folders: &[(&str, Vec<Value>)]) {
    let index = json!({
        "type": "LogicStampIndex",
        "schemaVersion": "0.2",
        "projectRoot": ".",
        "summary": {
            "totalComponents": folders.iter().map(|(_, b)| b.len()).sum::<usize>(),
            "totalBundles": folders.iter().map(|(_, b)| b.len()).sum::<usize>(),
            "totalFolders": folders.len(),
            "totalTokenEstimate": 0
        },
        "folders": folders
            .iter()
            .map(|(path, bundles)| json!({
                "path": path,
                "contextFile": format!("{path}/context.json"),
                "bundles": bundles.len(),
                "components": [],
                "tokenEstimate": 0
            }))
            .collect::<Vec<_>>()
    });
    fs::create_dir_all(root).unwrap();
    fs::write(
        root.join("context_main.json"),
        serde_json::to_vec_pretty(&index).unwrap(),
    )
    .unwrap();

    for (path, bundles) in folders {
        let dir = if *path == "." {
            root.to_path_buf()
        } else {
            root.join(path)
        };
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("context.json"),
            serde_json::to_vec_pretty(&Value::Array(bundles.clone())).unwrap(),
        )
        .unwrap();
    }
}

/// A temp workspace holding `baseline/` and `current/` context directories
#[allow(dead_code)]
pub fn setup_pair(
    baseline: &[(&str, Vec<Value>)],
    current: &[(&str, Vec<Value>)],
) -> TempDir {
    let temp = TempDir::new().unwrap();
    write_context_dir(&temp.path().join("baseline"), baseline);
    write_context_dir(&temp.path().join("current"), current);
    temp
}
