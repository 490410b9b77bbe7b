// Integration tests for reading context directories from disk
// Covers missing files, corrupt files and digest stability

use ctxdrift_core::errors::ExErrorKind;
use ctxdrift_core::diff::BundleSource;
use ctxdrift_store::{digest_bytes, ContextDir};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

// Helper to create a context directory with an index listing `folders`
fn setup_context_dir(folders: &[&str]) -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp context directory");
    let index = json!({
        "type": "LogicStampIndex",
        "schemaVersion": "0.2",
        "summary": {"totalComponents": 1, "totalBundles": 1, "totalFolders": folders.len()},
        "folders": folders
            .iter()
            .map(|p| json!({"path": p, "bundles": 1, "components": []}))
            .collect::<Vec<_>>()
    });
    fs::write(
        temp.path().join("context_main.json"),
        serde_json::to_vec_pretty(&index).unwrap(),
    )
    .unwrap();
    temp
}

fn write_bundles(temp: &TempDir, folder: &str, body: &str) {
    let dir = if folder == "." {
        temp.path().to_path_buf()
    } else {
        temp.path().join(folder)
    };
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("context.json"), body).unwrap();
}

#[test]
fn test_index_and_bundles_load() {
    // Given: A context directory with one folder and its bundle file
    let temp = setup_context_dir(&["src/components"]);
    write_bundles(
        &temp,
        "src/components",
        r#"[{"entryId": "src/components/Button.tsx", "bundleHash": "h1",
             "graph": {"nodes": [{"entryId": "src/components/Button.tsx",
                                  "contract": {"semanticHash": "s1"}}], "edges": []}}]"#,
    );
    let dir = ContextDir::new(temp.path());

    // When: We read the index and the folder's bundles
    let index = dir.read_index().unwrap();
    let bundles = dir.load_bundles("src/components").unwrap();

    // Then: Both decode
    assert_eq!(index.folders.len(), 1);
    assert_eq!(bundles.len(), 1);
    assert_eq!(bundles[0].component_name(), "Button");
    assert_eq!(bundles[0].semantic_hash(), Some("s1"));
}

#[test]
fn test_missing_bundle_file_is_empty() {
    // Given: An index listing a folder with no bundle file on disk
    let temp = setup_context_dir(&["src/empty"]);

    // When: We load that folder
    let bundles = ContextDir::new(temp.path()).load_bundles("src/empty").unwrap();

    // Then: It is empty rather than an error
    assert!(bundles.is_empty());
}

#[test]
fn test_root_folder_reads_directory_bundle_file() {
    let temp = setup_context_dir(&["."]);
    write_bundles(&temp, ".", r#"[{"entryId": "App.tsx", "bundleHash": "h"}]"#);

    let bundles = ContextDir::new(temp.path()).read_bundles(".").unwrap();

    assert_eq!(bundles.len(), 1);
    assert_eq!(bundles[0].component_name(), "App");
}

#[test]
fn test_corrupt_bundle_file_names_path() {
    // Given: A bundle file that is an object instead of an array
    let temp = setup_context_dir(&["src"]);
    write_bundles(&temp, "src", r#"{"entryId": "src/A.tsx"}"#);

    // When: We load it
    let err = ContextDir::new(temp.path()).read_bundles("src").unwrap_err();

    // Then: It is Corrupt and names the file
    assert_eq!(err.kind(), ExErrorKind::Corrupt);
    assert!(err.path().unwrap().ends_with("context.json"));
}

#[test]
fn test_wrong_index_type_is_corrupt() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("context_main.json"),
        r#"{"type": "SomethingElse", "folders": []}"#,
    )
    .unwrap();

    let err = ContextDir::new(temp.path()).read_index().unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Corrupt);
    assert!(err.path().unwrap().ends_with("context_main.json"));
}

#[test]
fn test_index_digest_matches_file_bytes() {
    // Given: A context directory
    let temp = setup_context_dir(&["src"]);
    let raw = fs::read(temp.path().join("context_main.json")).unwrap();

    // When: We load the index twice
    let dir = ContextDir::new(temp.path());
    let first = dir.load_index().unwrap();
    let second = dir.load_index().unwrap();

    // Then: The digest is stable and covers the raw bytes
    assert_eq!(first.digest, digest_bytes(&raw));
    assert_eq!(first.digest, second.digest);
    assert_eq!(first.digest.len(), 64);
}
