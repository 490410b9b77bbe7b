pub mod bundle;
pub mod compare;
pub mod index;

use ctxdrift_core::SnapshotRegistry;
use ctxdrift_engine::{apply_engine_query, EngineConfig, EngineQuery, EngineQueryResult};
use std::path::Path;

/// Run one query against a throwaway registry
pub(crate) fn run_query(
    query: EngineQuery,
    config: &EngineConfig,
) -> Result<EngineQueryResult, Box<dyn std::error::Error>> {
    let registry = SnapshotRegistry::new();
    Ok(apply_engine_query(query, &registry, config)?)
}

/// Dataset reference for a directory argument
///
/// Relative paths are anchored at `.` so a directory named `current` or
/// `snap_*` is never read as a registry reference.
pub(crate) fn dir_dataset(dir: &Path) -> String {
    if dir.is_absolute() || dir.starts_with(".") {
        dir.display().to_string()
    } else {
        Path::new(".").join(dir).display().to_string()
    }
}
