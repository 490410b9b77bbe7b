//! Command orchestration layer.
//!
//! Commands mutate the snapshot registry; queries only read context files
//! (a compare additionally records its result as the last compare result).

pub mod dataset;
pub mod engine_command;
pub mod engine_query;

use ctxdrift_core::SnapshotRegistry;
use std::time::Duration;

/// Drop snapshots older than `max_age`; returns how many were removed
///
/// An age too large to represent removes nothing.
pub(crate) fn expire_stale(registry: &SnapshotRegistry, max_age: Duration) -> usize {
    match chrono::Duration::from_std(max_age) {
        Ok(age) => registry.expire(age),
        Err(_) => 0,
    }
}
