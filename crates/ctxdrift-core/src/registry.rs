//! Snapshot registry.
//!
//! Holds the snapshots a session has registered, the "current" pointer and
//! the most recent compare result. The registry is an ordinary value owned by
//! whoever drives the engine; nothing here is global.
//!
//! Snapshots are immutable once created and handed out as `Arc<Snapshot>`.
//! Concurrent writers race with last-writer-wins semantics on `current` and
//! on the last compare result.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::diff::model::CompareResult;
use crate::errors::{ExError, ExErrorKind, Result};

/// Default snapshot lifetime: one hour
pub const DEFAULT_SNAPSHOT_TTL_MS: u64 = 60 * 60 * 1000;

/// Options the context generator was run with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default)]
    pub include_style: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_path: Option<String>,
}

/// A registered context directory at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// `snap_<unix-millis>_<counter>`
    pub id: String,
    /// Registration order within this process
    pub sequence: u64,
    pub created_at: DateTime<Utc>,
    pub context_dir: PathBuf,
    pub options: AnalysisOptions,
    /// SHA-256 hex of the index file bytes at registration time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_digest: Option<String>,
}

#[derive(Debug, Default)]
struct RegistryState {
    snapshots: BTreeMap<String, Arc<Snapshot>>,
    current: Option<String>,
    last_compare: Option<CompareResult>,
}

/// In-memory snapshot registry
#[derive(Debug, Default)]
pub struct SnapshotRegistry {
    state: RwLock<RegistryState>,
    counter: AtomicU64,
}

impl SnapshotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a snapshot and make it current
    pub fn create(
        &self,
        context_dir: impl Into<PathBuf>,
        options: AnalysisOptions,
        index_digest: Option<String>,
    ) -> Arc<Snapshot> {
        self.create_at(Utc::now(), context_dir.into(), options, index_digest)
    }

    fn create_at(
        &self,
        created_at: DateTime<Utc>,
        context_dir: PathBuf,
        options: AnalysisOptions,
        index_digest: Option<String>,
    ) -> Arc<Snapshot> {
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed);
        let snapshot = Arc::new(Snapshot {
            id: format!("snap_{}_{}", created_at.timestamp_millis(), sequence),
            sequence,
            created_at,
            context_dir,
            options,
            index_digest,
        });

        let mut state = self.state.write();
        state
            .snapshots
            .insert(snapshot.id.clone(), Arc::clone(&snapshot));
        state.current = Some(snapshot.id.clone());
        snapshot
    }

    pub fn get(&self, id: &str) -> Option<Arc<Snapshot>> {
        self.state.read().snapshots.get(id).cloned()
    }

    /// Look up a snapshot, failing with `NotFound` when absent or expired
    ///
    /// # Errors
    ///
    /// `NotFound` if no snapshot has this id.
    pub fn require(&self, id: &str) -> Result<Arc<Snapshot>> {
        self.get(id).ok_or_else(|| {
            ExError::new(ExErrorKind::NotFound)
                .with_op("snapshot_require")
                .with_entity_id(id)
                .with_message("snapshot not found or expired")
        })
    }

    pub fn current(&self) -> Option<Arc<Snapshot>> {
        let state = self.state.read();
        state
            .current
            .as_ref()
            .and_then(|id| state.snapshots.get(id))
            .cloned()
    }

    /// All snapshots in registration order
    pub fn list(&self) -> Vec<Arc<Snapshot>> {
        let mut snapshots: Vec<Arc<Snapshot>> =
            self.state.read().snapshots.values().cloned().collect();
        snapshots.sort_by_key(|s| s.sequence);
        snapshots
    }

    pub fn len(&self) -> usize {
        self.state.read().snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn set_last_compare_result(&self, result: CompareResult) {
        self.state.write().last_compare = Some(result);
    }

    pub fn last_compare_result(&self) -> Option<CompareResult> {
        self.state.read().last_compare.clone()
    }

    /// Drop snapshots older than `max_age`; returns how many were removed
    pub fn expire(&self, max_age: Duration) -> usize {
        match Utc::now().checked_sub_signed(max_age) {
            Some(cutoff) => self.expire_before(cutoff),
            None => 0,
        }
    }

    /// Drop snapshots created strictly before `cutoff`
    ///
    /// Clears the current pointer if it referred to a dropped snapshot.
    pub fn expire_before(&self, cutoff: DateTime<Utc>) -> usize {
        let mut state = self.state.write();
        let before = state.snapshots.len();
        state.snapshots.retain(|_, s| s.created_at >= cutoff);
        let removed = before - state.snapshots.len();

        let current_gone = state
            .current
            .as_ref()
            .is_some_and(|id| !state.snapshots.contains_key(id));
        if current_gone {
            state.current = None;
        }
        removed
    }

    /// Forget every snapshot and the last compare result
    pub fn reset(&self) {
        *self.state.write() = RegistryState::default();
    }
}
