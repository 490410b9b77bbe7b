//! Engine-level read-only query surface.
//!
//! `apply_engine_query` is the single entry point for all queries. Queries
//! never change the registry's snapshots; the only state they touch is the
//! last compare result, which every compare overwrites (including failed
//! ones) so repeated callers observe consistent state.

#![allow(clippy::result_large_err)]

use ctxdrift_core::diff::{compare_indexes, render_human_summary, CompareResult, CompareStatus};
use ctxdrift_core::errors::{ExError, ExErrorKind, Result};
use ctxdrift_core::model::{Bundle, Index};
use ctxdrift_core::{log_op_end, log_op_error, log_op_start};
use ctxdrift_core::{Snapshot, SnapshotRegistry};
use ctxdrift_core_types::RequestId;
use std::sync::Arc;
use std::time::Instant;

use crate::commands::dataset::DatasetRef;
use crate::commands::expire_stale;
use crate::config::EngineConfig;

// ---------------------------------------------------------------------------
// EngineQuery
// ---------------------------------------------------------------------------

/// Read-only queries supported by the engine.
#[derive(Debug, Clone)]
pub enum EngineQuery {
    // ── Compare ──────────────────────────────────────────────────────────────
    /// Compare two datasets. Always yields a result; failures become
    /// `status: error`.
    SnapshotCompare {
        /// Dataset reference for the baseline (see [`DatasetRef::parse`])
        baseline: String,
        /// Dataset reference for the current state
        current: String,
    },

    // ── Files ────────────────────────────────────────────────────────────────
    /// Read a dataset's index, optionally keeping only folders whose path
    /// starts with `folder_prefix`.
    IndexRead {
        dataset: String,
        folder_prefix: Option<String>,
    },
    /// Read one folder's bundles, optionally narrowed to one component.
    BundleRead {
        dataset: String,
        folder: String,
        root_component: Option<String>,
    },

    // ── Registry ─────────────────────────────────────────────────────────────
    /// Get a snapshot by id.
    SnapshotGet { id: String },
    /// Get the current snapshot, if any.
    SnapshotCurrent,
    /// List snapshots in registration order.
    SnapshotList,
    /// Get the most recent compare result, if any.
    LastCompareGet,
}

// ---------------------------------------------------------------------------
// EngineQueryResult
// ---------------------------------------------------------------------------

/// The structured + rendered result of a `SnapshotCompare` query.
#[derive(Debug, Clone)]
pub struct SnapshotCompareResult {
    /// Machine-readable result
    pub result: CompareResult,
    /// Human-readable Markdown summary
    pub human_summary: String,
}

/// All possible results from `apply_engine_query`.
#[derive(Debug, Clone)]
pub enum EngineQueryResult {
    SnapshotCompare(Box<SnapshotCompareResult>),
    IndexRead(Box<Index>),
    BundleRead(Vec<Bundle>),
    SnapshotGet(Arc<Snapshot>),
    SnapshotCurrent(Option<Arc<Snapshot>>),
    SnapshotList(Vec<Arc<Snapshot>>),
    LastCompareGet(Option<CompareResult>),
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve and run a compare; any error propagates to the caller.
fn run_compare(
    baseline: &str,
    current: &str,
    registry: &SnapshotRegistry,
    config: &EngineConfig,
) -> Result<CompareResult> {
    let baseline_dir = DatasetRef::parse(baseline)?.resolve(registry, config)?;
    let current_dir = DatasetRef::parse(current)?.resolve(registry, config)?;

    let baseline_index = baseline_dir.read_index()?;
    let current_index = current_dir.read_index()?;

    compare_indexes(
        baseline.trim(),
        &baseline_index,
        &current_index,
        &baseline_dir,
        &current_dir,
        &config.diff,
    )
}

/// Find a folder entry, failing with `NotFound` when the index lacks it
fn require_folder(index: &Index, folder: &str) -> Result<()> {
    let normalized = match folder {
        "" => ".",
        f => f,
    };
    if index.folder(normalized).is_some() {
        Ok(())
    } else {
        Err(ExError::new(ExErrorKind::NotFound)
            .with_op("bundle_read")
            .with_entity_id(folder)
            .with_message("folder is not listed in the index"))
    }
}

// ---------------------------------------------------------------------------
// apply_engine_query
// ---------------------------------------------------------------------------

/// Apply a read-only engine query.
///
/// Stale snapshots are expired (per `config.snapshot_ttl_ms`) before any
/// registry read.
///
/// # Errors
///
/// `SnapshotCompare` never fails. Other queries fail with `InvalidInput` for
/// malformed dataset references, `NotFound` for unknown snapshots, folders or
/// components, `Unsupported` for git references, and `Corrupt`/`Io` for
/// unreadable files. Errors carry the call's request id.
pub fn apply_engine_query(
    query: EngineQuery,
    registry: &SnapshotRegistry,
    config: &EngineConfig,
) -> Result<EngineQueryResult> {
    let request_id = RequestId::new();
    let _span = tracing::info_span!("engine_query", request_id = %request_id).entered();
    expire_stale(registry, config.snapshot_ttl());
    dispatch_query(query, registry, config).map_err(|e| e.with_request_id(request_id))
}

fn dispatch_query(
    query: EngineQuery,
    registry: &SnapshotRegistry,
    config: &EngineConfig,
) -> Result<EngineQueryResult> {

    match query {
        // ── SnapshotCompare ───────────────────────────────────────────────────
        EngineQuery::SnapshotCompare { baseline, current } => {
            log_op_start!("snapshot_compare", baseline = %baseline, current = %current);
            let start = Instant::now();

            let outcome = run_compare(&baseline, &current, registry, config);

            let elapsed = start.elapsed().as_millis() as u64;
            let result = match outcome {
                Ok(result) => {
                    log_op_end!(
                        "snapshot_compare",
                        duration_ms = elapsed,
                        status = ?result.status,
                        change_count = result.change_count()
                    );
                    result
                }
                Err(e) => {
                    let message = e.to_string();
                    log_op_error!("snapshot_compare", e, duration_ms = elapsed);
                    CompareResult::error(baseline.trim(), message)
                }
            };

            registry.set_last_compare_result(result.clone());
            let human_summary = render_human_summary(&result);
            Ok(EngineQueryResult::SnapshotCompare(Box::new(
                SnapshotCompareResult {
                    result,
                    human_summary,
                },
            )))
        }

        // ── IndexRead ─────────────────────────────────────────────────────────
        EngineQuery::IndexRead {
            dataset,
            folder_prefix,
        } => {
            log_op_start!("index_read", dataset = %dataset);
            let start = Instant::now();

            let result = (|| -> Result<EngineQueryResult> {
                let dir = DatasetRef::parse(&dataset)?.resolve(registry, config)?;
                let index = dir.read_index()?;
                let index = match folder_prefix.as_deref() {
                    Some(prefix) => index.filtered_by_prefix(prefix),
                    None => index,
                };
                Ok(EngineQueryResult::IndexRead(Box::new(index)))
            })();

            let elapsed = start.elapsed().as_millis() as u64;
            match &result {
                Ok(_) => log_op_end!("index_read", duration_ms = elapsed),
                Err(e) => {
                    let e_clone = e.clone();
                    log_op_error!("index_read", e_clone, duration_ms = elapsed);
                }
            }
            result
        }

        // ── BundleRead ────────────────────────────────────────────────────────
        EngineQuery::BundleRead {
            dataset,
            folder,
            root_component,
        } => {
            log_op_start!("bundle_read", dataset = %dataset, folder_path = %folder);
            let start = Instant::now();

            let result = (|| -> Result<EngineQueryResult> {
                let dir = DatasetRef::parse(&dataset)?.resolve(registry, config)?;
                require_folder(&dir.read_index()?, &folder)?;
                let bundles = dir.read_bundles(&folder)?;

                let bundles = match root_component.as_deref() {
                    None => bundles,
                    Some(name) => {
                        let matching: Vec<Bundle> = bundles
                            .into_iter()
                            .filter(|b| b.component_name() == name)
                            .collect();
                        if matching.is_empty() {
                            return Err(ExError::new(ExErrorKind::NotFound)
                                .with_op("bundle_read")
                                .with_entity_id(name)
                                .with_path(folder.clone())
                                .with_message("no bundle for component in folder"));
                        }
                        matching
                    }
                };
                Ok(EngineQueryResult::BundleRead(bundles))
            })();

            let elapsed = start.elapsed().as_millis() as u64;
            match &result {
                Ok(_) => log_op_end!("bundle_read", duration_ms = elapsed),
                Err(e) => {
                    let e_clone = e.clone();
                    log_op_error!("bundle_read", e_clone, duration_ms = elapsed);
                }
            }
            result
        }

        // ── SnapshotGet ───────────────────────────────────────────────────────
        EngineQuery::SnapshotGet { id } => {
            log_op_start!("snapshot_get", snapshot_id = %id);
            let start = Instant::now();

            let result = registry.require(&id).map(EngineQueryResult::SnapshotGet);

            let elapsed = start.elapsed().as_millis() as u64;
            match &result {
                Ok(_) => log_op_end!("snapshot_get", duration_ms = elapsed),
                Err(e) => {
                    let e_clone = e.clone();
                    log_op_error!("snapshot_get", e_clone, duration_ms = elapsed);
                }
            }
            result
        }

        // ── SnapshotCurrent ───────────────────────────────────────────────────
        EngineQuery::SnapshotCurrent => {
            log_op_start!("snapshot_current");
            let start = Instant::now();
            let current = registry.current();
            log_op_end!(
                "snapshot_current",
                duration_ms = start.elapsed().as_millis() as u64
            );
            Ok(EngineQueryResult::SnapshotCurrent(current))
        }

        // ── SnapshotList ──────────────────────────────────────────────────────
        EngineQuery::SnapshotList => {
            log_op_start!("snapshot_list");
            let start = Instant::now();
            let snapshots = registry.list();
            log_op_end!(
                "snapshot_list",
                duration_ms = start.elapsed().as_millis() as u64
            );
            Ok(EngineQueryResult::SnapshotList(snapshots))
        }

        // ── LastCompareGet ────────────────────────────────────────────────────
        EngineQuery::LastCompareGet => {
            log_op_start!("last_compare_get");
            let start = Instant::now();
            let last = registry.last_compare_result();
            log_op_end!(
                "last_compare_get",
                duration_ms = start.elapsed().as_millis() as u64,
                found = last.is_some()
            );
            Ok(EngineQueryResult::LastCompareGet(last))
        }
    }
}

impl SnapshotCompareResult {
    /// Whether the compare found no changes
    pub fn is_pass(&self) -> bool {
        self.result.status == CompareStatus::Pass
    }
}
