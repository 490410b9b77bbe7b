//! Engine-level commands that mutate the snapshot registry.

#![allow(clippy::result_large_err)]

use ctxdrift_core::errors::Result;
use ctxdrift_core_types::RequestId;
use ctxdrift_core::{log_op_end, log_op_error, log_op_start};
use ctxdrift_core::{AnalysisOptions, Snapshot, SnapshotRegistry};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::commands::expire_stale;
use crate::config::EngineConfig;

/// Engine-level commands
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Register an already generated context directory as a snapshot and
    /// make it current.
    SnapshotRegister {
        context_dir: PathBuf,
        options: AnalysisOptions,
    },
    /// Forget every snapshot and the last compare result.
    RegistryReset,
    /// Drop snapshots older than `max_age` (configured TTL when `None`).
    RegistryExpire { max_age: Option<Duration> },
}

/// Result of applying an engine command
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    SnapshotRegistered(Arc<Snapshot>),
    RegistryReset,
    RegistryExpired { removed: usize },
}

/// Apply an engine command against a registry.
///
/// # Errors
///
/// `SnapshotRegister` fails with `NotFound` when the directory has no index
/// file, `Corrupt` when the index does not decode, `Io` for read failures.
/// The other commands never fail. Errors carry the call's request id.
pub fn apply_engine_command(
    cmd: EngineCommand,
    registry: &SnapshotRegistry,
    config: &EngineConfig,
) -> Result<EngineCommandResult> {
    let request_id = RequestId::new();
    let _span = tracing::info_span!("engine_command", request_id = %request_id).entered();
    dispatch_command(cmd, registry, config).map_err(|e| e.with_request_id(request_id))
}

fn dispatch_command(
    cmd: EngineCommand,
    registry: &SnapshotRegistry,
    config: &EngineConfig,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::SnapshotRegister {
            context_dir,
            options,
        } => {
            let dir_display = context_dir.display().to_string();
            log_op_start!("snapshot_register", context_dir = %dir_display);
            let start = Instant::now();

            let result = (|| -> Result<EngineCommandResult> {
                let loaded = config.context_dir(context_dir.clone()).load_index()?;
                let snapshot = registry.create(context_dir, options, Some(loaded.digest));
                Ok(EngineCommandResult::SnapshotRegistered(snapshot))
            })();

            let elapsed = start.elapsed().as_millis() as u64;
            match &result {
                Ok(EngineCommandResult::SnapshotRegistered(snapshot)) => log_op_end!(
                    "snapshot_register",
                    duration_ms = elapsed,
                    snapshot_id = %snapshot.id
                ),
                Ok(_) => log_op_end!("snapshot_register", duration_ms = elapsed),
                Err(e) => {
                    let e_clone = e.clone();
                    log_op_error!("snapshot_register", e_clone, duration_ms = elapsed);
                }
            }
            result
        }

        EngineCommand::RegistryReset => {
            log_op_start!("registry_reset");
            let start = Instant::now();
            registry.reset();
            log_op_end!(
                "registry_reset",
                duration_ms = start.elapsed().as_millis() as u64
            );
            Ok(EngineCommandResult::RegistryReset)
        }

        EngineCommand::RegistryExpire { max_age } => {
            log_op_start!("registry_expire");
            let start = Instant::now();
            let removed = expire_stale(registry, max_age.unwrap_or_else(|| config.snapshot_ttl()));
            log_op_end!(
                "registry_expire",
                duration_ms = start.elapsed().as_millis() as u64,
                removed = removed
            );
            Ok(EngineCommandResult::RegistryExpired { removed })
        }
    }
}
