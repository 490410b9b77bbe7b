//! Dataset references accepted by engine queries.
//!
//! A dataset is anything that resolves to a context directory: the current
//! snapshot, a registered snapshot by id, or a directory on disk.

#![allow(clippy::result_large_err)]

use ctxdrift_core::errors::{ExError, ExErrorKind, Result};
use ctxdrift_core::SnapshotRegistry;
use ctxdrift_store::ContextDir;
use std::fmt;
use std::path::PathBuf;

use crate::config::EngineConfig;

const SNAPSHOT_PREFIX: &str = "snapshot:";
const GIT_PREFIX: &str = "git:";
const SNAPSHOT_ID_PREFIX: &str = "snap_";

/// A parsed dataset reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetRef {
    /// The registry's current snapshot
    Current,
    /// A registered snapshot id
    Snapshot(String),
    /// A version-control ref; recognised but not supported
    Git(String),
    /// A context directory on disk
    Directory(PathBuf),
}

impl DatasetRef {
    /// Parse a reference string
    ///
    /// `"current"`, `"snapshot:<id>"`, a bare `snap_...` id, `"git:<ref>"`,
    /// or anything else as a directory path.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty reference or an empty id/ref after a prefix.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(invalid(raw, "dataset reference must not be empty"));
        }
        if raw == "current" {
            return Ok(DatasetRef::Current);
        }
        if let Some(id) = raw.strip_prefix(SNAPSHOT_PREFIX) {
            if id.is_empty() {
                return Err(invalid(raw, "snapshot reference is missing an id"));
            }
            return Ok(DatasetRef::Snapshot(id.to_string()));
        }
        if let Some(git_ref) = raw.strip_prefix(GIT_PREFIX) {
            if git_ref.is_empty() {
                return Err(invalid(raw, "git reference is missing a ref"));
            }
            return Ok(DatasetRef::Git(git_ref.to_string()));
        }
        if raw.starts_with(SNAPSHOT_ID_PREFIX) {
            return Ok(DatasetRef::Snapshot(raw.to_string()));
        }
        Ok(DatasetRef::Directory(PathBuf::from(raw)))
    }

    /// Resolve to a context directory
    ///
    /// # Errors
    ///
    /// `NotFound` when there is no current snapshot or the id is unknown or
    /// expired, `Unsupported` for git references.
    pub fn resolve(&self, registry: &SnapshotRegistry, config: &EngineConfig) -> Result<ContextDir> {
        match self {
            DatasetRef::Current => registry
                .current()
                .map(|s| config.context_dir(s.context_dir.clone()))
                .ok_or_else(|| {
                    ExError::new(ExErrorKind::NotFound)
                        .with_op("resolve_dataset")
                        .with_message("no current snapshot; register a context directory first")
                }),
            DatasetRef::Snapshot(id) => registry
                .require(id)
                .map(|s| config.context_dir(s.context_dir.clone())),
            DatasetRef::Git(git_ref) => Err(ExError::new(ExErrorKind::Unsupported)
                .with_op("resolve_dataset")
                .with_entity_id(git_ref)
                .with_message("git baselines are not implemented")),
            DatasetRef::Directory(path) => Ok(config.context_dir(path.clone())),
        }
    }
}

impl fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetRef::Current => write!(f, "current"),
            DatasetRef::Snapshot(id) => write!(f, "{SNAPSHOT_PREFIX}{id}"),
            DatasetRef::Git(git_ref) => write!(f, "{GIT_PREFIX}{git_ref}"),
            DatasetRef::Directory(path) => write!(f, "{}", path.display()),
        }
    }
}

fn invalid(raw: &str, message: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("parse_dataset")
        .with_entity_id(raw)
        .with_message(message)
}
