//! ctxdrift Core - context snapshot model and diff kernel
//!
//! This crate provides the foundational data structures and operations for
//! ctxdrift, including:
//! - Index, bundle and contract models decoded once at the file boundary
//! - The diff engine (folder reconciler, bundle matcher, contract differ)
//! - Token estimation for bundles
//! - The in-memory snapshot registry
//! - Canonical error and structured logging facilities
//!
//! File access lives in `ctxdrift-store`; this crate only sees bytes and the
//! [`diff::BundleSource`] seam.

pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod registry;
pub mod tokens;

// Macros reach schema constants through this path
pub use ctxdrift_core_types;

// Re-export commonly used types
pub use config::{DiffConfig, FallbackRatios};
pub use diff::{compare, compare_indexes, BundleSource, CompareResult, CompareStatus};
pub use errors::{ExError, ExErrorKind, ModelError, Result};
pub use model::{Bundle, Index};
pub use registry::{AnalysisOptions, Snapshot, SnapshotRegistry};
