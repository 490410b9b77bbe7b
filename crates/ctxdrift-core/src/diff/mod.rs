//! Snapshot diff engine.
//!
//! Compares the index and bundle files of two context snapshots and produces
//! a structured, deterministic [`CompareResult`].
//!
//! ## Entry point
//!
//! ```ignore
//! use ctxdrift_core::diff::{compare, render_human_summary};
//!
//! let result = compare("current", &baseline_index, &current_index, &baseline_dir, &current_dir, &config);
//! println!("{}", render_human_summary(&result));
//! ```
//!
//! ## Pipeline
//!
//! index folders → folder reconciler → bundle matcher → contract differ.
//!
//! ## Guarantees
//!
//! - **Determinism**: folders are visited in sorted path order and bundle
//!   serialization uses ordered maps, so identical inputs produce identical
//!   output.
//! - **Partition**: every folder path in either index lands in exactly one of
//!   added, removed, changed, unchanged.
//! - **No rename detection**: a renamed component is one removal plus one
//!   addition.

pub mod contract;
pub mod engine;
pub mod folder;
pub mod human_summary;
pub mod matcher;
pub mod model;
pub mod source;

pub use contract::{contract_details, diff_contracts};
pub use engine::{compare, compare_indexes};
pub use folder::{added_folder, reconcile_bundles, reconcile_folder, removed_folder};
pub use human_summary::render_human_summary;
pub use matcher::{matcher_for_counts, BundleMatch, BundleMatcher, NameMatcher, TieredMatcher};
pub use model::{
    ChangeDetails, ChangeType, CompareResult, CompareStatus, CompareSummary, ComponentChange,
    FolderDiff, FolderStatus, TokenDelta,
};
pub use source::BundleSource;
