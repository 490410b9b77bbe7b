//! ctxdrift Store - filesystem access to generated context directories
//!
//! Provides:
//! - Index and bundle file reads through the core boundary parsers
//! - Index digests recorded at snapshot registration
//! - The `BundleSource` implementation the diff engine reads folders through

pub mod context_dir;
pub mod errors;

// Re-export key types
pub use context_dir::{digest_bytes, ContextDir, LoadedIndex, DEFAULT_BUNDLE_FILE, DEFAULT_INDEX_FILE};
pub use errors::Result;
