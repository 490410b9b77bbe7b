//! Typed view of the generator's context files
//!
//! - [`Index`]: project-wide folder summary (`context_main.json`)
//! - [`Bundle`]: one root component's contract and dependency graph
//! - [`Contract`]: a component's behavior-relevant surface
//!
//! Raw bytes enter through [`document`], which validates the schema once so
//! the diff engine only ever sees well-formed values.

pub mod bundle;
pub mod contract;
pub mod document;
pub mod index;

pub use bundle::{component_name, Bundle, BundleGraph, BundleMeta, BundleNode};
pub use contract::{Contract, ContractVersion, ExportShape, Exports, LogicSignature, PropSignature};
pub use document::{parse_bundle_file_bytes, parse_context_document, parse_index_bytes, ContextDocument};
pub use index::{FolderMetadata, Index, IndexSummary, TokenEstimates, INDEX_DOCUMENT_TYPE};
