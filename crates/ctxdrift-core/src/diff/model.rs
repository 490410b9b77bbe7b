//! Compare output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq` and
//! serialize with the camelCase field names remote agents consume.

use serde::{Deserialize, Serialize};

/// The top-level result of comparing two snapshots.
///
/// `summary` counts are derived from the per-folder classification, so
/// `unchanged + changed + added + removed == total_folders` always holds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompareResult {
    /// Describes what the current state was compared against
    pub baseline: String,
    pub status: CompareStatus,
    pub summary: CompareSummary,
    /// Folders whose status is not `unchanged`, sorted by path
    pub folder_diffs: Vec<FolderDiff>,
    /// Human-readable failure, present only when `status == Error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Overall outcome of a compare.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompareStatus {
    /// No folder produced a change
    Pass,
    /// At least one folder produced a change
    Diff,
    /// The compare could not be completed; see `error`
    Error,
}

/// Folder counts by category plus the token delta.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompareSummary {
    pub total_folders: usize,
    pub unchanged_folders: usize,
    pub changed_folders: usize,
    pub added_folders: usize,
    pub removed_folders: usize,
    pub token_delta: TokenDelta,
}

/// Token delta per cost model (current minus baseline).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenDelta {
    pub gpt4o_mini: i64,
    pub claude: i64,
}

/// Changes within one folder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FolderDiff {
    pub path: String,
    pub status: FolderStatus,
    pub changes: Vec<ComponentChange>,
}

/// Classification of a folder across the two snapshots.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FolderStatus {
    Added,
    Removed,
    Changed,
    Unchanged,
}

/// One component-level change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentChange {
    /// Component name derived from the root node's entry id
    pub root_component: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_hash_before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_hash_after: Option<String>,
    /// Estimated token delta for this bundle (current minus baseline)
    pub token_delta: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ChangeDetails>,
}

/// Kind of component change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    BundleAdded,
    BundleRemoved,
    /// Bytes changed, behavior-relevant surface did not
    HashChanged,
    /// Behavior-relevant surface changed
    UifContractChanged,
}

/// Field-level detail for a `UifContractChanged` change.
///
/// All lists are populated (possibly empty) to allow uniform downstream
/// processing; `changed_props` only appears when signature tracking is on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeDetails {
    pub added_props: Vec<String>,
    pub removed_props: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changed_props: Vec<String>,
    pub added_functions: Vec<String>,
    pub removed_functions: Vec<String>,
    pub added_imports: Vec<String>,
    pub removed_imports: Vec<String>,
    pub modified_exports: Vec<String>,
    /// Top-level contract fields that differ (`version`, `exports`,
    /// `logicSignature.props`)
    pub modified_fields: Vec<String>,
}

impl CompareResult {
    /// An error result carrying only the baseline descriptor and message
    pub fn error(baseline: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            baseline: baseline.into(),
            status: CompareStatus::Error,
            summary: CompareSummary::default(),
            folder_diffs: Vec::new(),
            error: Some(message.into()),
        }
    }

    /// Total number of component changes across all folders
    pub fn change_count(&self) -> usize {
        self.folder_diffs.iter().map(|f| f.changes.len()).sum()
    }

    /// Every component change, paired with its folder path
    pub fn changes(&self) -> impl Iterator<Item = (&str, &ComponentChange)> {
        self.folder_diffs
            .iter()
            .flat_map(|f| f.changes.iter().map(move |c| (f.path.as_str(), c)))
    }
}

impl FolderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FolderStatus::Added => "added",
            FolderStatus::Removed => "removed",
            FolderStatus::Changed => "changed",
            FolderStatus::Unchanged => "unchanged",
        }
    }
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::BundleAdded => "bundle_added",
            ChangeType::BundleRemoved => "bundle_removed",
            ChangeType::HashChanged => "hash_changed",
            ChangeType::UifContractChanged => "uif_contract_changed",
        }
    }
}
