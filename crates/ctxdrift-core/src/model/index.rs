use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discriminator carried in the `type` field of every index file
pub const INDEX_DOCUMENT_TYPE: &str = "LogicStampIndex";

/// Index - project-wide summary of a generated context directory
///
/// Lists every folder that holds a bundle file, plus aggregate counts and
/// token estimates for the whole project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    /// Document discriminator, always [`INDEX_DOCUMENT_TYPE`] once validated
    #[serde(rename = "type")]
    pub doc_type: String,

    #[serde(default)]
    pub schema_version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_root: Option<String>,

    /// Generation timestamp as written by the generator (kept verbatim)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default)]
    pub summary: IndexSummary,

    /// Folder entries in generator order; paths are unique
    #[serde(default)]
    pub folders: Vec<FolderMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// Aggregate counts and token estimates for a whole index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSummary {
    #[serde(default)]
    pub total_components: u64,
    #[serde(default)]
    pub total_bundles: u64,
    #[serde(default)]
    pub total_folders: u64,
    #[serde(default)]
    pub total_token_estimate: u64,
    /// Per-cost-model totals; older generators omit this block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_estimates: Option<TokenEstimates>,
    /// Component names with unmet dependencies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_dependencies: Option<Vec<String>>,
}

/// Token totals split by cost model, each with a "full code" variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenEstimates {
    #[serde(default)]
    pub gpt4o_mini: u64,
    #[serde(default)]
    pub gpt4o_mini_full_code: u64,
    #[serde(default)]
    pub claude: u64,
    #[serde(default)]
    pub claude_full_code: u64,
}

/// One folder entry in an index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderMetadata {
    /// Relative, slash-separated folder path (`"."` for the project root)
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_file: Option<String>,

    /// Declared bundle count. Advisory: the bundle file is authoritative.
    #[serde(default)]
    pub bundles: usize,

    /// Declared component file names
    #[serde(default)]
    pub components: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_root: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_label: Option<String>,

    #[serde(default)]
    pub token_estimate: u64,
}

impl Index {
    /// Look up a folder entry by exact path
    pub fn folder(&self, path: &str) -> Option<&FolderMetadata> {
        self.folders.iter().find(|f| f.path == path)
    }

    /// Folders whose path starts with `prefix`
    ///
    /// This is a literal string-prefix test: `"src/"` matches
    /// `"src/components"` but not `"srcTest"`, and `"src"` matches both.
    pub fn folders_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a FolderMetadata> + 'a {
        self.folders
            .iter()
            .filter(move |f| f.path.starts_with(prefix))
    }

    /// A copy of this index restricted to folders matching `prefix`
    ///
    /// The summary block is left untouched: it describes the whole project.
    pub fn filtered_by_prefix(&self, prefix: &str) -> Index {
        Index {
            folders: self.folders_with_prefix(prefix).cloned().collect(),
            ..self.clone()
        }
    }
}
