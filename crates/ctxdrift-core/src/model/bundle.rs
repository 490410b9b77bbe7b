use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::contract::Contract;

/// Source-file extensions stripped when deriving a component name
const COMPONENT_EXTENSIONS: &[&str] = &[".tsx", ".ts", ".jsx", ".js"];

/// Bundle - contract plus dependency graph for one root component
///
/// Fields the diff engine does not interpret are kept in `extra` so that a
/// bundle re-serializes to (nearly) the bytes the generator wrote, which
/// keeps token estimates meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Source file identifier of the root component
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub entry_id: String,

    /// Content digest of the whole bundle
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bundle_hash: String,

    /// Ordinal within the folder's bundle file, as `"k/n"`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub position: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,

    #[serde(default, skip_serializing_if = "BundleGraph::is_empty")]
    pub graph: BundleGraph,

    #[serde(default, skip_serializing_if = "BundleMeta::is_empty")]
    pub meta: BundleMeta,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Dependency graph; `nodes[0]` is the root component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleGraph {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<BundleNode>,
    /// `(from, to)` entry id pairs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<(String, String)>,
}

/// One component in a bundle graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleNode {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub entry_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<Contract>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Bundle provenance and unresolved dependencies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleMeta {
    /// Dependencies the generator could not resolve (shape is generator-defined)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl BundleGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

impl BundleMeta {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.source.is_none()
    }
}

impl Bundle {
    /// The root node, if the graph has any nodes
    pub fn root_node(&self) -> Option<&BundleNode> {
        self.graph.nodes.first()
    }

    /// Entry id of the root node, falling back to the bundle's own entry id
    pub fn root_entry_id(&self) -> &str {
        match self.root_node() {
            Some(node) if !node.entry_id.is_empty() => &node.entry_id,
            _ => &self.entry_id,
        }
    }

    /// Stable cross-snapshot identity of this bundle
    pub fn component_name(&self) -> String {
        component_name(self.root_entry_id())
    }

    /// Contract of the root node
    pub fn root_contract(&self) -> Option<&Contract> {
        self.root_node().and_then(|n| n.contract.as_ref())
    }

    /// Semantic hash of the root contract
    pub fn semantic_hash(&self) -> Option<&str> {
        self.root_contract().map(|c| c.semantic_hash.as_str())
    }
}

/// Derive a component name from an entry id
///
/// Takes the last segment after splitting on `/` and `\`, then strips one
/// trailing `.ts`, `.tsx`, `.js` or `.jsx`.
///
/// ```
/// use ctxdrift_core::model::component_name;
///
/// assert_eq!(component_name("src/components/Button.tsx"), "Button");
/// assert_eq!(component_name("src\\lib\\util.js"), "util");
/// assert_eq!(component_name("styles.css"), "styles.css");
/// ```
pub fn component_name(entry_id: &str) -> String {
    let file = entry_id
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(entry_id);
    for ext in COMPONENT_EXTENSIONS {
        if let Some(stem) = file.strip_suffix(ext) {
            return stem.to_string();
        }
    }
    file.to_string()
}
