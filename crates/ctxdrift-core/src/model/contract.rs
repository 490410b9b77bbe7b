use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Contract - behavior-relevant surface of one component
///
/// `semantic_hash` covers props, functions, imports, exports and state;
/// `file_hash` covers raw bytes. A formatting-only edit changes the latter
/// and leaves the former alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub semantic_hash: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file_hash: String,

    #[serde(default, skip_serializing_if = "ContractVersion::is_empty")]
    pub version: ContractVersion,

    #[serde(default, skip_serializing_if = "LogicSignature::is_empty")]
    pub logic_signature: LogicSignature,

    #[serde(default, skip_serializing_if = "Exports::is_empty")]
    pub exports: Exports,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Name lists describing what a component declares and uses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractVersion {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hooks: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Props plus whatever else the generator records (emits, state)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogicSignature {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, PropSignature>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A prop is either a bare type string or a detailed object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropSignature {
    Type(String),
    Detailed(PropDetail),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropDetail {
    #[serde(rename = "type", default)]
    pub prop_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Export surface as written by the generator
///
/// Generators emit either a bare kind string (`"default"`, `"named"`) or an
/// object listing the default export name and named exports. The kind
/// `"default"` reads as a default export named `default`; any other kind
/// string carries no names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Exports {
    Kind(String),
    Shape(ExportShape),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportShape {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub named: Vec<String>,
}

/// Kind string that stands for an unnamed default export
const DEFAULT_EXPORT_KIND: &str = "default";

impl Default for Exports {
    fn default() -> Self {
        Exports::Shape(ExportShape::default())
    }
}

impl Exports {
    /// Normalize every generator shape to a default name plus a named list
    pub fn normalized(&self) -> ExportShape {
        match self {
            Exports::Kind(kind) if kind == DEFAULT_EXPORT_KIND => ExportShape {
                default: Some(DEFAULT_EXPORT_KIND.to_string()),
                named: Vec::new(),
            },
            Exports::Kind(_) => ExportShape::default(),
            Exports::Shape(shape) => shape.clone(),
        }
    }

    /// Union of the default export and named exports
    pub fn names(&self) -> BTreeSet<String> {
        let shape = self.normalized();
        shape.named.into_iter().chain(shape.default).collect()
    }

    fn is_empty(&self) -> bool {
        matches!(self, Exports::Shape(shape) if shape.default.is_none() && shape.named.is_empty())
    }
}

impl ContractVersion {
    fn is_empty(&self) -> bool {
        self.functions.is_empty()
            && self.imports.is_empty()
            && self.variables.is_empty()
            && self.hooks.is_empty()
            && self.components.is_empty()
            && self.extra.is_empty()
    }
}

impl LogicSignature {
    fn is_empty(&self) -> bool {
        self.props.is_empty() && self.extra.is_empty()
    }
}
