//! Boundary decoding for context files.
//!
//! Every file read from a context directory passes through here exactly once.
//! Anything with the wrong shape becomes a `Corrupt` error at load time rather
//! than a surprise halfway through reconciliation.

use serde_json::Value;
use std::collections::BTreeSet;

use crate::errors::{ModelError, Result};
use crate::model::bundle::Bundle;
use crate::model::index::{Index, INDEX_DOCUMENT_TYPE};

/// A decoded context file, tagged by kind
#[derive(Debug, Clone, PartialEq)]
pub enum ContextDocument {
    /// `context_main.json`
    Index(Box<Index>),
    /// A folder's `context.json`
    Bundles(Vec<Bundle>),
}

fn decode_json(document: &str, bytes: &[u8]) -> std::result::Result<Value, ModelError> {
    let text = std::str::from_utf8(bytes).map_err(|e| ModelError::InvalidUtf8 {
        document: document.to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_str(text).map_err(|e| ModelError::InvalidJson {
        document: document.to_string(),
        message: e.to_string(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn index_from_value(raw: Value) -> std::result::Result<Index, ModelError> {
    let found = match raw.get("type") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => json_kind(other).to_string(),
        None if raw.is_object() => "<missing>".to_string(),
        None => json_kind(&raw).to_string(),
    };
    if found != INDEX_DOCUMENT_TYPE {
        return Err(ModelError::WrongDocumentType {
            expected: INDEX_DOCUMENT_TYPE.to_string(),
            found,
        });
    }

    let index: Index = serde_json::from_value(raw).map_err(|e| ModelError::SchemaMismatch {
        document: "index".to_string(),
        message: e.to_string(),
    })?;

    let mut seen = BTreeSet::new();
    for folder in &index.folders {
        if !seen.insert(folder.path.as_str()) {
            return Err(ModelError::DuplicateFolder {
                path: folder.path.clone(),
            });
        }
    }

    Ok(index)
}

fn bundles_from_value(raw: Value) -> std::result::Result<Vec<Bundle>, ModelError> {
    if !raw.is_array() {
        return Err(ModelError::BundleFileNotArray {
            found: json_kind(&raw).to_string(),
        });
    }
    serde_json::from_value(raw).map_err(|e| ModelError::SchemaMismatch {
        document: "bundle file".to_string(),
        message: e.to_string(),
    })
}

/// Parse index file bytes
///
/// # Errors
///
/// `Corrupt` if the bytes are not UTF-8 JSON, the `type` discriminator is not
/// `LogicStampIndex`, a field has the wrong shape, or two folders share a path.
pub fn parse_index_bytes(bytes: &[u8]) -> Result<Index> {
    let raw = decode_json("index", bytes)?;
    Ok(index_from_value(raw)?)
}

/// Parse a folder's bundle file bytes
///
/// # Errors
///
/// `Corrupt` if the bytes are not UTF-8 JSON, the root is not an array, or a
/// bundle has the wrong shape.
pub fn parse_bundle_file_bytes(bytes: &[u8]) -> Result<Vec<Bundle>> {
    let raw = decode_json("bundle file", bytes)?;
    Ok(bundles_from_value(raw)?)
}

/// Parse either kind of context file, deciding by shape
///
/// A JSON array is a bundle file; anything else must be an index.
///
/// # Errors
///
/// Same as [`parse_index_bytes`] / [`parse_bundle_file_bytes`].
pub fn parse_context_document(bytes: &[u8]) -> Result<ContextDocument> {
    let raw = decode_json("context document", bytes)?;
    if raw.is_array() {
        Ok(ContextDocument::Bundles(bundles_from_value(raw)?))
    } else {
        Ok(ContextDocument::Index(Box::new(index_from_value(raw)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use serde_json::json;

    fn bytes(v: &Value) -> Vec<u8> {
        serde_json::to_vec(v).unwrap()
    }

    #[test]
    fn test_index_requires_type_discriminator() {
        let err = parse_index_bytes(&bytes(&json!({"type": "LogicStampBundle"}))).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Corrupt);
        assert!(err.message().contains("LogicStampBundle"));

        let err = parse_index_bytes(&bytes(&json!({"folders": []}))).unwrap_err();
        assert!(err.message().contains("<missing>"));
    }

    #[test]
    fn test_index_rejects_duplicate_folders() {
        let raw = json!({
            "type": "LogicStampIndex",
            "folders": [{"path": "src"}, {"path": "src"}]
        });
        let err = parse_index_bytes(&bytes(&raw)).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Corrupt);
        assert_eq!(err.path(), Some("src"));
    }

    #[test]
    fn test_bundle_file_must_be_array() {
        let err = parse_bundle_file_bytes(&bytes(&json!({"entryId": "a"}))).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Corrupt);
        assert!(err.message().contains("object"));
    }

    #[test]
    fn test_invalid_json_is_corrupt() {
        let err = parse_bundle_file_bytes(b"[{").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Corrupt);
        let err = parse_index_bytes(&[0xff, 0xfe]).unwrap_err();
        assert!(err.message().contains("UTF-8"));
    }

    #[test]
    fn test_context_document_is_tagged_by_shape() {
        let doc = parse_context_document(b"[]").unwrap();
        assert_eq!(doc, ContextDocument::Bundles(vec![]));

        let doc = parse_context_document(&bytes(&json!({"type": "LogicStampIndex"}))).unwrap();
        assert!(matches!(doc, ContextDocument::Index(index) if index.folders.is_empty()));
    }
}
