//! Contract-level comparison of two bundles for the same component.

use std::collections::BTreeSet;

use crate::config::DiffConfig;
use crate::diff::model::{ChangeDetails, ChangeType, ComponentChange};
use crate::model::{Bundle, Contract};
use crate::tokens::estimate_bundle_tokens_with;

/// Compute a set-delta between two ordered lists.
///
/// Returns `(added, removed)` where added = in b but not a, removed = in a but
/// not b. Input order is preserved and duplicates are reported once.
fn set_delta(a: &[String], b: &[String]) -> (Vec<String>, Vec<String>) {
    let set_a: BTreeSet<&str> = a.iter().map(|s| s.as_str()).collect();
    let set_b: BTreeSet<&str> = b.iter().map(|s| s.as_str()).collect();
    let mut seen = BTreeSet::new();
    let added: Vec<String> = b
        .iter()
        .filter(|s| !set_a.contains(s.as_str()) && seen.insert(s.as_str()))
        .cloned()
        .collect();
    let mut seen = BTreeSet::new();
    let removed: Vec<String> = a
        .iter()
        .filter(|s| !set_b.contains(s.as_str()) && seen.insert(s.as_str()))
        .cloned()
        .collect();
    (added, removed)
}

/// Token delta for a pair of bundles (current minus baseline)
pub(crate) fn bundle_token_delta(baseline: &Bundle, current: &Bundle, config: &DiffConfig) -> i64 {
    let before = estimate_bundle_tokens_with(baseline, config.chars_per_token) as i64;
    let after = estimate_bundle_tokens_with(current, config.chars_per_token) as i64;
    after - before
}

/// Field-level detail between two root contracts
///
/// A missing contract compares as an empty one.
pub fn contract_details(
    baseline: Option<&Contract>,
    current: Option<&Contract>,
    config: &DiffConfig,
) -> ChangeDetails {
    let empty = Contract::default();
    let a = baseline.unwrap_or(&empty);
    let b = current.unwrap_or(&empty);

    let mut details = ChangeDetails::default();

    let (added_functions, removed_functions) =
        set_delta(&a.version.functions, &b.version.functions);
    let (added_imports, removed_imports) = set_delta(&a.version.imports, &b.version.imports);
    details.added_functions = added_functions;
    details.removed_functions = removed_functions;
    details.added_imports = added_imports;
    details.removed_imports = removed_imports;
    if a.version != b.version {
        details.modified_fields.push("version".to_string());
    }

    let exports_a = a.exports.names();
    let exports_b = b.exports.names();
    details.modified_exports = exports_a
        .symmetric_difference(&exports_b)
        .cloned()
        .collect();
    if !details.modified_exports.is_empty() {
        details.modified_fields.push("exports".to_string());
    }

    let props_a = &a.logic_signature.props;
    let props_b = &b.logic_signature.props;
    details.added_props = props_b
        .keys()
        .filter(|k| !props_a.contains_key(*k))
        .cloned()
        .collect();
    details.removed_props = props_a
        .keys()
        .filter(|k| !props_b.contains_key(*k))
        .cloned()
        .collect();
    if config.track_prop_signatures {
        details.changed_props = props_a
            .iter()
            .filter(|(k, sig)| props_b.get(*k).is_some_and(|other| other != *sig))
            .map(|(k, _)| k.clone())
            .collect();
    }
    if !details.added_props.is_empty()
        || !details.removed_props.is_empty()
        || !details.changed_props.is_empty()
    {
        details.modified_fields.push("logicSignature.props".to_string());
    }

    details
}

/// Compare two bundles known to describe the same component
///
/// Returns `None` when both the semantic hash and the bundle hash agree.
/// A semantic hash change is a contract change with field-level details; a
/// bundle hash change alone is reported as `hash_changed`.
pub fn diff_contracts(
    baseline: &Bundle,
    current: &Bundle,
    config: &DiffConfig,
) -> Option<ComponentChange> {
    let semantic_before = baseline.semantic_hash();
    let semantic_after = current.semantic_hash();

    if semantic_before != semantic_after {
        return Some(ComponentChange {
            root_component: current.component_name(),
            change_type: ChangeType::UifContractChanged,
            semantic_hash_before: semantic_before.map(str::to_string),
            semantic_hash_after: semantic_after.map(str::to_string),
            token_delta: bundle_token_delta(baseline, current, config),
            details: Some(contract_details(
                baseline.root_contract(),
                current.root_contract(),
                config,
            )),
        });
    }

    if baseline.bundle_hash != current.bundle_hash {
        return Some(ComponentChange {
            root_component: current.component_name(),
            change_type: ChangeType::HashChanged,
            semantic_hash_before: semantic_before.map(str::to_string),
            semantic_hash_after: semantic_after.map(str::to_string),
            token_delta: bundle_token_delta(baseline, current, config),
            details: None,
        });
    }

    None
}
