//! Human-readable summary renderer for compare results.

use crate::diff::model::{
    ChangeDetails, ChangeType, CompareResult, CompareStatus, ComponentChange, FolderStatus,
};

/// Render a human-readable Markdown summary of a [`CompareResult`].
///
/// Intended for terminals and review comments. It is informational only and
/// carries nothing the structured result does not.
pub fn render_human_summary(result: &CompareResult) -> String {
    let mut out = String::new();

    out.push_str("## Context Drift\n\n");

    let status_label = match result.status {
        CompareStatus::Pass => "PASS",
        CompareStatus::Diff => "DIFF",
        CompareStatus::Error => "ERROR",
    };
    out.push_str(&format!(
        "**Status**: {status_label}  \n**Baseline**: `{}`\n\n",
        result.baseline
    ));

    if let Some(error) = &result.error {
        out.push_str(&format!("**Error**: {error}\n"));
        return out;
    }

    let s = &result.summary;
    out.push_str("### Folders\n\n");
    out.push_str(&format!(
        "| Total | Unchanged | Changed | Added | Removed |\n\
         |---|---|---|---|---|\n\
         | {} | {} | {} | {} | {} |\n\n",
        s.total_folders, s.unchanged_folders, s.changed_folders, s.added_folders, s.removed_folders,
    ));

    out.push_str(&format!(
        "**Token delta**: gpt-4o-mini {}, claude {}\n\n",
        signed(s.token_delta.gpt4o_mini),
        signed(s.token_delta.claude)
    ));

    if result.folder_diffs.is_empty() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    for folder in &result.folder_diffs {
        let marker = match folder.status {
            FolderStatus::Added => "added",
            FolderStatus::Removed => "removed",
            FolderStatus::Changed | FolderStatus::Unchanged => "changed",
        };
        out.push_str(&format!("### `{}` ({marker})\n\n", folder.path));
        if folder.changes.is_empty() {
            out.push_str("_No bundles._\n\n");
            continue;
        }
        for change in &folder.changes {
            render_change(&mut out, change);
        }
        out.push('\n');
    }

    out
}

fn render_change(out: &mut String, change: &ComponentChange) {
    let label = match change.change_type {
        ChangeType::BundleAdded => "added",
        ChangeType::BundleRemoved => "removed",
        ChangeType::HashChanged => "hash changed",
        ChangeType::UifContractChanged => "contract changed",
    };
    out.push_str(&format!(
        "- **{}** {label} ({} tokens)\n",
        change.root_component,
        signed(change.token_delta)
    ));
    if change.change_type == ChangeType::UifContractChanged {
        if let (Some(before), Some(after)) = (&change.semantic_hash_before, &change.semantic_hash_after)
        {
            out.push_str(&format!("  - semantic hash `{}` -> `{}`\n", short(before), short(after)));
        }
    }
    if let Some(details) = &change.details {
        render_details(out, details);
    }
}

fn render_details(out: &mut String, details: &ChangeDetails) {
    let lists: [(&str, &Vec<String>); 8] = [
        ("props added", &details.added_props),
        ("props removed", &details.removed_props),
        ("props changed", &details.changed_props),
        ("functions added", &details.added_functions),
        ("functions removed", &details.removed_functions),
        ("imports added", &details.added_imports),
        ("imports removed", &details.removed_imports),
        ("exports modified", &details.modified_exports),
    ];
    for (label, items) in lists {
        if !items.is_empty() {
            out.push_str(&format!("  - {label}: {}\n", items.join(", ")));
        }
    }
}

fn signed(n: i64) -> String {
    if n > 0 {
        format!("+{n}")
    } else {
        n.to_string()
    }
}

/// Return the first 12 characters of a hash for display purposes.
fn short(hash: &str) -> &str {
    match hash.char_indices().nth(12) {
        Some((end, _)) => &hash[..end],
        None => hash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::{CompareSummary, FolderDiff, TokenDelta};

    fn result_with(folder_diffs: Vec<FolderDiff>) -> CompareResult {
        CompareResult {
            baseline: "current".to_string(),
            status: if folder_diffs.is_empty() {
                CompareStatus::Pass
            } else {
                CompareStatus::Diff
            },
            summary: CompareSummary {
                total_folders: 3,
                unchanged_folders: 3 - folder_diffs.len(),
                changed_folders: folder_diffs.len(),
                token_delta: TokenDelta {
                    gpt4o_mini: 12,
                    claude: -4,
                },
                ..Default::default()
            },
            folder_diffs,
            error: None,
        }
    }

    #[test]
    fn test_summary_pass() {
        let text = render_human_summary(&result_with(vec![]));
        assert!(text.contains("**Status**: PASS"));
        assert!(text.contains("| 3 | 3 | 0 | 0 | 0 |"));
        assert!(text.contains("gpt-4o-mini +12, claude -4"));
        assert!(text.contains("_No changes detected._"));
    }

    #[test]
    fn test_summary_lists_changes_and_details() {
        let change = ComponentChange {
            root_component: "Button".to_string(),
            change_type: ChangeType::UifContractChanged,
            semantic_hash_before: Some("uif:aaaaaaaaaaaaaaaa".to_string()),
            semantic_hash_after: Some("uif:bbbbbbbbbbbbbbbb".to_string()),
            token_delta: 7,
            details: Some(ChangeDetails {
                added_props: vec!["size".to_string()],
                ..Default::default()
            }),
        };
        let text = render_human_summary(&result_with(vec![FolderDiff {
            path: "src/ui".to_string(),
            status: FolderStatus::Changed,
            changes: vec![change],
        }]));
        assert!(text.contains("### `src/ui` (changed)"));
        assert!(text.contains("- **Button** contract changed (+7 tokens)"));
        assert!(text.contains("`uif:aaaaaaaa` -> `uif:bbbbbbbb`"));
        assert!(text.contains("  - props added: size"));
        assert!(!text.contains("props removed"));
    }

    #[test]
    fn test_summary_error() {
        let text = render_human_summary(&CompareResult::error("git:main", "not supported"));
        assert!(text.contains("**Status**: ERROR"));
        assert!(text.contains("**Error**: not supported"));
        assert!(!text.contains("### Folders"));
    }
}
