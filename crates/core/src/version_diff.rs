//! Differences between two versions of the same template.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::CoreError;
use crate::placeholder::extract_placeholders;
use crate::template::Template;

/// Summary of differences between two template versions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateDiff {
    pub name: String,
    pub from_version: i32,
    pub to_version: i32,
    /// Whether the user prompt text changed.
    pub user_prompt_changed: bool,
    /// Whether the system prompt text changed (including set/unset).
    pub system_prompt_changed: bool,
    /// Number of words added to the user prompt.
    pub user_prompt_additions: usize,
    /// Number of words removed from the user prompt.
    pub user_prompt_removals: usize,
    /// Placeholders present in the new user prompt but not the old one.
    pub placeholders_added: Vec<String>,
    /// Placeholders present in the old user prompt but not the new one.
    pub placeholders_removed: Vec<String>,
    /// Whether the input schema changed.
    pub input_schema_changed: bool,
}

/// Compare two versions of one template family.
///
/// Fails with a validation error when the templates belong to different
/// families, since their version numbers are unrelated.
pub fn diff_templates(from: &Template, to: &Template) -> Result<TemplateDiff, CoreError> {
    if from.name != to.name {
        return Err(CoreError::Validation(format!(
            "Cannot diff templates from different families ('{}' vs '{}')",
            from.name, to.name
        )));
    }

    let user_prompt_changed = from.user_prompt != to.user_prompt;
    let (user_prompt_additions, user_prompt_removals) = if user_prompt_changed {
        word_diff_counts(&from.user_prompt, &to.user_prompt)
    } else {
        (0, 0)
    };
    let (placeholders_added, placeholders_removed) =
        placeholder_changes(&from.user_prompt, &to.user_prompt);

    Ok(TemplateDiff {
        name: to.name.clone(),
        from_version: from.version,
        to_version: to.version,
        user_prompt_changed,
        system_prompt_changed: from.system_prompt != to.system_prompt,
        user_prompt_additions,
        user_prompt_removals,
        placeholders_added,
        placeholders_removed,
        input_schema_changed: from.input_schema != to.input_schema,
    })
}

/// Count word-level additions and removals between two texts.
///
/// Uses simple set-difference on word bags (not order-sensitive).
fn word_diff_counts(old_text: &str, new_text: &str) -> (usize, usize) {
    let old_words: Vec<&str> = old_text.split_whitespace().collect();
    let new_words: Vec<&str> = new_text.split_whitespace().collect();

    let old_set: HashSet<&str> = old_words.iter().copied().collect();
    let new_set: HashSet<&str> = new_words.iter().copied().collect();

    let additions = new_words.iter().filter(|w| !old_set.contains(**w)).count();
    let removals = old_words.iter().filter(|w| !new_set.contains(**w)).count();

    (additions, removals)
}

fn placeholder_changes(old_text: &str, new_text: &str) -> (Vec<String>, Vec<String>) {
    let old = extract_placeholders(old_text);
    let new = extract_placeholders(new_text);

    let added = new.iter().filter(|p| !old.contains(p)).cloned().collect();
    let removed = old.iter().filter(|p| !new.contains(p)).cloned().collect();
    (added, removed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
