//! Placeholder extraction and template rendering.
//!
//! A placeholder is a `{identifier}` token where the identifier is one or
//! more ASCII word characters (`[A-Za-z0-9_]`). Detection is advisory:
//! anything that does not match the pattern exactly (`{}`, `{first name}`,
//! unbalanced braces) is ordinary text, never an error.

use std::collections::HashMap;
use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::{Captures, Regex};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Regex pattern matching `{placeholder}` tokens in prompt templates.
pub const PLACEHOLDER_PATTERN: &str = r"\{([A-Za-z0-9_]+)\}";

/// Compiled regex for `{placeholder}` extraction. Compiled once, reused forever.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract all `{placeholder}` names from a template string.
///
/// Returns the names without braces, de-duplicated, in order of first
/// occurrence.
pub fn extract_placeholders(text: &str) -> Vec<String> {
    let names: IndexSet<&str> = PLACEHOLDER_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();
    names.into_iter().map(str::to_string).collect()
}

/// Whether `name` could appear inside a placeholder (`[A-Za-z0-9_]+`).
pub fn is_placeholder_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Substitute `values` into every `{name}` occurrence of `template`.
///
/// Placeholders with no value, or with an empty value, are left as the
/// literal `{name}` token so the caller can see what still needs input.
/// Substitution is a single pass: text inserted from `values` is never
/// scanned again, even if it looks like a placeholder.
pub fn render_template(template: &str, values: &HashMap<String, String>) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| match values.get(&caps[1]) {
            Some(value) if !value.is_empty() => value.clone(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

/// Placeholders still present in an already rendered string.
///
/// An empty result means the render was complete.
pub fn unresolved_placeholders(rendered: &str) -> Vec<String> {
    extract_placeholders(rendered)
}

/// Whether `text` contains no placeholder tokens at all.
pub fn is_fully_rendered(text: &str) -> bool {
    !PLACEHOLDER_RE.is_match(text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
