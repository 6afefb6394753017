//! Prompt template entity, validation, and listing helpers.
//!
//! Templates are immutable: saving under an existing name produces a new
//! record with the next version number. The helpers here group, filter and
//! sort the flat list of records the store returns.

use std::cmp::Reverse;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::placeholder::extract_placeholders;
use crate::schema::{
    merge_with_placeholders, schema_to_variables, validate_variables, ObjectSchema, SchemaVariable,
};
use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length for a template name in characters.
pub const MAX_TEMPLATE_NAME_LENGTH: usize = 200;

/// Maximum length for a user or system prompt in characters.
pub const MAX_PROMPT_LENGTH: usize = 10_000;

/// Maximum length for a template description in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 1_000;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// Expected shape of the model output for a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
    Code,
    Structured,
}

/// One version of a named prompt template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: EntityId,
    pub name: String,
    pub version: i32,
    pub user_prompt: String,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub input_schema: Option<ObjectSchema>,
    #[serde(default)]
    pub output_schema: Option<ObjectSchema>,
    #[serde(default)]
    pub output_format: Option<OutputFormat>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Template {
    /// Materialize a create request as version `version` of its family.
    pub fn from_new(input: NewTemplate, version: i32, now: Timestamp) -> Self {
        Self {
            id: uuid::Uuid::now_v7(),
            name: input.name,
            version,
            user_prompt: input.user_prompt,
            system_prompt: input.system_prompt,
            description: input.description,
            input_schema: input.input_schema,
            output_schema: input.output_schema,
            output_format: input.output_format,
            created_at: now,
            updated_at: now,
        }
    }

    /// Placeholders used by the user prompt, in first-occurrence order.
    pub fn placeholders(&self) -> Vec<String> {
        extract_placeholders(&self.user_prompt)
    }

    /// Input variables: the declared schema plus any undeclared placeholders.
    pub fn input_variables(&self) -> Vec<SchemaVariable> {
        merge_with_placeholders(self.input_schema.as_ref(), &self.user_prompt)
    }
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a new template (or a new version of one).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTemplate {
    pub name: String,
    pub user_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<ObjectSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<ObjectSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
}

impl NewTemplate {
    /// Trim the name and turn blank optional text fields into `None`.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.system_prompt = self.system_prompt.filter(|s| !s.trim().is_empty());
        self.description = self.description.filter(|s| !s.trim().is_empty());
        self
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a template name: non-empty, bounded, and URL-path friendly.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::Validation(
            "Template name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_TEMPLATE_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Template name exceeds maximum length of {MAX_TEMPLATE_NAME_LENGTH} characters (got {})",
            name.len()
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(CoreError::Validation(format!(
            "Template name '{name}' may only contain letters, digits, '-', '_' and '.'"
        )));
    }
    Ok(())
}

/// Validate a user prompt: must be non-empty and within length limit.
pub fn validate_user_prompt(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(
            "User prompt must not be empty".to_string(),
        ));
    }
    if text.len() > MAX_PROMPT_LENGTH {
        return Err(CoreError::Validation(format!(
            "User prompt exceeds maximum length of {MAX_PROMPT_LENGTH} characters (got {})",
            text.len()
        )));
    }
    Ok(())
}

/// Validate a system prompt: length check only.
pub fn validate_system_prompt(text: &str) -> Result<(), CoreError> {
    if text.len() > MAX_PROMPT_LENGTH {
        return Err(CoreError::Validation(format!(
            "System prompt exceeds maximum length of {MAX_PROMPT_LENGTH} characters (got {})",
            text.len()
        )));
    }
    Ok(())
}

/// Validate a description: length check only.
pub fn validate_description(text: &str) -> Result<(), CoreError> {
    if text.len() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters (got {})",
            text.len()
        )));
    }
    Ok(())
}

/// Validate every field of a create request.
pub fn validate_new_template(input: &NewTemplate) -> Result<(), CoreError> {
    validate_name(&input.name)?;
    validate_user_prompt(&input.user_prompt)?;
    if let Some(ref system) = input.system_prompt {
        validate_system_prompt(system)?;
    }
    if let Some(ref description) = input.description {
        validate_description(description)?;
    }
    validate_variables(&schema_to_variables(input.input_schema.as_ref()))?;
    validate_variables(&schema_to_variables(input.output_schema.as_ref()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Versions
// ---------------------------------------------------------------------------

/// Highest version recorded for `name`, if any.
pub fn latest_version<'a>(
    templates: impl IntoIterator<Item = &'a Template>,
    name: &str,
) -> Option<i32> {
    templates
        .into_iter()
        .filter(|t| t.name == name)
        .map(|t| t.version)
        .max()
}

/// Keep only the highest version of each name, in order of first appearance.
pub fn latest_per_name(templates: Vec<Template>) -> Vec<Template> {
    let mut latest: IndexMap<String, Template> = IndexMap::new();
    for template in templates {
        match latest.get(&template.name) {
            Some(current) if current.version >= template.version => {}
            _ => {
                latest.insert(template.name.clone(), template);
            }
        }
    }
    latest.into_values().collect()
}

// ---------------------------------------------------------------------------
// Search & sort
// ---------------------------------------------------------------------------

/// Ordering for template listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateSort {
    /// Name ascending.
    Name,
    /// Most recently updated first.
    #[default]
    Updated,
}

/// Keep templates whose name or description contains `query`
/// (case-insensitive). A blank query keeps everything.
pub fn filter_templates(templates: Vec<Template>, query: &str) -> Vec<Template> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return templates;
    }
    templates
        .into_iter()
        .filter(|t| {
            t.name.to_lowercase().contains(&needle)
                || t
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect()
}

pub fn sort_templates(templates: &mut [Template], sort: TemplateSort) {
    match sort {
        TemplateSort::Name => {
            templates.sort_by(|a, b| a.name.cmp(&b.name).then(b.version.cmp(&a.version)))
        }
        TemplateSort::Updated => templates.sort_by_key(|t| Reverse(t.updated_at)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::schema::{variables_to_schema, VariableType};

    fn template(name: &str, version: i32, day: u32) -> Template {
        let at = Utc.with_ymd_and_hms(2026, 1, day, 10, 0, 0).unwrap();
        Template::from_new(
            NewTemplate {
                name: name.to_string(),
                user_prompt: format!("{name} v{version} {{input}}"),
                description: Some(format!("About {name}")),
                ..Default::default()
            },
            version,
            at,
        )
    }

    // -- validate_name --

    #[test]
    fn valid_names_pass() {
        assert!(validate_name("code-reviewer").is_ok());
        assert!(validate_name("faq_responder.v2").is_ok());
    }

    #[test]
    fn empty_name_rejected() {
        let err = validate_name("").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn name_with_slash_rejected() {
        let err = validate_name("a/b").unwrap_err();
        assert!(err.to_string().contains("may only contain"));
    }

    #[test]
    fn too_long_name_rejected() {
        let long = "x".repeat(MAX_TEMPLATE_NAME_LENGTH + 1);
        let err = validate_name(&long).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum length"));
    }

    // -- validate_user_prompt / validate_system_prompt --

    #[test]
    fn blank_user_prompt_rejected() {
        let err = validate_user_prompt("   ").unwrap_err();
        assert!(err.to_string().contains("User prompt must not be empty"));
    }

    #[test]
    fn boundary_prompt_length_passes() {
        let exact = "x".repeat(MAX_PROMPT_LENGTH);
        assert!(validate_user_prompt(&exact).is_ok());
        assert!(validate_system_prompt(&exact).is_ok());
    }

    #[test]
    fn too_long_system_prompt_rejected() {
        let long = "x".repeat(MAX_PROMPT_LENGTH + 1);
        let err = validate_system_prompt(&long).unwrap_err();
        assert!(err.to_string().contains("System prompt exceeds"));
    }

    // -- validate_new_template --

    #[test]
    fn schema_with_bad_property_name_rejected() {
        let input = NewTemplate {
            name: "greeter".to_string(),
            user_prompt: "Hello {name}".to_string(),
            input_schema: Some(variables_to_schema(&[SchemaVariable::new(
                "first name",
                VariableType::String,
            )])),
            ..Default::default()
        };
        let err = validate_new_template(&input).unwrap_err();
        assert!(err.to_string().contains("first name"));
    }

    #[test]
    fn normalized_drops_blank_optionals() {
        let input = NewTemplate {
            name: "  greeter ".to_string(),
            user_prompt: "Hello".to_string(),
            system_prompt: Some("  ".to_string()),
            description: Some(String::new()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(input.name, "greeter");
        assert!(input.system_prompt.is_none());
        assert!(input.description.is_none());
    }

    // -- Template --

    #[test]
    fn input_variables_merge_schema_and_prompt() {
        let mut t = template("summarizer", 1, 1);
        t.user_prompt = "Summarize {content} in {language}".to_string();
        t.input_schema = Some(variables_to_schema(&[
            SchemaVariable::new("content", VariableType::String).with_description("Body"),
        ]));

        let names: Vec<String> = t.input_variables().into_iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["content", "language"]);
        assert_eq!(t.placeholders(), vec!["content", "language"]);
    }

    #[test]
    fn template_json_without_schema_fields_decodes() {
        let json = serde_json::json!({
            "id": "0190b7a4-7b7e-7cc0-8c1f-2f0b7f6f2a11",
            "name": "translator",
            "version": 1,
            "user_prompt": "Translate {text}",
            "created_at": "2026-01-04T14:00:00Z",
            "updated_at": "2026-01-07T14:00:00Z",
        });
        let t: Template = serde_json::from_value(json).unwrap();
        assert!(t.input_schema.is_none());
        assert!(t.output_format.is_none());
    }

    // -- latest_version / latest_per_name --

    #[test]
    fn latest_version_per_family() {
        let all = vec![template("a", 1, 1), template("a", 3, 2), template("b", 1, 3)];
        assert_eq!(latest_version(&all, "a"), Some(3));
        assert_eq!(latest_version(&all, "b"), Some(1));
        assert_eq!(latest_version(&all, "c"), None);
    }

    #[test]
    fn latest_per_name_keeps_highest_version() {
        let all = vec![
            template("a", 2, 5),
            template("b", 1, 3),
            template("a", 1, 1),
            template("a", 3, 2),
        ];
        let latest = latest_per_name(all);
        let pairs: Vec<(&str, i32)> = latest.iter().map(|t| (t.name.as_str(), t.version)).collect();
        assert_eq!(pairs, vec![("a", 3), ("b", 1)]);
    }

    // -- filter_templates --

    #[test]
    fn filter_matches_name_or_description_case_insensitively() {
        let mut other = template("translator", 1, 1);
        other.description = Some("Convert LANGUAGES".to_string());
        let all = vec![template("summarizer", 1, 1), other];

        assert_eq!(filter_templates(all.clone(), "SUMM").len(), 1);
        assert_eq!(filter_templates(all.clone(), "languages").len(), 1);
        assert_eq!(filter_templates(all.clone(), "  ").len(), 2);
        assert!(filter_templates(all, "nothing").is_empty());
    }

    // -- sort_templates --

    #[test]
    fn sort_by_name_then_newest_version() {
        let mut all = vec![template("b", 1, 1), template("a", 1, 2), template("a", 2, 3)];
        sort_templates(&mut all, TemplateSort::Name);
        let pairs: Vec<(&str, i32)> = all.iter().map(|t| (t.name.as_str(), t.version)).collect();
        assert_eq!(pairs, vec![("a", 2), ("a", 1), ("b", 1)]);
    }

    #[test]
    fn sort_by_updated_newest_first() {
        let mut all = vec![template("old", 1, 1), template("new", 1, 9), template("mid", 1, 5)];
        sort_templates(&mut all, TemplateSort::Updated);
        let names: Vec<&str> = all.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["new", "mid", "old"]);
    }
}
