//! Input/output schemas and their flat variable-list form.
//!
//! Templates persist schemas in a simplified JSON Schema shape
//! (`{"type": "object", "properties": {...}, "required": [...]}`). Editors
//! work on an ordered list of [`SchemaVariable`] instead; the functions here
//! convert between the two and reconcile them with the placeholders found
//! in a prompt.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::placeholder::{extract_placeholders, is_placeholder_identifier};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Type tag of a single schema variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    #[default]
    String,
    Number,
    Boolean,
    Array,
    Object,
}

/// Editable, flat representation of one schema property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaVariable {
    pub name: String,
    #[serde(rename = "type", default)]
    pub var_type: VariableType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl SchemaVariable {
    /// A required variable with no description.
    pub fn new(name: impl Into<String>, var_type: VariableType) -> Self {
        Self {
            name: name.into(),
            var_type,
            description: None,
            required: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// The only schema kind templates use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaKind {
    #[default]
    #[serde(rename = "object")]
    Object,
}

/// A single entry of an [`ObjectSchema`]'s `properties` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub prop_type: VariableType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Persisted schema shape. Property order is insertion order.
///
/// `required` is omitted from the serialized form when no property is
/// required; an empty list is never emitted by [`variables_to_schema`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSchema {
    #[serde(rename = "type", default)]
    pub kind: SchemaKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, PropertySchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl ObjectSchema {
    /// Decode an arbitrary JSON value into a schema.
    ///
    /// `null` decodes to `None`. Unknown type tags or a non-object `type`
    /// are validation errors; unknown keys inside properties are ignored.
    pub fn from_value(value: &serde_json::Value) -> Result<Option<Self>, CoreError> {
        if value.is_null() {
            return Ok(None);
        }
        serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| CoreError::Validation(format!("Invalid schema: {e}")))
    }

    /// Whether `name` is listed in `required`.
    pub fn is_required(&self, name: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|names| names.iter().any(|n| n == name))
    }
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Build the persisted schema from an ordered variable list.
///
/// Names are expected to be unique. If they are not, the later variable
/// wins: its type, description and required flag replace the earlier ones
/// while the property keeps the position of its first occurrence. Use
/// [`validate_variables`] to reject duplicates instead.
///
/// Descriptions are copied as given: an empty description is written as
/// `""`, not dropped, so [`schema_to_variables`] returns the exact input.
pub fn variables_to_schema(variables: &[SchemaVariable]) -> ObjectSchema {
    let mut by_name: IndexMap<&str, &SchemaVariable> = IndexMap::new();
    for variable in variables {
        by_name.insert(variable.name.as_str(), variable);
    }

    let mut properties = IndexMap::with_capacity(by_name.len());
    let mut required = Vec::new();
    for (name, variable) in by_name {
        properties.insert(
            name.to_string(),
            PropertySchema {
                prop_type: variable.var_type,
                description: variable.description.clone(),
            },
        );
        if variable.required {
            required.push(name.to_string());
        }
    }

    ObjectSchema {
        kind: SchemaKind::Object,
        properties: Some(properties),
        required: (!required.is_empty()).then_some(required),
    }
}

/// Flatten a schema back into its editable variable list.
///
/// An absent schema, or one without `properties`, yields an empty list.
/// A variable is required iff its name is listed in `required`.
pub fn schema_to_variables(schema: Option<&ObjectSchema>) -> Vec<SchemaVariable> {
    let Some(schema) = schema else {
        return Vec::new();
    };
    let Some(properties) = &schema.properties else {
        return Vec::new();
    };

    properties
        .iter()
        .map(|(name, prop)| SchemaVariable {
            name: name.clone(),
            var_type: prop.prop_type,
            description: prop.description.clone(),
            required: schema.is_required(name),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject variable lists that would not survive a schema round trip.
///
/// Every name must be a placeholder identifier and appear only once.
pub fn validate_variables(variables: &[SchemaVariable]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(variables.len());
    for (index, variable) in variables.iter().enumerate() {
        if variable.name.is_empty() {
            return Err(CoreError::Validation(format!(
                "Variable at position {index} must have a name"
            )));
        }
        if !is_placeholder_identifier(&variable.name) {
            return Err(CoreError::Validation(format!(
                "Variable name '{}' may only contain letters, digits and underscores",
                variable.name
            )));
        }
        if !seen.insert(variable.name.as_str()) {
            return Err(CoreError::Validation(format!(
                "Duplicate variable name '{}'",
                variable.name
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Reconciliation with prompts
// ---------------------------------------------------------------------------

/// Variables declared by `schema`, followed by a default variable for each
/// placeholder in `prompt` the schema does not cover.
///
/// Defaults are required strings with no description.
pub fn merge_with_placeholders(schema: Option<&ObjectSchema>, prompt: &str) -> Vec<SchemaVariable> {
    let mut variables = schema_to_variables(schema);
    let known: HashSet<String> = variables.iter().map(|v| v.name.clone()).collect();

    variables.extend(
        extract_placeholders(prompt)
            .into_iter()
            .filter(|name| !known.contains(name))
            .map(|name| SchemaVariable::new(name, VariableType::String)),
    );
    variables
}

/// First suggested name that no existing variable uses yet.
pub fn suggest_variable_name(
    suggestions: &[String],
    variables: &[SchemaVariable],
) -> Option<String> {
    suggestions
        .iter()
        .find(|candidate| !variables.iter().any(|v| &v.name == *candidate))
        .cloned()
}

/// Required schema variables that have no non-empty value in `values`.
pub fn missing_required(
    schema: Option<&ObjectSchema>,
    values: &HashMap<String, String>,
) -> Vec<String> {
    schema_to_variables(schema)
        .into_iter()
        .filter(|v| v.required)
        .filter(|v| values.get(&v.name).map_or(true, |value| value.is_empty()))
        .map(|v| v.name)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn sample_variables() -> Vec<SchemaVariable> {
        vec![
            SchemaVariable::new("a", VariableType::String),
            SchemaVariable::new("b", VariableType::Number)
                .with_description("qty")
                .optional(),
        ]
    }

    // -- variables_to_schema / schema_to_variables --

    #[test]
    fn round_trip_reproduces_variables() {
        let variables = sample_variables();
        let schema = variables_to_schema(&variables);
        assert_eq!(schema_to_variables(Some(&schema)), variables);
    }

    #[test]
    fn round_trip_survives_json() {
        let variables = sample_variables();
        let encoded = serde_json::to_value(variables_to_schema(&variables)).unwrap();
        let decoded = ObjectSchema::from_value(&encoded).unwrap();
        assert_eq!(schema_to_variables(decoded.as_ref()), variables);
    }

    #[test]
    fn empty_description_is_kept_through_json() {
        let variables = vec![SchemaVariable::new("a", VariableType::String).with_description("")];
        let encoded = serde_json::to_value(variables_to_schema(&variables)).unwrap();
        assert_eq!(encoded["properties"]["a"]["description"], "");

        let decoded = ObjectSchema::from_value(&encoded).unwrap();
        assert_eq!(schema_to_variables(decoded.as_ref()), variables);
    }

    #[test]
    fn schema_json_shape() {
        let schema = variables_to_schema(&sample_variables());
        let encoded = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            encoded,
            json!({
                "type": "object",
                "properties": {
                    "a": { "type": "string" },
                    "b": { "type": "number", "description": "qty" },
                },
                "required": ["a"],
            })
        );
    }

    #[test]
    fn required_key_omitted_when_nothing_required() {
        let schema =
            variables_to_schema(&[SchemaVariable::new("x", VariableType::String).optional()]);
        assert!(schema.required.is_none());

        let encoded = serde_json::to_value(&schema).unwrap();
        assert!(encoded.get("required").is_none());
    }

    #[test]
    fn property_order_follows_variable_order() {
        let variables = vec![
            SchemaVariable::new("zulu", VariableType::String),
            SchemaVariable::new("alpha", VariableType::Boolean),
            SchemaVariable::new("mike", VariableType::Array),
        ];
        let names: Vec<String> = schema_to_variables(Some(&variables_to_schema(&variables)))
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["zulu", "alpha", "mike"]);
    }

    #[test]
    fn duplicate_names_last_write_wins() {
        let variables = vec![
            SchemaVariable::new("dup", VariableType::String),
            SchemaVariable::new("other", VariableType::Number),
            SchemaVariable::new("dup", VariableType::Boolean)
                .with_description("second")
                .optional(),
        ];
        let schema = variables_to_schema(&variables);
        let properties = schema.properties.as_ref().unwrap();

        assert_eq!(properties.len(), 2);
        assert_eq!(properties.get_index(0).unwrap().0, "dup");
        assert_eq!(properties["dup"].prop_type, VariableType::Boolean);
        assert_eq!(properties["dup"].description.as_deref(), Some("second"));
        assert_eq!(schema.required, Some(vec!["other".to_string()]));
    }

    #[test]
    fn absent_schema_yields_no_variables() {
        assert!(schema_to_variables(None).is_empty());
    }

    #[test]
    fn schema_without_properties_yields_no_variables() {
        let schema = ObjectSchema::from_value(&json!({ "type": "object" }))
            .unwrap()
            .unwrap();
        assert!(schema_to_variables(Some(&schema)).is_empty());
    }

    #[test]
    fn missing_required_list_means_all_optional() {
        let schema = ObjectSchema::from_value(&json!({
            "type": "object",
            "properties": {
                "has_violations": { "type": "boolean" },
                "categories": { "type": "array" },
            },
        }))
        .unwrap();
        let variables = schema_to_variables(schema.as_ref());
        assert_eq!(variables.len(), 2);
        assert!(variables.iter().all(|v| !v.required));
    }

    // -- ObjectSchema::from_value --

    #[test]
    fn null_decodes_to_none() {
        assert!(ObjectSchema::from_value(&serde_json::Value::Null)
            .unwrap()
            .is_none());
    }

    #[test]
    fn unknown_type_tag_rejected() {
        let err = ObjectSchema::from_value(&json!({
            "type": "object",
            "properties": { "when": { "type": "date" } },
        }))
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn non_object_schema_rejected() {
        let err = ObjectSchema::from_value(&json!({ "type": "array" })).unwrap_err();
        assert!(err.to_string().contains("Invalid schema"));
    }

    #[test]
    fn variable_defaults_when_decoding() {
        let variable: SchemaVariable = serde_json::from_value(json!({ "name": "topic" })).unwrap();
        assert_eq!(variable, SchemaVariable::new("topic", VariableType::String));
    }

    // -- validate_variables --

    #[test]
    fn unique_variables_pass() {
        assert!(validate_variables(&sample_variables()).is_ok());
    }

    #[test]
    fn empty_name_rejected() {
        let err = validate_variables(&[SchemaVariable::new("", VariableType::String)]).unwrap_err();
        assert!(err.to_string().contains("must have a name"));
    }

    #[test]
    fn non_identifier_name_rejected() {
        let err = validate_variables(&[SchemaVariable::new("first name", VariableType::String)])
            .unwrap_err();
        assert!(err.to_string().contains("letters, digits and underscores"));
    }

    #[test]
    fn duplicate_name_rejected() {
        let err = validate_variables(&[
            SchemaVariable::new("x", VariableType::String),
            SchemaVariable::new("x", VariableType::Number),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate variable name 'x'"));
    }

    // -- merge_with_placeholders --

    #[test]
    fn merge_appends_undeclared_placeholders() {
        let schema = variables_to_schema(&[SchemaVariable::new("content", VariableType::String)
            .with_description("Content to summarize")]);
        let merged = merge_with_placeholders(Some(&schema), "Summarize {content} in {language}");

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].description.as_deref(), Some("Content to summarize"));
        assert_eq!(merged[1], SchemaVariable::new("language", VariableType::String));
    }

    #[test]
    fn merge_without_schema_uses_placeholders_only() {
        let merged = merge_with_placeholders(None, "{a} {b} {a}");
        let names: Vec<&str> = merged.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    // -- suggest_variable_name --

    #[test]
    fn suggests_first_unused_name() {
        let suggestions = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let existing = vec![SchemaVariable::new("a", VariableType::String)];
        assert_eq!(
            suggest_variable_name(&suggestions, &existing),
            Some("b".to_string())
        );
    }

    #[test]
    fn no_suggestion_when_all_used() {
        let suggestions = vec!["a".to_string()];
        let existing = vec![SchemaVariable::new("a", VariableType::String)];
        assert_eq!(suggest_variable_name(&suggestions, &existing), None);
    }

    // -- missing_required --

    #[test]
    fn reports_required_without_values() {
        let schema = variables_to_schema(&sample_variables());
        let mut values = HashMap::new();
        assert_eq!(missing_required(Some(&schema), &values), vec!["a"]);

        values.insert("a".to_string(), String::new());
        assert_eq!(missing_required(Some(&schema), &values), vec!["a"]);

        values.insert("a".to_string(), "filled".to_string());
        assert!(missing_required(Some(&schema), &values).is_empty());
    }
}
