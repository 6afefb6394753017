//! Simulated playground runs.
//!
//! No model is called: a run renders the prompts and echoes the rendered
//! user prompt back inside a canned response.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::LlmModel;
use crate::error::CoreError;
use crate::placeholder::{render_template, unresolved_placeholders};
use crate::template::validate_user_prompt;
use crate::types::EntityId;

/// Prefix of every simulated response.
pub const SIMULATED_RESPONSE_PREFIX: &str =
    "This is a simulated response from the LLM.\n\nYour rendered prompt was:\n";

/// A playground request: prompts as currently edited plus input values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaygroundRun {
    pub user_prompt: String,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub values: HashMap<String, String>,
    #[serde(default)]
    pub model_id: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaygroundResult {
    pub rendered_user_prompt: String,
    pub rendered_system_prompt: Option<String>,
    /// Placeholders of the user prompt that received no value.
    pub unresolved: Vec<String>,
    /// Label of the selected model, if one was chosen.
    pub model: Option<String>,
    pub response: String,
}

/// Render a run and build its simulated response.
///
/// A selected model must be usable (active, not deprecated).
pub fn simulate(
    run: &PlaygroundRun,
    model: Option<&LlmModel>,
) -> Result<PlaygroundResult, CoreError> {
    validate_user_prompt(&run.user_prompt)?;
    if let Some(model) = model {
        if !model.is_usable() {
            return Err(CoreError::Validation(format!(
                "Model '{}' is inactive or deprecated",
                model.label()
            )));
        }
    }

    let rendered_user_prompt = render_template(&run.user_prompt, &run.values);
    let rendered_system_prompt = run
        .system_prompt
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| render_template(s, &run.values));

    Ok(PlaygroundResult {
        unresolved: unresolved_placeholders(&rendered_user_prompt),
        response: format!("{SIMULATED_RESPONSE_PREFIX}{rendered_user_prompt}"),
        rendered_user_prompt,
        rendered_system_prompt,
        model: model.map(|m| m.label().to_string()),
    })
}
