//! Handlers exposing the placeholder engine.
//!
//! Both endpoints are pure: they never touch the template store.

use std::collections::HashMap;

use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use promptbook_core::placeholder::{extract_placeholders, render_template, unresolved_placeholders};
use promptbook_core::schema::{missing_required, ObjectSchema};

use crate::error::AppResult;
use crate::response::DataResponse;

// ---------------------------------------------------------------------------
// API request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub template: String,
    #[serde(default)]
    pub values: HashMap<String, String>,
    /// Input schema to check required values against.
    #[serde(default)]
    pub schema: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub rendered: String,
    /// Placeholders left in `rendered` because no non-empty value was given.
    pub unresolved: Vec<String>,
    /// Required schema variables without a non-empty value.
    pub missing_required: Vec<String>,
}

// ---------------------------------------------------------------------------
// POST /placeholders/extract
// ---------------------------------------------------------------------------

/// Distinct placeholder names in order of first occurrence.
pub async fn extract(Json(body): Json<ExtractRequest>) -> impl IntoResponse {
    Json(DataResponse {
        data: extract_placeholders(&body.text),
    })
}

// ---------------------------------------------------------------------------
// POST /placeholders/render
// ---------------------------------------------------------------------------

/// Substitute values into a template in a single pass.
///
/// Fails only when `schema` is present and malformed.
pub async fn render(Json(body): Json<RenderRequest>) -> AppResult<impl IntoResponse> {
    let schema = match body.schema {
        Some(ref value) => ObjectSchema::from_value(value)?,
        None => None,
    };

    let rendered = render_template(&body.template, &body.values);
    let response = RenderResponse {
        unresolved: unresolved_placeholders(&rendered),
        missing_required: missing_required(schema.as_ref(), &body.values),
        rendered,
    };

    Ok(Json(DataResponse { data: response }))
}
