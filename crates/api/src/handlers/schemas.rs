//! Handlers converting between schemas and editable variable lists.

use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use promptbook_core::schema::{
    schema_to_variables, suggest_variable_name, validate_variables, variables_to_schema,
    ObjectSchema, SchemaVariable,
};

use crate::error::AppResult;
use crate::response::DataResponse;

// ---------------------------------------------------------------------------
// API request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct FromVariablesRequest {
    pub variables: Vec<SchemaVariable>,
}

#[derive(Debug, Deserialize)]
pub struct ToVariablesRequest {
    /// Any JSON value; `null` or absent means "no schema".
    #[serde(default)]
    pub schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct SuggestNameRequest {
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub variables: Vec<SchemaVariable>,
}

#[derive(Debug, Serialize)]
pub struct SuggestNameResponse {
    /// `None` once every suggestion is taken.
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// POST /schemas/from-variables
// ---------------------------------------------------------------------------

/// Build a schema from a variable list. Duplicate or malformed names are
/// rejected rather than merged.
pub async fn from_variables(
    Json(body): Json<FromVariablesRequest>,
) -> AppResult<impl IntoResponse> {
    validate_variables(&body.variables)?;
    Ok(Json(DataResponse {
        data: variables_to_schema(&body.variables),
    }))
}

// ---------------------------------------------------------------------------
// POST /schemas/to-variables
// ---------------------------------------------------------------------------

pub async fn to_variables(Json(body): Json<ToVariablesRequest>) -> AppResult<impl IntoResponse> {
    let schema = ObjectSchema::from_value(&body.schema)?;
    Ok(Json(DataResponse {
        data: schema_to_variables(schema.as_ref()),
    }))
}

// ---------------------------------------------------------------------------
// POST /schemas/suggest-name
// ---------------------------------------------------------------------------

/// First suggestion not used by any of `variables`.
pub async fn suggest_name(Json(body): Json<SuggestNameRequest>) -> impl IntoResponse {
    Json(DataResponse {
        data: SuggestNameResponse {
            name: suggest_variable_name(&body.suggestions, &body.variables),
        },
    })
}
