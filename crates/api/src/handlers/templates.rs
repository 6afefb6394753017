//! Handlers for prompt templates.
//!
//! Templates are append-only: creating a template under an existing name
//! stores the next version. Listing, filtering and sorting happen here on
//! top of whatever the configured store returns.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use promptbook_core::error::CoreError;
use promptbook_core::prompt_instance::usage_stats;
use promptbook_core::template::{
    filter_templates, latest_per_name, sort_templates, validate_new_template, NewTemplate,
    Template, TemplateSort,
};
use promptbook_core::types::EntityId;
use promptbook_core::version_diff;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Search, ordering and grouping parameters for template listings.
#[derive(Debug, Deserialize)]
pub struct TemplateListParams {
    pub search: Option<String>,
    pub sort: Option<TemplateSort>,
    /// Collapse each name to its highest version.
    #[serde(default)]
    pub latest_only: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a template exists, returning the full record.
async fn ensure_template_exists(state: &AppState, id: EntityId) -> AppResult<Template> {
    state
        .store
        .get_template(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Template", id).into())
}

// ---------------------------------------------------------------------------
// GET /templates
// ---------------------------------------------------------------------------

/// List templates, optionally filtered, grouped to the latest version, and sorted.
///
/// Without `sort` the store's order is kept.
pub async fn list_templates(
    State(state): State<AppState>,
    Query(params): Query<TemplateListParams>,
) -> AppResult<impl IntoResponse> {
    let mut templates = state.store.list_templates().await?;
    if params.latest_only {
        templates = latest_per_name(templates);
    }
    if let Some(ref search) = params.search {
        templates = filter_templates(templates, search);
    }
    if let Some(sort) = params.sort {
        sort_templates(&mut templates, sort);
    }

    tracing::debug!(
        count = templates.len(),
        latest_only = params.latest_only,
        "Listed templates"
    );

    Ok(Json(DataResponse { data: templates }))
}

// ---------------------------------------------------------------------------
// POST /templates
// ---------------------------------------------------------------------------

/// Create a template, or the next version of an existing one.
pub async fn create_template(
    State(state): State<AppState>,
    Json(body): Json<NewTemplate>,
) -> AppResult<impl IntoResponse> {
    let input = body.normalized();
    validate_new_template(&input)?;

    let template = state.store.create_template(input).await?;

    tracing::info!(
        template_id = %template.id,
        name = %template.name,
        version = template.version,
        "Template version created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: template })))
}

// ---------------------------------------------------------------------------
// GET /templates/{id}
// ---------------------------------------------------------------------------

pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let template = ensure_template_exists(&state, id).await?;
    Ok(Json(DataResponse { data: template }))
}

// ---------------------------------------------------------------------------
// GET /templates/{id}/variables
// ---------------------------------------------------------------------------

/// Declared input variables followed by placeholders the schema misses.
pub async fn get_template_variables(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let template = ensure_template_exists(&state, id).await?;
    Ok(Json(DataResponse {
        data: template.input_variables(),
    }))
}

// ---------------------------------------------------------------------------
// GET /templates/{id}/diff/{other_id}
// ---------------------------------------------------------------------------

/// Compare two versions of the same template.
pub async fn diff_templates(
    State(state): State<AppState>,
    Path((id, other_id)): Path<(EntityId, EntityId)>,
) -> AppResult<impl IntoResponse> {
    let from = ensure_template_exists(&state, id).await?;
    let to = ensure_template_exists(&state, other_id).await?;

    let diff = version_diff::diff_templates(&from, &to)?;

    Ok(Json(DataResponse { data: diff }))
}

// ---------------------------------------------------------------------------
// GET /templates/{id}/usage
// ---------------------------------------------------------------------------

/// Summarize the prompt instances built from a template version.
pub async fn get_template_usage(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    ensure_template_exists(&state, id).await?;
    let prompts = state.store.list_prompts().await?;

    Ok(Json(DataResponse {
        data: usage_stats(&prompts, id),
    }))
}

// ---------------------------------------------------------------------------
// GET /templates/name/{name}
// ---------------------------------------------------------------------------

/// All versions of a template name, newest first.
pub async fn list_versions(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let versions = state.store.list_versions(&name).await?;
    if versions.is_empty() {
        return Err(CoreError::not_found("Template", name).into());
    }

    tracing::debug!(name = %name, count = versions.len(), "Listed template versions");

    Ok(Json(DataResponse { data: versions }))
}

// ---------------------------------------------------------------------------
// GET /templates/name/{name}/latest
// ---------------------------------------------------------------------------

pub async fn get_latest_version(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let template = state
        .store
        .get_latest(&name)
        .await?
        .ok_or_else(|| CoreError::not_found("Template", &name))?;

    Ok(Json(DataResponse { data: template }))
}
