//! Handlers for prompt instances (read-only).

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use promptbook_core::error::CoreError;
use promptbook_core::prompt_instance::{filter_prompts, Environment};
use promptbook_core::types::EntityId;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Search parameters for prompt instance listings.
#[derive(Debug, Deserialize)]
pub struct PromptListParams {
    /// Substring of the display name or template name.
    pub search: Option<String>,
    pub environment: Option<Environment>,
}

/// List prompt instances, optionally filtered by text and environment.
pub async fn list_prompts(
    State(state): State<AppState>,
    Query(params): Query<PromptListParams>,
) -> AppResult<impl IntoResponse> {
    let prompts = state.store.list_prompts().await?;
    let prompts = filter_prompts(
        prompts,
        params.search.as_deref().unwrap_or_default(),
        params.environment,
    );

    tracing::debug!(count = prompts.len(), "Listed prompt instances");

    Ok(Json(DataResponse { data: prompts }))
}

pub async fn get_prompt(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let prompt = state
        .store
        .get_prompt(id)
        .await?
        .ok_or_else(|| CoreError::not_found("PromptInstance", id))?;

    Ok(Json(DataResponse { data: prompt }))
}
