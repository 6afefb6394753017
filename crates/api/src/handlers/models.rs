//! Handlers for the LLM model catalog (read-only).

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use promptbook_core::catalog::provider_summaries;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProviderListParams {
    /// Substring of the provider name or of one of its model names.
    pub search: Option<String>,
}

/// Providers with their usable and total model counts.
pub async fn list_providers(
    State(state): State<AppState>,
    Query(params): Query<ProviderListParams>,
) -> AppResult<impl IntoResponse> {
    let providers = state.store.list_providers().await?;
    let models = state.store.list_models().await?;
    let summaries = provider_summaries(
        providers,
        &models,
        params.search.as_deref().unwrap_or_default(),
    );

    tracing::debug!(count = summaries.len(), "Listed providers");

    Ok(Json(DataResponse { data: summaries }))
}

pub async fn list_models(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let models = state.store.list_models().await?;
    Ok(Json(DataResponse { data: models }))
}

pub async fn list_configs(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let configs = state.store.list_configs().await?;
    Ok(Json(DataResponse { data: configs }))
}
