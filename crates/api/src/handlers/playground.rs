//! Handler for simulated playground runs.

use std::time::Duration;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use promptbook_core::error::CoreError;
use promptbook_core::playground::{simulate, PlaygroundRun};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /playground/run
// ---------------------------------------------------------------------------

/// Render the submitted prompts and return a canned response.
///
/// Invalid input fails immediately; a valid run is held for
/// `PLAYGROUND_DELAY_MS` to mimic model latency.
pub async fn run(
    State(state): State<AppState>,
    Json(body): Json<PlaygroundRun>,
) -> AppResult<impl IntoResponse> {
    let model = match body.model_id {
        Some(model_id) => Some(
            state
                .store
                .list_models()
                .await?
                .into_iter()
                .find(|m| m.id == model_id)
                .ok_or_else(|| CoreError::not_found("LlmModel", model_id))?,
        ),
        None => None,
    };

    let result = simulate(&body, model.as_ref())?;

    let delay = Duration::from_millis(state.config.playground_delay_ms);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    tracing::info!(
        model = result.model.as_deref().unwrap_or("none"),
        unresolved = result.unresolved.len(),
        "Playground run simulated"
    );

    Ok(Json(DataResponse { data: result }))
}
