//! Route definitions for the LLM model catalog.
//!
//! ```text
//! GET    /                                   list_models
//! GET    /providers?search=                  list_providers
//! GET    /configs                            list_configs
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::models;
use crate::state::AppState;

/// Model catalog routes -- mounted at `/models`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(models::list_models))
        .route("/providers", get(models::list_providers))
        .route("/configs", get(models::list_configs))
}
