//! Route definitions for prompt instances.
//!
//! ```text
//! GET    /                                   list_prompts
//! GET    /{id}                               get_prompt
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::prompts;
use crate::state::AppState;

/// Prompt instance routes -- mounted at `/prompts`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(prompts::list_prompts))
        .route("/{id}", get(prompts::get_prompt))
}
