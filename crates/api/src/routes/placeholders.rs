//! Route definitions for the placeholder engine.
//!
//! ```text
//! POST   /extract                            extract
//! POST   /render                             render
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::placeholders;
use crate::state::AppState;

/// Placeholder routes -- mounted at `/placeholders`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/extract", post(placeholders::extract))
        .route("/render", post(placeholders::render))
}
