//! Route definitions for schema conversion.
//!
//! ```text
//! POST   /from-variables                     from_variables
//! POST   /to-variables                       to_variables
//! POST   /suggest-name                       suggest_name
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::schemas;
use crate::state::AppState;

/// Schema routes -- mounted at `/schemas`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/from-variables", post(schemas::from_variables))
        .route("/to-variables", post(schemas::to_variables))
        .route("/suggest-name", post(schemas::suggest_name))
}
