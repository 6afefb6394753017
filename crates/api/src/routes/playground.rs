use axum::routing::post;
use axum::Router;

use crate::handlers::playground;
use crate::state::AppState;

/// Playground routes -- mounted at `/playground`.
pub fn router() -> Router<AppState> {
    Router::new().route("/run", post(playground::run))
}
