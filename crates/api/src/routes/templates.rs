//! Route definitions for prompt templates.
//!
//! ```text
//! GET    /                                   list_templates
//! POST   /                                   create_template
//! GET    /{id}                               get_template
//! GET    /{id}/variables                     get_template_variables
//! GET    /{id}/diff/{other_id}               diff_templates
//! GET    /{id}/usage                         get_template_usage
//! GET    /name/{name}                        list_versions
//! GET    /name/{name}/latest                 get_latest_version
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::templates;
use crate::state::AppState;

/// Template routes -- mounted at `/templates`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(templates::list_templates).post(templates::create_template),
        )
        .route("/{id}", get(templates::get_template))
        .route("/{id}/variables", get(templates::get_template_variables))
        .route("/{id}/diff/{other_id}", get(templates::diff_templates))
        .route("/{id}/usage", get(templates::get_template_usage))
        .route("/name/{name}", get(templates::list_versions))
        .route("/name/{name}/latest", get(templates::get_latest_version))
}
