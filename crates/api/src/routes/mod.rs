pub mod health;
pub mod models;
pub mod placeholders;
pub mod playground;
pub mod prompts;
pub mod schemas;
pub mod templates;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /templates                                       list, create
/// /templates/{id}                                  get
/// /templates/{id}/variables                        declared + detected variables
/// /templates/{id}/diff/{other_id}                  version diff
/// /templates/{id}/usage                            prompt instance usage
/// /templates/name/{name}                           all versions, newest first
/// /templates/name/{name}/latest                    latest version
///
/// /prompts                                         list (?search, ?environment)
/// /prompts/{id}                                    get
///
/// /models                                          list models
/// /models/providers?search=                        provider summaries
/// /models/configs                                  list configs
///
/// /placeholders/extract                            extract placeholder names (POST)
/// /placeholders/render                             render a template (POST)
///
/// /schemas/from-variables                          variable list -> schema (POST)
/// /schemas/to-variables                            schema -> variable list (POST)
/// /schemas/suggest-name                            next unused variable name (POST)
///
/// /playground/run                                  simulated LLM run (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/templates", templates::router())
        .nest("/prompts", prompts::router())
        .nest("/models", models::router())
        .nest("/placeholders", placeholders::router())
        .nest("/schemas", schemas::router())
        .nest("/playground", playground::router())
}
