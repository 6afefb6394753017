//! HTTP-level integration tests for `/playground/run`.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::StatusCode;
use common::{
    body_json, build_app_with_config, build_test_app, empty_app, post_json, test_config,
};
use promptbook_store::{MemoryStore, TemplateStore};
use serde_json::json;

#[tokio::test]
async fn run_echoes_rendered_prompt() {
    let response = post_json(
        empty_app(),
        "/api/v1/playground/run",
        json!({
            "user_prompt": "Translate {text} to {language}",
            "system_prompt": "You translate for {audience}.",
            "values": { "text": "hello", "audience": "kids" }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["rendered_user_prompt"], "Translate hello to {language}");
    assert_eq!(data["rendered_system_prompt"], "You translate for kids.");
    assert_eq!(data["unresolved"], json!(["language"]));
    assert!(data["model"].is_null());
    assert_eq!(
        data["response"],
        "This is a simulated response from the LLM.\n\nYour rendered prompt was:\nTranslate hello to {language}"
    );
}

#[tokio::test]
async fn run_with_blank_prompt_rejected() {
    let response =
        post_json(empty_app(), "/api/v1/playground/run", json!({ "user_prompt": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn run_with_active_model_names_it() {
    let store: Arc<dyn TemplateStore> = Arc::new(MemoryStore::with_fixtures());
    let models = store.list_models().await.unwrap();
    let gpt4 = models.iter().find(|m| m.api_model_name == "gpt-4").unwrap();
    let app = build_test_app(Arc::clone(&store));

    let json = body_json(
        post_json(
            app,
            "/api/v1/playground/run",
            json!({ "user_prompt": "Hi", "model_id": gpt4.id }),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["model"], "GPT-4");
}

#[tokio::test]
async fn run_with_deprecated_model_rejected() {
    let store: Arc<dyn TemplateStore> = Arc::new(MemoryStore::with_fixtures());
    let models = store.list_models().await.unwrap();
    let claude21 = models.iter().find(|m| m.api_model_name == "claude-2.1").unwrap();
    let app = build_test_app(Arc::clone(&store));

    let response = post_json(
        app,
        "/api/v1/playground/run",
        json!({ "user_prompt": "Hi", "model_id": claude21.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn run_with_unknown_model_returns_404() {
    let response = post_json(
        empty_app(),
        "/api/v1/playground/run",
        json!({ "user_prompt": "Hi", "model_id": uuid::Uuid::new_v4() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn run_waits_for_configured_delay() {
    let mut config = test_config();
    config.playground_delay_ms = 50;
    let app = build_app_with_config(Arc::new(MemoryStore::new()), config);

    let started = Instant::now();
    let response = post_json(app, "/api/v1/playground/run", json!({ "user_prompt": "Hi" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(started.elapsed() >= Duration::from_millis(50));
}
