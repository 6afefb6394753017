//! Template store backed by a remote promptbook-compatible REST API.
//!
//! Wraps the template, prompt and model endpoints using [`reqwest`].
//! Responses may either be bare JSON or wrapped in a `{ "data": ... }`
//! envelope; both are accepted.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use promptbook_core::catalog::{LlmConfig, LlmModel, LlmProvider};
use promptbook_core::prompt_instance::PromptInstance;
use promptbook_core::template::{NewTemplate, Template};
use promptbook_core::types::EntityId;

use crate::{StoreError, StoreResult, TemplateStore};

/// HTTP client for a remote template store.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: Url,
}

/// Response body, with or without the `data` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

impl HttpStore {
    /// Create a client for the API rooted at `base_url`,
    /// e.g. `http://localhost:8000/api`.
    pub fn new(base_url: &str) -> StoreResult<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> StoreResult<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| StoreError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Append percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> StoreResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> StoreResult<T> {
        let response = self.client.get(self.url(segments)?).send().await?;
        Self::parse_response(response).await
    }

    /// Like [`Self::get`], but a 404 yields `None`.
    async fn get_optional<T: DeserializeOwned>(&self, segments: &[&str]) -> StoreResult<Option<T>> {
        let response = self.client.get(self.url(segments)?).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::parse_response(response).await.map(Some)
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or a
    /// [`StoreError::Api`] holding the status and body text.
    async fn ensure_success(response: reqwest::Response) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> StoreResult<T> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<Envelope<T>>().await?.into_inner())
    }
}

#[async_trait]
impl TemplateStore for HttpStore {
    async fn list_templates(&self) -> StoreResult<Vec<Template>> {
        self.get(&["templates"]).await
    }

    async fn get_template(&self, id: EntityId) -> StoreResult<Option<Template>> {
        self.get_optional(&["templates", &id.to_string()]).await
    }

    async fn create_template(&self, input: NewTemplate) -> StoreResult<Template> {
        let response = self
            .client
            .post(self.url(&["templates"])?)
            .json(&input)
            .send()
            .await?;
        let template: Template = Self::parse_response(response).await?;

        tracing::debug!(
            template_id = %template.id,
            name = %template.name,
            version = template.version,
            "Template created on remote store"
        );
        Ok(template)
    }

    async fn list_versions(&self, name: &str) -> StoreResult<Vec<Template>> {
        let mut versions: Vec<Template> = self
            .get_optional(&["templates", "name", name])
            .await?
            .unwrap_or_default();
        versions.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(versions)
    }

    async fn get_latest(&self, name: &str) -> StoreResult<Option<Template>> {
        self.get_optional(&["templates", "name", name, "latest"]).await
    }

    async fn list_prompts(&self) -> StoreResult<Vec<PromptInstance>> {
        self.get(&["prompts"]).await
    }

    async fn get_prompt(&self, id: EntityId) -> StoreResult<Option<PromptInstance>> {
        self.get_optional(&["prompts", &id.to_string()]).await
    }

    async fn list_providers(&self) -> StoreResult<Vec<LlmProvider>> {
        self.get(&["models", "providers"]).await
    }

    async fn list_models(&self) -> StoreResult<Vec<LlmModel>> {
        self.get(&["models"]).await
    }

    async fn list_configs(&self) -> StoreResult<Vec<LlmConfig>> {
        self.get(&["models", "configs"]).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
