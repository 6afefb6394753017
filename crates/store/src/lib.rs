//! Template store capability and its backends.
//!
//! Callers depend on [`TemplateStore`] only. The concrete backend
//! ([`MemoryStore`] or [`HttpStore`]) is chosen once at startup and injected
//! as an `Arc<dyn TemplateStore>`.

pub mod fixtures;
pub mod http;
pub mod memory;

use async_trait::async_trait;
use promptbook_core::catalog::{LlmConfig, LlmModel, LlmProvider};
use promptbook_core::error::CoreError;
use promptbook_core::prompt_instance::PromptInstance;
use promptbook_core::template::{NewTemplate, Template};
use promptbook_core::types::EntityId;

pub use http::HttpStore;
pub use memory::MemoryStore;

/// Errors from a template store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain-level error raised by the store itself.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The HTTP request to a remote store failed (network, DNS, TLS, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote store answered with a non-2xx status.
    #[error("Template store API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The configured base URL cannot address the store's endpoints.
    #[error("Invalid template store URL: {0}")]
    InvalidUrl(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Access to templates, rendered prompt instances, and the model catalog.
///
/// Templates are append-only: there is no update or delete. Creating a
/// template whose name already exists records the next version of it.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Every template version, in storage order.
    async fn list_templates(&self) -> StoreResult<Vec<Template>>;

    async fn get_template(&self, id: EntityId) -> StoreResult<Option<Template>>;

    /// Record `input` as version 1 of a new name, or as `latest + 1`.
    async fn create_template(&self, input: NewTemplate) -> StoreResult<Template>;

    /// All versions of `name`, newest first. Empty if the name is unknown.
    async fn list_versions(&self, name: &str) -> StoreResult<Vec<Template>>;

    /// The highest version of `name`.
    async fn get_latest(&self, name: &str) -> StoreResult<Option<Template>>;

    async fn list_prompts(&self) -> StoreResult<Vec<PromptInstance>>;

    async fn get_prompt(&self, id: EntityId) -> StoreResult<Option<PromptInstance>>;

    async fn list_providers(&self) -> StoreResult<Vec<LlmProvider>>;

    async fn list_models(&self) -> StoreResult<Vec<LlmModel>>;

    async fn list_configs(&self) -> StoreResult<Vec<LlmConfig>>;
}
