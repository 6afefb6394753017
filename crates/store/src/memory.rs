//! In-process template store backed by vectors behind an async `RwLock`.
//!
//! Used for local development (seeded with [`crate::fixtures`]) and tests.
//! Nothing is persisted; data lives as long as the store does.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use promptbook_core::catalog::{LlmConfig, LlmModel, LlmProvider};
use promptbook_core::prompt_instance::PromptInstance;
use promptbook_core::template::{latest_version, NewTemplate, Template};
use promptbook_core::types::EntityId;

use crate::fixtures::Seed;
use crate::{StoreResult, TemplateStore};

/// Template store holding everything in memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Seed>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the given records.
    pub fn from_seed(seed: Seed) -> Self {
        Self {
            inner: RwLock::new(seed),
        }
    }

    /// A store pre-populated with the bundled demo data.
    pub fn with_fixtures() -> Self {
        Self::from_seed(crate::fixtures::seed())
    }
}

#[async_trait]
impl TemplateStore for MemoryStore {
    async fn list_templates(&self) -> StoreResult<Vec<Template>> {
        Ok(self.inner.read().await.templates.clone())
    }

    async fn get_template(&self, id: EntityId) -> StoreResult<Option<Template>> {
        let inner = self.inner.read().await;
        Ok(inner.templates.iter().find(|t| t.id == id).cloned())
    }

    async fn create_template(&self, input: NewTemplate) -> StoreResult<Template> {
        // Version allocation and insert happen under one write lock.
        let mut inner = self.inner.write().await;
        let version = latest_version(&inner.templates, &input.name).unwrap_or(0) + 1;
        let template = Template::from_new(input, version, Utc::now());
        inner.templates.push(template.clone());

        tracing::debug!(
            template_id = %template.id,
            name = %template.name,
            version = template.version,
            "Template stored in memory"
        );
        Ok(template)
    }

    async fn list_versions(&self, name: &str) -> StoreResult<Vec<Template>> {
        let inner = self.inner.read().await;
        let mut versions: Vec<Template> = inner
            .templates
            .iter()
            .filter(|t| t.name == name)
            .cloned()
            .collect();
        versions.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(versions)
    }

    async fn get_latest(&self, name: &str) -> StoreResult<Option<Template>> {
        let inner = self.inner.read().await;
        Ok(inner
            .templates
            .iter()
            .filter(|t| t.name == name)
            .max_by_key(|t| t.version)
            .cloned())
    }

    async fn list_prompts(&self) -> StoreResult<Vec<PromptInstance>> {
        Ok(self.inner.read().await.prompts.clone())
    }

    async fn get_prompt(&self, id: EntityId) -> StoreResult<Option<PromptInstance>> {
        let inner = self.inner.read().await;
        Ok(inner.prompts.iter().find(|p| p.id == id).cloned())
    }

    async fn list_providers(&self) -> StoreResult<Vec<LlmProvider>> {
        Ok(self.inner.read().await.providers.clone())
    }

    async fn list_models(&self) -> StoreResult<Vec<LlmModel>> {
        Ok(self.inner.read().await.models.clone())
    }

    async fn list_configs(&self) -> StoreResult<Vec<LlmConfig>> {
        Ok(self.inner.read().await.configs.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
