//! Read-only catalog of LLM providers, models and saved configurations.

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmProvider {
    pub id: EntityId,
    pub name: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmModel {
    pub id: EntityId,
    pub provider_id: EntityId,
    /// Identifier sent to the provider's API, e.g. `gpt-4-turbo`.
    pub api_model_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub is_active: bool,
    pub is_deprecated: bool,
}

impl LlmModel {
    /// Human-facing label, falling back to the API name.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.api_model_name)
    }

    /// Active and not deprecated.
    pub fn is_usable(&self) -> bool {
        self.is_active && !self.is_deprecated
    }
}

/// Named sampling settings for a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    pub id: EntityId,
    pub model_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub extra_settings: Option<serde_json::Map<String, serde_json::Value>>,
    pub is_active: bool,
}

/// A provider with counts over its models.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderSummary {
    #[serde(flatten)]
    pub provider: LlmProvider,
    /// Models that are active and not deprecated.
    pub active_models: usize,
    pub total_models: usize,
}

/// Summarize each provider's models, keeping providers that match `query`.
///
/// A provider matches when its name, or the label or API name of one of its
/// models, contains the query (case-insensitive). A blank query keeps all.
pub fn provider_summaries(
    providers: Vec<LlmProvider>,
    models: &[LlmModel],
    query: &str,
) -> Vec<ProviderSummary> {
    let needle = query.trim().to_lowercase();
    providers
        .into_iter()
        .filter_map(|provider| {
            let owned: Vec<&LlmModel> = models
                .iter()
                .filter(|m| m.provider_id == provider.id)
                .collect();

            let matches = needle.is_empty()
                || provider.name.to_lowercase().contains(&needle)
                || owned.iter().any(|m| {
                    m.label().to_lowercase().contains(&needle)
                        || m.api_model_name.to_lowercase().contains(&needle)
                });
            if !matches {
                return None;
            }

            Some(ProviderSummary {
                active_models: owned.iter().filter(|m| m.is_usable()).count(),
                total_models: owned.len(),
                provider,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn model(display_name: Option<&str>, is_active: bool, is_deprecated: bool) -> LlmModel {
        LlmModel {
            id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            api_model_name: "claude-2.1".to_string(),
            display_name: display_name.map(str::to_string),
            is_active,
            is_deprecated,
        }
    }

    #[test]
    fn label_prefers_display_name() {
        assert_eq!(model(Some("Claude 2.1"), true, false).label(), "Claude 2.1");
        assert_eq!(model(None, true, false).label(), "claude-2.1");
    }

    #[test]
    fn deprecated_or_inactive_models_are_not_usable() {
        assert!(model(None, true, false).is_usable());
        assert!(!model(None, false, true).is_usable());
        assert!(!model(None, true, true).is_usable());
    }

    // -- provider_summaries --

    fn provider(name: &str) -> LlmProvider {
        LlmProvider {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    fn owned_model(
        provider: &LlmProvider,
        api_name: &str,
        label: &str,
        is_active: bool,
        is_deprecated: bool,
    ) -> LlmModel {
        LlmModel {
            id: Uuid::new_v4(),
            provider_id: provider.id,
            api_model_name: api_name.to_string(),
            display_name: Some(label.to_string()),
            is_active,
            is_deprecated,
        }
    }

    fn catalog() -> (Vec<LlmProvider>, Vec<LlmModel>) {
        let anthropic = provider("anthropic");
        let google = provider("google");
        let models = vec![
            owned_model(&anthropic, "claude-3-opus", "Claude 3 Opus", true, false),
            owned_model(&anthropic, "claude-2.1", "Claude 2.1", false, true),
            owned_model(&google, "gemini-pro", "Gemini Pro", true, false),
            owned_model(&google, "gemini-ultra", "Gemini Ultra", false, false),
        ];
        (vec![anthropic, google], models)
    }

    #[test]
    fn summaries_count_usable_and_total_models() {
        let (providers, models) = catalog();
        let summaries = provider_summaries(providers, &models, "");
        let counts: Vec<(&str, usize, usize)> = summaries
            .iter()
            .map(|s| (s.provider.name.as_str(), s.active_models, s.total_models))
            .collect();
        assert_eq!(counts, vec![("anthropic", 1, 2), ("google", 1, 2)]);
    }

    #[test]
    fn provider_without_models_has_zero_counts() {
        let summaries = provider_summaries(vec![provider("mistral")], &[], "  ");
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].active_models, 0);
        assert_eq!(summaries[0].total_models, 0);
    }

    #[test]
    fn search_matches_provider_or_model_names() {
        let (providers, models) = catalog();
        let by_provider = provider_summaries(providers.clone(), &models, "ANTHRO");
        assert_eq!(by_provider.len(), 1);
        assert_eq!(by_provider[0].provider.name, "anthropic");

        let by_label = provider_summaries(providers.clone(), &models, "ultra");
        assert_eq!(by_label.len(), 1);
        assert_eq!(by_label[0].provider.name, "google");
        assert_eq!(by_label[0].total_models, 2);

        assert!(provider_summaries(providers, &models, "llama").is_empty());
    }

    #[test]
    fn summary_serializes_provider_fields_inline() {
        let (providers, models) = catalog();
        let summary = provider_summaries(providers, &models, "google").remove(0);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["name"], "google");
        assert_eq!(json["active_models"], 1);
        assert_eq!(json["total_models"], 2);
        assert!(json.get("provider").is_none());
    }
}
