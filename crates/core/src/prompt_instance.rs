//! Rendered prompt instances deployed to an environment.
//!
//! An instance pins a template version together with the input values used
//! to render it. Instances are read-only in this service.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Timestamp};

/// Deployment environment of a prompt instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    Staging,
    Development,
}

/// A template version rendered with concrete input values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptInstance {
    pub id: EntityId,
    pub display_name: String,
    pub template_id: EntityId,
    pub template_name: String,
    pub template_version: i32,
    pub environment: Environment,
    pub is_active: bool,
    pub category: String,
    pub created_at: Timestamp,
    pub response_count: i64,
    /// Percentage of successful responses (0.0 - 100.0).
    pub success_rate: f64,
    #[serde(default)]
    pub system_prompt: Option<String>,
    pub user_prompt: String,
    #[serde(default)]
    pub input_values: Option<HashMap<String, String>>,
    pub rendered_user_prompt: String,
    pub llm_model: String,
    pub llm_provider: String,
}

/// Keep instances whose display name or template name contains `query`
/// (case-insensitive), optionally restricted to one environment.
pub fn filter_prompts(
    prompts: Vec<PromptInstance>,
    query: &str,
    environment: Option<Environment>,
) -> Vec<PromptInstance> {
    let needle = query.trim().to_lowercase();
    prompts
        .into_iter()
        .filter(|p| environment.map_or(true, |env| env == p.environment))
        .filter(|p| {
            needle.is_empty()
                || p.display_name.to_lowercase().contains(&needle)
                || p.template_name.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Aggregate usage of one template version across its prompt instances.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateUsage {
    pub prompt_count: usize,
    pub active_prompts: usize,
    pub total_responses: i64,
    /// Distinct environments, in order of first appearance.
    pub environments: Vec<Environment>,
}

/// Instances rendered from the template with id `template_id`.
pub fn prompts_for_template(
    prompts: &[PromptInstance],
    template_id: EntityId,
) -> Vec<&PromptInstance> {
    prompts
        .iter()
        .filter(|p| p.template_id == template_id)
        .collect()
}

pub fn usage_stats(prompts: &[PromptInstance], template_id: EntityId) -> TemplateUsage {
    let mut usage = TemplateUsage::default();
    for prompt in prompts_for_template(prompts, template_id) {
        usage.prompt_count += 1;
        if prompt.is_active {
            usage.active_prompts += 1;
        }
        usage.total_responses += prompt.response_count;
        if !usage.environments.contains(&prompt.environment) {
            usage.environments.push(prompt.environment);
        }
    }
    usage
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn instance(
        display_name: &str,
        template_name: &str,
        environment: Environment,
    ) -> PromptInstance {
        PromptInstance {
            id: Uuid::new_v4(),
            display_name: display_name.to_string(),
            template_id: Uuid::new_v4(),
            template_name: template_name.to_string(),
            template_version: 1,
            environment,
            is_active: true,
            category: "general".to_string(),
            created_at: Utc::now(),
            response_count: 0,
            success_rate: 100.0,
            system_prompt: None,
            user_prompt: "x".to_string(),
            input_values: None,
            rendered_user_prompt: "x".to_string(),
            llm_model: "gpt-4".to_string(),
            llm_provider: "openai".to_string(),
        }
    }

    fn sample() -> Vec<PromptInstance> {
        vec![
            instance("Article Summarizer - Production", "summarizer", Environment::Production),
            instance("Code Review Bot", "code-reviewer", Environment::Staging),
            instance("Email Drafts", "email-writer", Environment::Development),
        ]
    }

    #[test]
    fn blank_query_and_no_environment_keeps_all() {
        assert_eq!(filter_prompts(sample(), "", None).len(), 3);
    }

    #[test]
    fn query_matches_display_or_template_name() {
        assert_eq!(filter_prompts(sample(), "ARTICLE", None).len(), 1);
        assert_eq!(filter_prompts(sample(), "reviewer", None).len(), 1);
    }

    #[test]
    fn usage_stats_aggregate_instances_of_one_template() {
        let template_id = Uuid::new_v4();
        let mut prompts = sample();
        for (prompt, responses) in prompts.iter_mut().zip([10, 5, 7]) {
            prompt.response_count = responses;
        }
        prompts[0].template_id = template_id;
        prompts[1].template_id = template_id;
        prompts[1].is_active = false;

        let usage = usage_stats(&prompts, template_id);
        assert_eq!(usage.prompt_count, 2);
        assert_eq!(usage.active_prompts, 1);
        assert_eq!(usage.total_responses, 15);
        assert_eq!(
            usage.environments,
            vec![Environment::Production, Environment::Staging]
        );
    }

    #[test]
    fn usage_of_unused_template_is_empty() {
        assert_eq!(usage_stats(&sample(), Uuid::new_v4()), TemplateUsage::default());
    }

    #[test]
    fn environment_filter_is_exact() {
        let staging = filter_prompts(sample(), "", Some(Environment::Staging));
        assert_eq!(staging.len(), 1);
        assert_eq!(staging[0].template_name, "code-reviewer");
        assert!(filter_prompts(sample(), "email", Some(Environment::Production)).is_empty());
    }
}
