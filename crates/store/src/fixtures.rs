//! Demo data for the in-memory store.
//!
//! Schemas are built with the engine's [`variables_to_schema`] and prompt
//! instances are rendered with [`render_template`], so the fixtures always
//! agree with the engine's own conventions.

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use promptbook_core::catalog::{LlmConfig, LlmModel, LlmProvider};
use promptbook_core::placeholder::render_template;
use promptbook_core::prompt_instance::{Environment, PromptInstance};
use promptbook_core::schema::{variables_to_schema, SchemaVariable, VariableType};
use promptbook_core::template::{OutputFormat, Template};
use promptbook_core::types::Timestamp;

/// Records a [`crate::MemoryStore`] starts with.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub templates: Vec<Template>,
    pub prompts: Vec<PromptInstance>,
    pub providers: Vec<LlmProvider>,
    pub models: Vec<LlmModel>,
    pub configs: Vec<LlmConfig>,
}

/// Build the bundled demo data set.
pub fn seed() -> Seed {
    let providers = vec![provider("openai", 1), provider("anthropic", 1), provider("google", 2)];
    let [openai, anthropic, google] = [0, 1, 2].map(|i| providers[i].id);

    let models = vec![
        model(openai, "gpt-4-turbo", "GPT-4 Turbo", true, false),
        model(openai, "gpt-4", "GPT-4", true, false),
        model(openai, "gpt-3.5-turbo", "GPT-3.5 Turbo", true, false),
        model(anthropic, "claude-3-opus", "Claude 3 Opus", true, false),
        model(anthropic, "claude-3-sonnet", "Claude 3 Sonnet", true, false),
        model(anthropic, "claude-2.1", "Claude 2.1", false, true),
        model(google, "gemini-pro", "Gemini Pro", true, false),
        model(google, "gemini-ultra", "Gemini Ultra", false, false),
    ];

    let configs = vec![
        config(&models[0], "precise", Some(0.2)),
        config(&models[0], "creative", Some(0.9)),
        config(&models[2], "fast-default", None),
        config(&models[3], "long-form", Some(0.7)),
        config(&models[4], "moderation", Some(0.0)),
        config(&models[6], "balanced", Some(0.5)),
    ];

    let templates = templates();
    let prompts = prompts(&templates);

    Seed {
        templates,
        prompts,
        providers,
        models,
        configs,
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

fn templates() -> Vec<Template> {
    use VariableType::{Array, Boolean, Number, String as Text};

    let var = |name: &str, description: &str| {
        SchemaVariable::new(name, Text).with_description(description)
    };

    let mut moderator_v2 = template(
        TemplateSpec {
            name: "content-moderator",
            version: 2,
            system: Some("You are a content moderation assistant. Analyze content for policy violations including hate speech, harassment, explicit content, and spam. Respond with a structured analysis."),
            user: "Analyze the following user-generated content for policy violations. Return a JSON object with violation categories and severity levels.\n\nContent to analyze:\n{content}",
            description: "Analyze user-generated content for policy violations and return structured results.",
            format: OutputFormat::Json,
            created: at(2, 8),
            updated: at(5, 8),
        },
        &[var("content", "Content to moderate")],
    );
    moderator_v2.output_schema = Some(variables_to_schema(&[
        SchemaVariable::new("has_violations", Boolean).optional(),
        SchemaVariable::new("categories", Array).optional(),
        SchemaVariable::new("severity", Text).optional(),
        SchemaVariable::new("recommendation", Text).optional(),
    ]));

    vec![
        template(
            TemplateSpec {
                name: "summarizer",
                version: 2,
                system: Some("You are a professional content summarizer. Create concise, accurate summaries that capture the key points while maintaining the original tone and intent."),
                user: "Please summarize the following {document_type} in {language}. Keep the summary under {max_words} words.\n\nContent to summarize:\n{content}",
                description: "Summarize documents, articles, and text content into concise overviews.",
                format: OutputFormat::Text,
                created: at(5, 10),
                updated: at(10, 12),
            },
            &[
                var("document_type", "Type of document (article, paper, report)"),
                var("language", "Output language"),
                SchemaVariable::new("max_words", Number).with_description("Maximum words in summary"),
                var("content", "Content to summarize"),
            ],
        ),
        template(
            TemplateSpec {
                name: "summarizer",
                version: 1,
                system: Some("You are a content summarizer. Create concise summaries."),
                user: "Summarize this text:\n\n{content}",
                description: "Simple text summarization template.",
                format: OutputFormat::Text,
                created: at(1, 10),
                updated: at(1, 10),
            },
            &[var("content", "Content to summarize")],
        ),
        template(
            TemplateSpec {
                name: "code-reviewer",
                version: 1,
                system: Some("You are an experienced senior software engineer conducting code reviews. Focus on code quality, best practices, potential bugs, and security vulnerabilities. Be constructive and educational in your feedback."),
                user: "Review the following {language} code and provide feedback:\n\n```{language}\n{code}\n```\n\nFocus areas: {focus_areas}",
                description: "Conduct thorough code reviews with actionable feedback on quality, security, and best practices.",
                format: OutputFormat::Markdown,
                created: at(3, 14),
                updated: at(9, 15),
            },
            &[
                var("language", "Programming language"),
                var("code", "Code to review"),
                var("focus_areas", "Areas to focus on"),
            ],
        ),
        template(
            TemplateSpec {
                name: "email-writer",
                version: 3,
                system: Some("You are a professional email writer. Write clear, concise, and appropriately toned emails based on the given context and requirements."),
                user: "Write a {tone} email to {recipient_type} about {subject}.\n\nKey points to include:\n{key_points}\n\nAdditional context: {context}",
                description: "Generate professional emails with customizable tone and content.",
                format: OutputFormat::Text,
                created: at(2, 9),
                updated: at(8, 9),
            },
            &[
                var("tone", "Email tone (professional, casual, formal)"),
                var("recipient_type", "Type of recipient (client, colleague, manager)"),
                var("subject", "Email subject/topic"),
                var("key_points", "Key points to include"),
                var("context", "Additional context").optional(),
            ],
        ),
        template(
            TemplateSpec {
                name: "email-writer",
                version: 2,
                system: Some("You are a professional email writer. Write clear and appropriately toned emails."),
                user: "Write a {tone} email to {recipient_type} about {subject}.\n\nKey points:\n{key_points}",
                description: "Generate professional emails with customizable tone.",
                format: OutputFormat::Text,
                created: at(2, 9),
                updated: at(5, 9),
            },
            &[
                var("tone", "Email tone"),
                var("recipient_type", "Type of recipient"),
                var("subject", "Email subject"),
                var("key_points", "Key points to include"),
            ],
        ),
        template(
            TemplateSpec {
                name: "email-writer",
                version: 1,
                system: Some("Write professional emails."),
                user: "Write an email about {subject} to {recipient}.",
                description: "Basic email generation template.",
                format: OutputFormat::Text,
                created: at(1, 9),
                updated: at(1, 9),
            },
            &[var("subject", "Email subject"), var("recipient", "Email recipient")],
        ),
        template(
            TemplateSpec {
                name: "translator",
                version: 1,
                system: Some("You are a professional translator. Translate text accurately while preserving the original meaning, tone, and style."),
                user: "Translate the following text from {source_language} to {target_language}:\n\n{text}",
                description: "Translate text between languages while preserving meaning and tone.",
                format: OutputFormat::Text,
                created: at(4, 14),
                updated: at(7, 14),
            },
            &[
                var("source_language", "Source language"),
                var("target_language", "Target language"),
                var("text", "Text to translate"),
            ],
        ),
        template(
            TemplateSpec {
                name: "faq-responder",
                version: 1,
                system: Some("You are a helpful customer support assistant for a SaaS company. Answer questions clearly and direct users to appropriate resources when needed."),
                user: "Based on our FAQ database, please provide a helpful response to customer inquiries about account management and billing. Always be polite and offer to escalate to human support if the issue is complex.",
                description: "Respond to common customer support questions using FAQ knowledge base.",
                format: OutputFormat::Text,
                created: at(3, 10),
                updated: at(6, 10),
            },
            &[],
        ),
        moderator_v2,
        template(
            TemplateSpec {
                name: "content-moderator",
                version: 1,
                system: Some("You are a content moderation assistant. Flag inappropriate content."),
                user: "Check this content for violations:\n\n{content}",
                description: "Basic content moderation template.",
                format: OutputFormat::Text,
                created: at(1, 8),
                updated: at(1, 8),
            },
            &[var("content", "Content to check")],
        ),
        template(
            TemplateSpec {
                name: "standup-formatter",
                version: 1,
                system: None,
                user: "Format the following standup notes into a clean, professional daily update for the team Slack channel. Use bullet points and emojis appropriately.",
                description: "Format daily standup notes into a clean Slack message.",
                format: OutputFormat::Markdown,
                created: at(1, 9),
                updated: at(4, 9),
            },
            &[],
        ),
        template(
            TemplateSpec {
                name: "sql-generator",
                version: 1,
                system: Some("You are an expert SQL developer. Generate efficient, well-formatted SQL queries based on natural language descriptions. Always consider performance and security best practices."),
                user: "Generate a {dialect} SQL query for the following requirement:\n\n{requirement}\n\nAvailable tables and their schemas:\n{schema}",
                description: "Generate SQL queries from natural language descriptions.",
                format: OutputFormat::Code,
                created: at(6, 11),
                updated: at(11, 11),
            },
            &[
                var("dialect", "SQL dialect (PostgreSQL, MySQL, SQLite)"),
                var("requirement", "What the query should do"),
                var("schema", "Available table schemas"),
            ],
        ),
        template(
            TemplateSpec {
                name: "meeting-summarizer",
                version: 1,
                system: Some("You are an executive assistant skilled at summarizing meetings. Extract key decisions, action items, and important discussion points."),
                user: "Summarize the following meeting transcript. Include:\n- Key decisions made\n- Action items with owners\n- Important discussion points\n- Follow-up items\n\nTranscript:\n{transcript}",
                description: "Summarize meeting transcripts with action items and key decisions.",
                format: OutputFormat::Markdown,
                created: at(7, 10),
                updated: at(12, 10),
            },
            &[var("transcript", "Meeting transcript")],
        ),
    ]
}

struct TemplateSpec {
    name: &'static str,
    version: i32,
    system: Option<&'static str>,
    user: &'static str,
    description: &'static str,
    format: OutputFormat,
    created: Timestamp,
    updated: Timestamp,
}

fn template(spec: TemplateSpec, inputs: &[SchemaVariable]) -> Template {
    Template {
        id: Uuid::new_v4(),
        name: spec.name.to_string(),
        version: spec.version,
        user_prompt: spec.user.to_string(),
        system_prompt: spec.system.map(str::to_string),
        description: Some(spec.description.to_string()),
        input_schema: (!inputs.is_empty()).then(|| variables_to_schema(inputs)),
        output_schema: None,
        output_format: Some(spec.format),
        created_at: spec.created,
        updated_at: spec.updated,
    }
}

// ---------------------------------------------------------------------------
// Prompt instances
// ---------------------------------------------------------------------------

struct PromptSpec {
    display_name: &'static str,
    template: (&'static str, i32),
    environment: Environment,
    is_active: bool,
    category: &'static str,
    created: Timestamp,
    response_count: i64,
    success_rate: f64,
    values: &'static [(&'static str, &'static str)],
    model: (&'static str, &'static str),
}

fn prompts(templates: &[Template]) -> Vec<PromptInstance> {
    let specs = [
        PromptSpec {
            display_name: "Article Summarizer - Production",
            template: ("summarizer", 2),
            environment: Environment::Production,
            is_active: true,
            category: "summarization",
            created: at(10, 12),
            response_count: 156,
            success_rate: 98.2,
            values: &[
                ("document_type", "research paper"),
                ("language", "English"),
                ("max_words", "150"),
                ("content", "[Article content would be inserted here]"),
            ],
            model: ("gpt-4-turbo", "OpenAI"),
        },
        PromptSpec {
            display_name: "Code Review Assistant",
            template: ("code-reviewer", 1),
            environment: Environment::Staging,
            is_active: true,
            category: "development",
            created: at(9, 15),
            response_count: 42,
            success_rate: 95.0,
            values: &[
                ("language", "TypeScript"),
                ("code", "function fetchData() { ... }"),
                ("focus_areas", "performance, error handling, type safety"),
            ],
            model: ("claude-3-opus", "Anthropic"),
        },
        PromptSpec {
            display_name: "Email Composer",
            template: ("email-writer", 3),
            environment: Environment::Development,
            is_active: false,
            category: "generation",
            created: at(8, 9),
            response_count: 8,
            success_rate: 100.0,
            values: &[
                ("tone", "professional"),
                ("recipient_type", "client"),
                ("subject", "project update"),
                ("key_points", "- Milestone completed\n- Next steps\n- Timeline adjustment"),
                ("context", "This is a follow-up to last week's meeting"),
            ],
            model: ("gpt-4", "OpenAI"),
        },
        PromptSpec {
            display_name: "Simple Translator",
            template: ("translator", 1),
            environment: Environment::Production,
            is_active: true,
            category: "translation",
            created: at(7, 14),
            response_count: 320,
            success_rate: 99.1,
            values: &[
                ("source_language", "English"),
                ("target_language", "Spanish"),
                ("text", "Hello, how are you today?"),
            ],
            model: ("gpt-3.5-turbo", "OpenAI"),
        },
        PromptSpec {
            display_name: "Fixed FAQ Response",
            template: ("faq-responder", 1),
            environment: Environment::Production,
            is_active: true,
            category: "support",
            created: at(6, 10),
            response_count: 89,
            success_rate: 97.5,
            values: &[],
            model: ("gpt-3.5-turbo", "OpenAI"),
        },
        PromptSpec {
            display_name: "Content Moderation",
            template: ("content-moderator", 2),
            environment: Environment::Production,
            is_active: true,
            category: "moderation",
            created: at(5, 8),
            response_count: 1024,
            success_rate: 99.8,
            values: &[("content", "[User content to be moderated]")],
            model: ("claude-3-sonnet", "Anthropic"),
        },
        PromptSpec {
            display_name: "Daily Standup Bot",
            template: ("standup-formatter", 1),
            environment: Environment::Staging,
            is_active: true,
            category: "productivity",
            created: at(4, 9),
            response_count: 15,
            success_rate: 100.0,
            values: &[],
            model: ("gpt-3.5-turbo", "OpenAI"),
        },
        PromptSpec {
            display_name: "SQL Query Generator - Dev",
            template: ("sql-generator", 1),
            environment: Environment::Development,
            is_active: true,
            category: "development",
            created: at(11, 11),
            response_count: 5,
            success_rate: 100.0,
            values: &[
                ("dialect", "PostgreSQL"),
                ("requirement", "Get all users who signed up in the last 30 days"),
                ("schema", "users (id, email, created_at, status)"),
            ],
            model: ("gpt-4-turbo", "OpenAI"),
        },
    ];

    specs
        .into_iter()
        .filter_map(|spec| {
            let (name, version) = spec.template;
            let template = templates
                .iter()
                .find(|t| t.name == name && t.version == version)?;
            Some(prompt(spec, template))
        })
        .collect()
}

fn prompt(spec: PromptSpec, template: &Template) -> PromptInstance {
    let values: HashMap<String, String> = spec
        .values
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let (llm_model, llm_provider) = spec.model;

    PromptInstance {
        id: Uuid::new_v4(),
        display_name: spec.display_name.to_string(),
        template_id: template.id,
        template_name: template.name.clone(),
        template_version: template.version,
        environment: spec.environment,
        is_active: spec.is_active,
        category: spec.category.to_string(),
        created_at: spec.created,
        response_count: spec.response_count,
        success_rate: spec.success_rate,
        system_prompt: template.system_prompt.clone(),
        user_prompt: template.user_prompt.clone(),
        rendered_user_prompt: render_template(&template.user_prompt, &values),
        input_values: (!values.is_empty()).then_some(values),
        llm_model: llm_model.to_string(),
        llm_provider: llm_provider.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Model catalog
// ---------------------------------------------------------------------------

fn provider(name: &str, day: u32) -> LlmProvider {
    LlmProvider {
        id: Uuid::new_v4(),
        name: name.to_string(),
        created_at: at(day, 0),
    }
}

fn model(
    provider_id: Uuid,
    api_model_name: &str,
    display_name: &str,
    is_active: bool,
    is_deprecated: bool,
) -> LlmModel {
    LlmModel {
        id: Uuid::new_v4(),
        provider_id,
        api_model_name: api_model_name.to_string(),
        display_name: Some(display_name.to_string()),
        is_active,
        is_deprecated,
    }
}

fn config(model: &LlmModel, name: &str, temperature: Option<f64>) -> LlmConfig {
    LlmConfig {
        id: Uuid::new_v4(),
        model_id: model.id,
        name: name.to_string(),
        temperature,
        extra_settings: None,
        is_active: true,
    }
}

/// A fixture instant in January 2026.
fn at(day: u32, hour: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2026, 1, day, hour, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
