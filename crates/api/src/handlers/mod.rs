pub mod models;
pub mod placeholders;
pub mod playground;
pub mod prompts;
pub mod schemas;
pub mod templates;
