//! Placeholder & schema engine and the prompt template domain.
//!
//! Everything in this crate is pure: no I/O, no async, no global state
//! beyond compiled regexes.

pub mod catalog;
pub mod error;
pub mod placeholder;
pub mod playground;
pub mod prompt_instance;
pub mod schema;
pub mod template;
pub mod types;
pub mod version_diff;
