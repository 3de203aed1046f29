//! Field extraction from free-text medicine entries using an LLM endpoint

mod client;
mod error;
mod extractor;
mod fallback;
pub mod prompt;

pub use client::{ClaudeClient, CompletionClient};
pub use error::{BatchRejection, ExtractError};
pub use extractor::{BatchStrategy, Extractor, FieldExtractor, PerItemFallbackStrategy};
pub use fallback::fallback_fields;
