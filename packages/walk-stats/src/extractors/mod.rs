//! Extractor implementations.

pub mod prompts;
pub mod rules;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "openai")]
pub use openai::OpenAiExtractor;
pub use rules::RuleExtractor;
