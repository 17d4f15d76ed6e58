//! Answer generation with a local LLM

pub mod answer;
pub mod ollama;
pub mod prompt;

pub use answer::GenerationService;
pub use ollama::OllamaClient;
pub use prompt::PromptBuilder;
