//! Provider abstractions for embeddings and answer generation
//!
//! Pipelines hold trait objects so the Ollama backend can be swapped for
//! another model server, or for deterministic stand-ins in tests.

pub mod embedding;
pub mod llm;
pub mod ollama;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use ollama::{OllamaEmbedder, OllamaLlm, OllamaProvider};
