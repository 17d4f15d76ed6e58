//! Retrieval-augmented answer generation

use std::sync::Arc;

use crate::error::Result;
use crate::providers::LlmProvider;
use crate::retrieval::RetrievalService;
use crate::types::{Answer, SourceRef};

use super::prompt::PromptBuilder;

/// Answers questions from retrieved passages with a local language model
pub struct GenerationService {
    retrieval: RetrievalService,
    llm: Arc<dyn LlmProvider>,
    /// Passages handed to the model as context
    context_k: usize,
}

impl GenerationService {
    /// Create a new generation service
    pub fn new(retrieval: RetrievalService, llm: Arc<dyn LlmProvider>, context_k: usize) -> Self {
        Self {
            retrieval,
            llm,
            context_k,
        }
    }

    /// Retrieve context for `question`, prompt the model and return its answer
    /// with the sources of every passage used.
    pub async fn ask(&self, question: &str) -> Result<Answer> {
        let passages = self.retrieval.retrieve(question, self.context_k).await?;

        tracing::info!(
            "Answering with {} context passages using {} ({})",
            passages.len(),
            self.llm.model(),
            self.llm.name()
        );

        let context = PromptBuilder::build_context(&passages);
        let prompt = PromptBuilder::build_answer_prompt(question, &context);
        let answer = self.llm.generate(&prompt).await?;

        let sources = passages
            .iter()
            .map(|p| SourceRef {
                source: p.chunk.metadata.source.clone(),
                page: p.chunk.display_page(),
            })
            .collect();

        Ok(Answer { answer, sources })
    }
}
