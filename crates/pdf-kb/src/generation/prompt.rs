//! Prompt templates for answer generation

use crate::storage::ScoredChunk;

/// Prompt builder for retrieval-augmented answers
pub struct PromptBuilder;

impl PromptBuilder {
    /// Concatenate retrieved passages into a context block
    pub fn build_context(results: &[ScoredChunk]) -> String {
        let mut context = String::new();

        for (i, result) in results.iter().enumerate() {
            context.push_str(&format!(
                "[{}] {}, Page {}\n{}\n\n",
                i + 1,
                result.chunk.metadata.source,
                result.chunk.display_page(),
                result.chunk.content.trim()
            ));
        }

        context
    }

    /// Build the "stuff" prompt: every passage followed by the question
    pub fn build_answer_prompt(question: &str, context: &str) -> String {
        format!(
            r#"Use the following passages from the user's documents to answer the question at the end.
If the passages do not contain the answer, say that you don't know. Do not make up an answer.

{context}
Question: {question}
Helpful Answer:"#,
            context = context,
            question = question.trim()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chunk, ChunkMetadata};

    fn scored(source: &str, page: u32, content: &str) -> ScoredChunk {
        ScoredChunk {
            chunk: Chunk::new(
                content.to_string(),
                ChunkMetadata {
                    source: source.to_string(),
                    page,
                    start_index: 0,
                    import_time: String::new(),
                },
            ),
            similarity: 0.5,
        }
    }

    #[test]
    fn test_context_numbers_passages_with_one_based_pages() {
        let context = PromptBuilder::build_context(&[
            scored("a.pdf", 0, "Alpha text."),
            scored("b.pdf", 4, "Beta text."),
        ]);

        assert!(context.contains("[1] a.pdf, Page 1\nAlpha text."));
        assert!(context.contains("[2] b.pdf, Page 5\nBeta text."));
    }

    #[test]
    fn test_prompt_ends_with_question() {
        let prompt = PromptBuilder::build_answer_prompt("  Who signed? ", "[1] a.pdf, Page 1\nBob signed.\n\n");
        assert!(prompt.contains("Bob signed."));
        assert!(prompt.ends_with("Question: Who signed?\nHelpful Answer:"));
    }

    #[test]
    fn test_empty_context_still_builds() {
        let context = PromptBuilder::build_context(&[]);
        assert!(context.is_empty());
        let prompt = PromptBuilder::build_answer_prompt("anything?", &context);
        assert!(prompt.contains("say that you don't know"));
    }
}
