//! Application state for the knowledge base server

use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::Result;
use crate::generation::GenerationService;
use crate::ingestion::{IngestPipeline, TextChunker};
use crate::providers::{EmbeddingProvider, LlmProvider};
use crate::retrieval::RetrievalService;
use crate::storage::VectorStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Write path: parse, chunk, embed, store
    pipeline: IngestPipeline,
    /// Read path: vector search
    retrieval: RetrievalService,
    /// Read path: answers from the language model
    generation: GenerationService,
}

impl AppState {
    /// Open the vector store and wire the services around it
    pub fn new(
        config: RagConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Result<Self> {
        tracing::info!(
            "Initializing knowledge base (embeddings: {}, llm: {} {})",
            embedder.name(),
            llm.name(),
            llm.model()
        );

        let store = Arc::new(VectorStore::open(&config.storage.persist_dir)?);
        tracing::info!("Vector store holds {} entries", store.len()?);

        let chunker = TextChunker::new(config.chunking.chunk_size, config.chunking.chunk_overlap);
        let pipeline = IngestPipeline::new(chunker, Arc::clone(&embedder), Arc::clone(&store));
        let retrieval = RetrievalService::new(embedder, store);
        let generation =
            GenerationService::new(retrieval.clone(), llm, config.retrieval.answer_context_k);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pipeline,
                retrieval,
                generation,
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the ingestion pipeline
    pub fn pipeline(&self) -> &IngestPipeline {
        &self.inner.pipeline
    }

    /// Get the retrieval service
    pub fn retrieval(&self) -> &RetrievalService {
        &self.inner.retrieval
    }

    /// Get the generation service
    pub fn generation(&self) -> &GenerationService {
        &self.inner.generation
    }
}
