//! Query embedding and similarity search over the vector store

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;
use crate::storage::{ScoredChunk, VectorStore};
use crate::types::SearchHit;

/// Embeds queries and looks up the closest chunks
#[derive(Clone)]
pub struct RetrievalService {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<VectorStore>,
}

impl RetrievalService {
    /// Create a new retrieval service
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Return up to `k` chunks most similar to `query`, best first
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        let store = Arc::clone(&self.store);
        let empty = tokio::task::spawn_blocking(move || store.is_empty())
            .await
            .map_err(|e| Error::internal(format!("Task join error: {}", e)))??;

        if empty || k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;

        let store = Arc::clone(&self.store);
        let results = tokio::task::spawn_blocking(move || {
            store.similarity_search(&query_embedding, k)
        })
        .await
        .map_err(|e| Error::internal(format!("Task join error: {}", e)))??;

        tracing::debug!("Retrieved {} chunks for query", results.len());
        Ok(results)
    }

    /// Ranked passages for display: rank 1..k, 1-based pages, similarity scores
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>> {
        let results = self.retrieve(query, k).await?;

        Ok(results
            .into_iter()
            .enumerate()
            .map(|(i, scored)| SearchHit::from_scored(i + 1, scored))
            .collect())
    }
}
