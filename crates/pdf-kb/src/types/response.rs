//! Response types for uploads, searches and batch imports

use serde::{Deserialize, Serialize};

use crate::storage::ScoredChunk;

/// One ranked passage from vector search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// 1-based rank
    pub rank: usize,
    /// Source filename
    pub source: String,
    /// 1-based page number
    pub page: u32,
    /// Raw chunk text
    pub content: String,
    /// Cosine similarity between query and chunk (-1.0 to 1.0, higher is closer)
    pub score: f32,
}

impl SearchHit {
    /// Build a hit from a store result at the given 1-based rank
    pub fn from_scored(rank: usize, scored: ScoredChunk) -> Self {
        let page = scored.chunk.display_page();
        Self {
            rank,
            source: scored.chunk.metadata.source,
            page,
            content: scored.chunk.content,
            score: scored.similarity,
        }
    }
}

/// Source of a chunk used as answer context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Source filename
    pub source: String,
    /// 1-based page number
    pub page: u32,
}

/// Generated answer with the sources it was grounded on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Free-text answer
    pub answer: String,
    /// Chunks used as context, in retrieval order
    pub sources: Vec<SourceRef>,
}

/// Body of a vector-mode search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
}

/// Body of a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
}

/// Body of a batch import response, one message per file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchImportResponse {
    pub results: Vec<String>,
}
