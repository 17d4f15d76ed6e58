//! Core types for the knowledge base

pub mod document;
pub mod query;
pub mod response;

pub use document::{Chunk, ChunkMetadata, Document};
pub use query::{SearchMode, SearchRequest};
pub use response::{Answer, BatchImportResponse, SearchHit, SearchResponse, SourceRef, UploadResponse};
