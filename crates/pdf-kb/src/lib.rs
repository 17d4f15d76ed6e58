//! pdf-kb: a PDF knowledge base with vector search and local-LLM answers
//!
//! Uploaded PDFs are split into overlapping page-aware chunks, embedded
//! through Ollama and stored in a SQLite-backed vector store. Queries are
//! answered either with the closest passages or with a generated answer
//! that cites the passages it was given.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod storage;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, ErrorKind, Result};
pub use server::RagServer;
pub use types::{
    document::{Chunk, ChunkMetadata, Document},
    query::{SearchMode, SearchRequest},
    response::{Answer, SearchHit, SourceRef},
};
