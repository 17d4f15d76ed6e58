//! Persistent vector storage
//!
//! A SQLite file inside the persistence directory holds every
//! (embedding, chunk text, metadata) entry.

mod vector_store;

pub use vector_store::{ScoredChunk, VectorStore, STORE_FILENAME};
