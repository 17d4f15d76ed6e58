//! Nearest-neighbor passage retrieval

mod search;

pub use search::RetrievalService;
