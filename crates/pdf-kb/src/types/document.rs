//! Document and chunk types with source tracking

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A PDF being imported, identified by its filename
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Filename (basename only) of the source PDF
    pub filename: String,
    /// Wall-clock time the import started
    pub imported_at: DateTime<Utc>,
}

impl Document {
    /// Start importing `filename` now
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            imported_at: Utc::now(),
        }
    }

    /// Import timestamp in the form stored on every chunk
    pub fn import_time(&self) -> String {
        self.imported_at.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

/// Metadata persisted with every vector store entry.
///
/// `source` and `import_time` are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Source PDF filename
    pub source: String,
    /// Page the chunk came from (0-based)
    pub page: u32,
    /// Character offset of the chunk within its page
    pub start_index: usize,
    /// When the chunk was imported (RFC 3339, microseconds)
    pub import_time: String,
}

/// A chunk of text from a document. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk ID
    pub id: Uuid,
    /// Text content
    pub content: String,
    /// Source information
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(content: String, metadata: ChunkMetadata) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            metadata,
        }
    }

    /// 1-based page number for display
    pub fn display_page(&self) -> u32 {
        self.metadata.page + 1
    }
}
