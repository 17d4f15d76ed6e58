//! Ingestion pipeline: PDF file to stored, embedded chunks

use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, ErrorKind, Result};
use crate::providers::EmbeddingProvider;
use crate::storage::VectorStore;
use crate::types::Document;

use super::chunker::TextChunker;
use super::parser::PdfParser;

/// Result of importing one PDF
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// Whether the document was stored
    pub success: bool,
    /// Human-readable status line
    pub message: String,
    /// Number of chunks written
    pub chunks: usize,
    /// Failure category, when `success` is false
    pub error_kind: Option<ErrorKind>,
}

/// Main ingestion pipeline
pub struct IngestPipeline {
    /// Text chunker
    chunker: TextChunker,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<VectorStore>,
}

impl IngestPipeline {
    /// Create a new ingestion pipeline
    pub fn new(
        chunker: TextChunker,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<VectorStore>,
    ) -> Self {
        Self {
            chunker,
            embedder,
            store,
        }
    }

    /// The vector store this pipeline writes to
    pub fn store(&self) -> &Arc<VectorStore> {
        &self.store
    }

    /// Import one PDF from disk.
    ///
    /// Never fails: any error is logged and turned into an unsuccessful
    /// outcome whose message carries only the error's public description.
    pub async fn process_pdf(&self, path: &Path) -> IngestOutcome {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match self.ingest(path, &filename).await {
            Ok(chunks) => {
                tracing::info!("Imported {} ({} chunks)", filename, chunks);
                IngestOutcome {
                    success: true,
                    message: format!("Imported: {} ({} chunks)", filename, chunks),
                    chunks,
                    error_kind: None,
                }
            }
            Err(e) => {
                tracing::warn!(kind = %e.kind(), "Import of {} failed: {}", filename, e);
                IngestOutcome {
                    success: false,
                    message: format!("Import failed: {} - {}", filename, e.public_message()),
                    chunks: 0,
                    error_kind: Some(e.kind()),
                }
            }
        }
    }

    /// Parse, chunk, embed and store
    async fn ingest(&self, path: &Path, filename: &str) -> Result<usize> {
        let data = tokio::fs::read(path).await?;
        let document = Document::new(filename);

        let name = filename.to_string();
        let parsed = tokio::task::spawn_blocking(move || PdfParser::parse(&name, &data))
            .await
            .map_err(|e| Error::file_parse(filename, format!("Parser task failed: {}", e)))??;

        tracing::debug!(
            "Parsed {}: {} of {} pages with text, {} chars",
            filename,
            parsed.pages.len(),
            parsed.total_pages,
            parsed.char_count()
        );

        let chunks = self.chunker.chunk_pages(&document, &parsed.pages);
        if chunks.is_empty() {
            return Err(Error::file_parse(filename, "No chunks produced"));
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(Error::embedding(format!(
                "{} returned {} embeddings for {} chunks",
                self.embedder.name(),
                embeddings.len(),
                chunks.len()
            )));
        }

        let entries: Vec<_> = chunks.into_iter().zip(embeddings).collect();
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let written = store.add_chunks(&entries)?;
            store.persist()?;
            Ok::<_, Error>(written)
        })
        .await
        .map_err(|e| Error::internal(format!("Task join error: {}", e)))?
    }
}
