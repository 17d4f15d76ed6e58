//! SQLite-backed vector store with exhaustive cosine search

use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{Chunk, ChunkMetadata};

/// Database file created inside the persistence directory
pub const STORE_FILENAME: &str = "store.sqlite3";

/// A stored chunk with its similarity to a query
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The matched chunk
    pub chunk: Chunk,
    /// Cosine similarity (higher is closer)
    pub similarity: f32,
}

/// Vector store persisted under a directory
pub struct VectorStore {
    conn: Mutex<Connection>,
}

impl VectorStore {
    /// Open the store in `persist_dir`, creating the directory and the
    /// database when absent and reopening them when present.
    pub fn open<P: AsRef<Path>>(persist_dir: P) -> Result<Self> {
        let persist_dir = persist_dir.as_ref();
        std::fs::create_dir_all(persist_dir)?;

        let path = persist_dir.join(STORE_FILENAME);
        let existed = path.exists();
        let conn = Connection::open(&path)
            .map_err(|e| Error::vector_store(format!("Failed to open {}: {}", path.display(), e)))?;

        if existed {
            tracing::info!("Loading existing vector store at {}", path.display());
        } else {
            tracing::info!("Creating new vector store at {}", path.display());
        }

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            "#,
        )?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS entries (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                content TEXT NOT NULL,
                metadata TEXT NOT NULL,
                source TEXT NOT NULL,
                import_time TEXT NOT NULL,
                dimensions INTEGER NOT NULL,
                embedding BLOB NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_entries_source ON entries(source);
            "#,
        )?;

        Ok(())
    }

    /// Write a batch of embedded chunks in a single transaction
    pub fn add_chunks(&self, entries: &[(Chunk, Vec<f32>)]) -> Result<usize> {
        if entries.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO entries (id, content, metadata, source, import_time, dimensions, embedding)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;

            for (chunk, embedding) in entries {
                if embedding.is_empty() {
                    return Err(Error::vector_store(format!(
                        "Chunk {} has no embedding",
                        chunk.id
                    )));
                }

                let metadata = serde_json::to_string(&chunk.metadata)?;
                stmt.execute(params![
                    chunk.id.to_string(),
                    chunk.content,
                    metadata,
                    chunk.metadata.source,
                    chunk.metadata.import_time,
                    embedding.len() as i64,
                    encode_embedding(embedding),
                ])?;
            }
        }
        tx.commit()?;

        tracing::debug!("Stored {} entries", entries.len());
        Ok(entries.len())
    }

    /// Flush the write-ahead log into the main database file
    pub fn persist(&self) -> Result<()> {
        let conn = self.conn.lock();
        conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))?;
        Ok(())
    }

    /// Return the `k` entries most similar to `query`, best first.
    ///
    /// Ties keep insertion order. Entries whose dimension differs from the
    /// query are skipped.
    pub fn similarity_search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        if k == 0 || query.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, content, metadata, dimensions, embedding FROM entries ORDER BY seq",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, Vec<u8>>(4)?,
            ))
        })?;

        let mut scored = Vec::new();
        let mut skipped = 0usize;

        for row in rows {
            let (id, content, metadata, dimensions, blob) = row?;

            if dimensions as usize != query.len() {
                skipped += 1;
                continue;
            }

            let embedding = decode_embedding(&blob)?;
            let metadata: ChunkMetadata = serde_json::from_str(&metadata)?;
            let id = Uuid::parse_str(&id)
                .map_err(|e| Error::vector_store(format!("Invalid entry id {}: {}", id, e)))?;

            scored.push(ScoredChunk {
                chunk: Chunk {
                    id,
                    content,
                    metadata,
                },
                similarity: cosine_similarity(query, &embedding),
            });
        }

        if skipped > 0 {
            tracing::warn!(
                "Skipped {} entries with a dimension other than {}",
                skipped,
                query.len()
            );
        }

        // stable sort: equal scores stay in insertion order
        scored.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        scored.truncate(k);

        Ok(scored)
    }

    /// Number of stored entries
    pub fn len(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Check if empty
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Metadata of every entry from `source`, in insertion order
    pub fn metadata_for_source(&self, source: &str) -> Result<Vec<ChunkMetadata>> {
        let conn = self.conn.lock();
        let mut stmt =
            conn.prepare("SELECT metadata FROM entries WHERE source = ?1 ORDER BY seq")?;
        let rows = stmt.query_map(params![source], |row| row.get::<_, String>(0))?;

        let mut out = Vec::new();
        for raw in rows {
            out.push(serde_json::from_str(&raw?)?);
        }
        Ok(out)
    }
}

fn encode_embedding(vector: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(std::mem::size_of_val(vector));
    for &value in vector {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

fn decode_embedding(blob: &[u8]) -> Result<Vec<f32>> {
    if blob.len() % 4 != 0 {
        return Err(Error::vector_store(format!(
            "Invalid embedding byte length: {}",
            blob.len()
        )));
    }

    Ok(blob
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

/// Cosine similarity; 0.0 when either vector has zero norm
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom <= f64::EPSILON {
        return 0.0;
    }
    (dot / denom) as f32
}
