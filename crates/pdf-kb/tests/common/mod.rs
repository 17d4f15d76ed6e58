//! Shared harness for HTTP-level tests

#![allow(dead_code)]

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use parking_lot::Mutex;
use pdf_kb::providers::{EmbeddingProvider, LlmProvider};
use pdf_kb::{RagConfig, RagServer, Result};
use tempfile::TempDir;
use tower::ServiceExt;

#[path = "../../src/ingestion/fixtures.rs"]
mod fixtures;

pub use fixtures::pdf_with_pages;

const DIMENSIONS: usize = 64;
const BOUNDARY: &str = "pdfkbtestboundary";

/// Bag-of-words embedder: each lowercase word is hashed into a bucket
pub struct WordHashEmbedder;

#[async_trait]
impl EmbeddingProvider for WordHashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; DIMENSIONS];
        for word in text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            vector[(hasher.finish() % DIMENSIONS as u64) as usize] += 1.0;
        }
        Ok(vector)
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "word-hash"
    }
}

/// Language model stand-in that records prompts and answers with a fixed line
#[derive(Default)]
pub struct RecordingLlm {
    pub prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl LlmProvider for RecordingLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        Ok("The answer is in the documents.".to_string())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "recording"
    }

    fn model(&self) -> &str {
        "recording-1"
    }
}

/// A server wired to in-process providers and temporary directories
pub struct TestApp {
    pub router: Router,
    pub llm: Arc<RecordingLlm>,
    pub upload_dir: PathBuf,
    pub persist_dir: PathBuf,
    _root: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    pub fn with_config(adjust: impl FnOnce(&mut RagConfig)) -> Self {
        let root = tempfile::tempdir().unwrap();
        let upload_dir = root.path().join("pdfs");
        let persist_dir = root.path().join("vector_db");

        let mut config = RagConfig::default();
        config.storage.upload_dir = upload_dir.clone();
        config.storage.persist_dir = persist_dir.clone();
        config.chunking.chunk_size = 200;
        config.chunking.chunk_overlap = 40;
        adjust(&mut config);

        let llm = Arc::new(RecordingLlm::default());
        let server = RagServer::new(config, Arc::new(WordHashEmbedder), llm.clone()).unwrap();

        Self {
            router: server.router(),
            llm,
            upload_dir,
            persist_dir,
            _root: root,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn upload(&self, filename: &str, data: &[u8]) -> (StatusCode, serde_json::Value) {
        let response = self.send(multipart_request("file", filename, data)).await;
        json_body(response).await
    }

    pub async fn search(&self, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let request = Request::post("/search")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        json_body(self.send(request).await).await
    }

    pub async fn batch_import(&self) -> (StatusCode, serde_json::Value) {
        let request = Request::post("/batch_import").body(Body::empty()).unwrap();
        json_body(self.send(request).await).await
    }
}

/// Multipart request with a single file field
pub fn multipart_request(field: &str, filename: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::post("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Names of the files in `dir`, empty when it does not exist
pub fn files_in(dir: &Path) -> Vec<String> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}
