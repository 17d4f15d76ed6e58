//! Error types for the knowledge base

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Result type alias for knowledge base operations
pub type Result<T> = std::result::Result<T, Error>;

/// Knowledge base errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client input rejected before any work was done
    #[error("{0}")]
    Validation(String),

    /// Request body over the configured size limit
    #[error("{0}")]
    PayloadTooLarge(String),

    /// PDF parsing error
    #[error("Failed to parse file '{filename}': {message}")]
    FileParse { filename: String, message: String },

    /// Embedding error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Vector store error
    #[error("Vector store error: {0}")]
    VectorStore(String),

    /// Ollama/LLM error
    #[error("LLM error: {0}")]
    Llm(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// SQLite error from the vector store
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Closed set of error categories exposed to clients.
///
/// The full `Error` (with its internal detail) goes to the log; clients only
/// ever see the kind and its public message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad client input (missing file, wrong extension, empty query)
    Validation,
    /// Upload exceeds the configured size limit
    PayloadTooLarge,
    /// The document could not be read as a PDF
    Parse,
    /// The embedding model failed or is unreachable
    Embedding,
    /// The vector store failed
    Store,
    /// The generation model failed or is unreachable
    Generation,
    /// Anything else
    Internal,
}

impl ErrorKind {
    /// Stable identifier used in JSON bodies and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::PayloadTooLarge => "payload_too_large",
            Self::Parse => "parse_error",
            Self::Embedding => "embedding_error",
            Self::Store => "store_error",
            Self::Generation => "generation_error",
            Self::Internal => "internal_error",
        }
    }

    /// HTTP status for this kind
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Embedding | Self::Generation => StatusCode::SERVICE_UNAVAILABLE,
            Self::Parse | Self::Store | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            Self::Validation => "invalid request",
            Self::PayloadTooLarge => "file too large",
            Self::Parse => "could not extract text from the PDF",
            Self::Embedding => "embedding model unavailable",
            Self::Store => "vector store unavailable",
            Self::Generation => "language model unavailable",
            Self::Internal => "internal server error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a payload-too-large error
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::PayloadTooLarge(message.into())
    }

    /// Create a file parse error
    pub fn file_parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileParse {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a vector store error
    pub fn vector_store(message: impl Into<String>) -> Self {
        Self::VectorStore(message.into())
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::PayloadTooLarge(_) => ErrorKind::PayloadTooLarge,
            Error::FileParse { .. } => ErrorKind::Parse,
            Error::Embedding(_) => ErrorKind::Embedding,
            Error::VectorStore(_) | Error::Sqlite(_) => ErrorKind::Store,
            Error::Llm(_) | Error::Http(_) => ErrorKind::Generation,
            Error::Config(_) | Error::Io(_) | Error::Json(_) | Error::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Message that is safe to hand to an HTTP client.
    ///
    /// Validation and size-limit messages are written for the client; every
    /// other kind collapses to a fixed description.
    pub fn public_message(&self) -> String {
        match self {
            Error::Validation(msg) | Error::PayloadTooLarge(msg) => msg.clone(),
            other => other.kind().public_message().to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let kind = self.kind();

        if matches!(kind, ErrorKind::Validation | ErrorKind::PayloadTooLarge) {
            tracing::debug!("Rejected request: {}", self);
        } else {
            tracing::error!(kind = %kind, "Request failed: {}", self);
        }

        let body = Json(json!({
            "error": self.public_message(),
            "kind": kind.as_str(),
        }));

        (kind.status(), body).into_response()
    }
}
