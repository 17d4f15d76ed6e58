//! PDF upload endpoint

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{Error, ErrorKind, Result};
use crate::ingestion::{has_pdf_extension, secure_filename};
use crate::server::state::AppState;
use crate::types::response::UploadResponse;

/// POST /upload - store one PDF from the `file` field and import it
pub async fn upload_pdf(State(state): State<AppState>, mut multipart: Multipart) -> Result<Response> {
    let limit = state.config().server.max_upload_size;
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, limit))?;
        upload = Some((filename, data));
        break;
    }

    let Some((raw_name, data)) = upload else {
        return Err(Error::validation("No file part in request"));
    };
    if raw_name.trim().is_empty() {
        return Err(Error::validation("No file selected"));
    }

    let filename = secure_filename(&raw_name);
    if !has_pdf_extension(&raw_name) || !has_pdf_extension(&filename) {
        return Err(Error::validation("Invalid file type. Only PDF files are allowed"));
    }

    let upload_dir = &state.config().storage.upload_dir;
    tokio::fs::create_dir_all(upload_dir).await?;
    let path = upload_dir.join(&filename);
    tokio::fs::write(&path, &data).await?;

    tracing::info!("Saved upload {} ({} bytes)", filename, data.len());

    let outcome = state.pipeline().process_pdf(&path).await;
    if outcome.success {
        Ok(Json(UploadResponse {
            message: outcome.message,
        })
        .into_response())
    } else {
        let kind = outcome.error_kind.unwrap_or(ErrorKind::Internal);
        Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": outcome.message,
                "kind": kind.as_str(),
            })),
        )
            .into_response())
    }
}

/// Oversized bodies get their own 413 error; anything else is a bad request
fn multipart_error(err: MultipartError, limit: usize) -> Error {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::payload_too_large(format!("File too large (limit is {} bytes)", limit))
    } else {
        Error::validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}
