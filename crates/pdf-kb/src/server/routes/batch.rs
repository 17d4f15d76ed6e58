//! Batch import endpoint

use axum::{extract::State, Json};

use crate::error::Result;
use crate::ingestion::import_pdfs;
use crate::server::state::AppState;
use crate::types::response::BatchImportResponse;

/// POST /batch_import - import every PDF in the upload directory
pub async fn batch_import(State(state): State<AppState>) -> Result<Json<BatchImportResponse>> {
    let dir = &state.config().storage.upload_dir;
    let results = import_pdfs(state.pipeline(), dir).await?;
    Ok(Json(BatchImportResponse { results }))
}
