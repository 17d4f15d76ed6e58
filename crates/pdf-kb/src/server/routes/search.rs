//! Search endpoint: ranked passages or a generated answer

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::response::SearchResponse;
use crate::types::{SearchMode, SearchRequest};

/// POST /search
pub async fn search(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(|e| Error::validation(e.body_text()))?;

    if request.is_empty() {
        return Err(Error::validation("Query is empty"));
    }

    tracing::info!("Search ({:?}): {}", request.mode, request.query);

    match request.mode {
        SearchMode::Vector => {
            let k = request.top_k.unwrap_or(state.config().retrieval.top_k);
            let results = state.retrieval().search(&request.query, k).await?;
            Ok(Json(SearchResponse { results }).into_response())
        }
        SearchMode::Llm => {
            let answer = state.generation().ask(&request.query).await?;
            Ok(Json(answer).into_response())
        }
    }
}
