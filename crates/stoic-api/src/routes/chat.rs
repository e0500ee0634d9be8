use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;
use std::time::Duration;

use stoic_llm::ChatRequest as ModelRequest;
use stoic_types::{ChatReply, ChatRequest};
use crate::{
    error::{ApiError, ApiResult},
    prompt,
    state::AppState,
};

/// Forward one user turn to the model and return its text
///
/// The request is seeded with the persona prompt and acknowledgement; no
/// retries, no server-side throttling. The upstream call is bounded by
/// `server.request_timeout_secs`.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatReply>> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let contents = prompt::build_contents(&req)?;

    tracing::info!(
        text_len = req.message.len(),
        has_image = req.image.is_some(),
        "Forwarding chat turn"
    );

    let request = ModelRequest::new(state.model(), contents)
        .with_options(state.chat_options.clone());

    let timeout_secs = state.config.server.request_timeout_secs;
    let response = tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        state.llm_client.chat(request),
    )
    .await
    .map_err(|_| ApiError::Timeout(timeout_secs))??;

    Ok(Json(ChatReply::new(response.text)))
}
