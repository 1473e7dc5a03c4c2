// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::api::embed::{EmbedRequest, EmbedResponse};
use crate::api::{http_server::AppState, ApiError};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

/// POST /embeddings handler
///
/// Validates the request, then embeds every text with the requested model
/// (or the default). The response names the model that actually ran, which
/// is the default after a fallback.
pub async fn embed_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmbedRequest>, JsonRejection>,
) -> Result<Json<EmbedResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    info!(
        "Embedding {} text(s) with {}",
        request.texts.len(),
        request
            .model
            .as_deref()
            .unwrap_or(state.embeddings.default_model())
    );

    let batch = state
        .embeddings
        .embed(&request.texts, request.model.as_deref())
        .await?;

    Ok(Json(batch.into()))
}
