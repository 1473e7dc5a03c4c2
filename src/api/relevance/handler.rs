// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::api::relevance::{RelevanceRequest, RelevanceResponse};
use crate::api::{http_server::AppState, ApiError};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

/// POST /relevance handler
///
/// A `{query, documents}` body is ranked with the embedding model; an
/// `{embedding1, embedding2}` body is scored directly without loading a model.
pub async fn relevance_handler(
    State(state): State<AppState>,
    payload: Result<Json<RelevanceRequest>, JsonRejection>,
) -> Result<Json<RelevanceResponse>, ApiError> {
    let Json(request) = payload?;

    let response = match request {
        RelevanceRequest::Rank(rank) => {
            rank.validate()?;
            info!("Ranking {} document(s)", rank.documents.len());

            state
                .embeddings
                .rank_by_relevance(&rank.query, &rank.documents, rank.model.as_deref())
                .await?
                .into()
        }
        RelevanceRequest::Vectors(pair) => {
            pair.validate()?;
            state
                .embeddings
                .similarity(&pair.embedding1, &pair.embedding2)?
                .into()
        }
    };

    Ok(Json(response))
}
