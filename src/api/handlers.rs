// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::api::http_server::AppState;
use crate::version::VERSION;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub default_model: String,
    /// Models loaded so far; empty until the first embedding request or preload
    pub loaded_models: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RootResponse {
    pub status: String,
    pub version: String,
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: VERSION.to_string(),
        default_model: state.embeddings.default_model().to_string(),
        loaded_models: state.embeddings.loaded_models().await,
    })
}

/// GET /
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        status: "operational".to_string(),
        version: VERSION.to_string(),
    })
}
