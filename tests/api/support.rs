// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Router helpers shared by the API tests. Everything runs on the hash
//! backend, so no model files are needed.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use ideahub_ai_service::{
    api::{create_app, AppState},
    config::{BackendKind, ServiceConfig},
    embeddings::{EmbeddingService, HashModelLoader, ModelCache, DEFAULT_MODEL},
    prompts::PromptService,
};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

pub fn hash_config() -> ServiceConfig {
    ServiceConfig {
        backend: BackendKind::Hash,
        ..Default::default()
    }
}

pub fn test_state() -> AppState {
    AppState::from_config(&hash_config())
}

pub fn test_app() -> Router {
    create_app(test_state())
}

/// App whose loader refuses the listed model ids
pub fn app_with_unavailable(models: &[&str]) -> Router {
    let loader = models
        .iter()
        .fold(HashModelLoader::new(384), |loader, m| loader.with_unavailable(*m));
    let cache = Arc::new(ModelCache::new(Arc::new(loader)));

    create_app(AppState::new(
        EmbeddingService::new(cache, DEFAULT_MODEL),
        PromptService::default(),
    ))
}

pub async fn send_raw(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send_raw(app, Method::POST, uri, &body.to_string()).await
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}
