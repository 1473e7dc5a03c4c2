// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use super::{
    embed_handler, health_handler,
    prompts::{
        brainstorm_prompt_handler, general_prompt_handler, generate_prompt_handler,
        list_templates_handler, technical_prompt_handler,
    },
    relevance_handler, root_handler,
};
use crate::config::{BackendKind, ServiceConfig};
use crate::embeddings::{
    EmbeddingService, HashModelLoader, ModelCache, ModelLoader, OnnxModelLoader, OnnxModelOptions,
};
use crate::prompts::PromptService;

/// Services shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub embeddings: Arc<EmbeddingService>,
    pub prompts: Arc<PromptService>,
}

impl AppState {
    pub fn new(embeddings: EmbeddingService, prompts: PromptService) -> Self {
        Self {
            embeddings: Arc::new(embeddings),
            prompts: Arc::new(prompts),
        }
    }

    /// Wires the configured backend into a fresh model cache and the default templates
    pub fn from_config(config: &ServiceConfig) -> Self {
        let loader: Arc<dyn ModelLoader> = match config.backend {
            // The configured dimension pins the default model only
            BackendKind::Onnx => Arc::new(
                OnnxModelLoader::new(
                    config.models_dir.clone(),
                    config.allow_model_download,
                    OnnxModelOptions {
                        device: config.device,
                        ..Default::default()
                    },
                )
                .with_dimension(&config.embedding_model, config.embedding_dimension),
            ),
            BackendKind::Hash => Arc::new(HashModelLoader::new(config.embedding_dimension)),
        };

        let cache = Arc::new(ModelCache::new(loader));
        Self::new(
            EmbeddingService::new(cache, &config.embedding_model),
            PromptService::default(),
        )
    }
}

/// Builds the router with every route, permissive CORS and request tracing
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        // Embeddings
        .route("/embeddings", post(embed_handler))
        .route("/embeddings/generate", post(embed_handler))
        // Ranking and vector similarity
        .route("/relevance", post(relevance_handler))
        .route("/similarity", post(relevance_handler))
        .route("/embeddings/similarity", post(relevance_handler))
        // Prompts
        .route("/prompts/general", post(general_prompt_handler))
        .route("/prompts/technical", post(technical_prompt_handler))
        .route("/prompts/brainstorm", post(brainstorm_prompt_handler))
        .route("/prompts/generate", post(generate_prompt_handler))
        .route("/prompts/templates", get(list_templates_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves `state` on the configured address until Ctrl-C
pub async fn start_server(config: &ServiceConfig, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;

    info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
