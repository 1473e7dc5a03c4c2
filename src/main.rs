// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use ideahub_ai_service::{
    api::{start_server, AppState},
    cli::Cli,
    config::ServiceConfig,
    version,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.apply(ServiceConfig::from_env()?)?;

    // RUST_LOG wins over DEBUG when set
    let level = if config.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🚀 Starting {}", version::get_version_string());
    info!(
        "Embedding backend: {:?}, default model: {} ({}D on {})",
        config.backend, config.embedding_model, config.embedding_dimension, config.device
    );

    let state = AppState::from_config(&config);

    if config.preload_model {
        info!("📦 Preloading model {}", config.embedding_model);
        match state.embeddings.preload(None).await {
            Ok(model) => info!("✅ Model {} ready", model),
            Err(e) => {
                // The service still starts; the first request retries the load
                error!("❌ Failed to preload embedding model: {}", e);
                warn!("Embedding endpoints will retry loading on first use");
            }
        }
    }

    start_server(&config, state).await?;

    info!("👋 Goodbye!");
    Ok(())
}
