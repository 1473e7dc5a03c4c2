// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::config::ServiceConfig;
use crate::embeddings::canonical_model_id;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Idea Hub AI Service
///
/// Every flag falls back to its environment variable; anything left unset
/// keeps the value from [`ServiceConfig::from_env`].
#[derive(Parser, Debug, Default)]
#[command(name = "ideahub-ai-service")]
#[command(version = crate::version::VERSION)]
#[command(about = "Embedding and prompt service for Idea Hub", long_about = None)]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Default embedding model (also the fallback model)
    #[arg(long, env = "EMBEDDING_MODEL")]
    pub embedding_model: Option<String>,

    /// Inference device: cpu or cuda
    #[arg(long, env = "DEVICE")]
    pub device: Option<String>,

    /// Directory holding `<model>-onnx/` folders
    #[arg(long, env = "MODELS_DIR")]
    pub models_dir: Option<PathBuf>,

    /// Embedding backend: onnx or hash
    #[arg(long, env = "EMBEDDING_BACKEND")]
    pub backend: Option<String>,

    /// Load the default model before serving
    #[arg(long)]
    pub preload: bool,

    /// Debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Layers the command-line flags over `config`
    pub fn apply(self, mut config: ServiceConfig) -> Result<ServiceConfig> {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(model) = self.embedding_model {
            config.embedding_model = canonical_model_id(&model);
        }
        if let Some(device) = self.device {
            config.device = device.parse()?;
        }
        if let Some(dir) = self.models_dir {
            config.models_dir = dir;
        }
        if let Some(backend) = self.backend {
            config.backend = backend.parse()?;
        }
        config.preload_model |= self.preload;
        config.debug |= self.debug;

        config.validate()?;
        Ok(config)
    }
}
