// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Service configuration from environment variables
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8000` |
//! | `EMBEDDING_MODEL` | `all-MiniLM-L6-v2` |
//! | `DEVICE` | `cpu` (`cpu` or `cuda`) |
//! | `EMBEDDING_DIMENSION` | `384` |
//! | `MODELS_DIR` | `./models` |
//! | `EMBEDDING_BACKEND` | `onnx` (`onnx` or `hash`) |
//! | `ALLOW_MODEL_DOWNLOAD` | `true` |
//! | `PRELOAD_MODEL` | `false` |
//! | `DEBUG` | `false` |

use crate::embeddings::{canonical_model_id, DEFAULT_DIMENSION, DEFAULT_MODEL};
use anyhow::{anyhow, bail, Context, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    #[default]
    Cpu,
    /// CUDA, falling back to CPU when unavailable
    Cuda,
}

impl FromStr for Device {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cpu" => Ok(Device::Cpu),
            "cuda" | "gpu" => Ok(Device::Cuda),
            other => Err(anyhow!("Unknown device '{}' (expected cpu or cuda)", other)),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda => write!(f, "cuda"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// ONNX Runtime sentence transformers
    #[default]
    Onnx,
    /// Deterministic hash vectors, no model files needed
    Hash,
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "onnx" => Ok(BackendKind::Onnx),
            "hash" => Ok(BackendKind::Hash),
            other => Err(anyhow!(
                "Unknown embedding backend '{}' (expected onnx or hash)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Default embedding model, also the fallback target
    pub embedding_model: String,
    pub device: Device,
    pub embedding_dimension: usize,
    pub models_dir: PathBuf,
    pub backend: BackendKind,
    pub allow_model_download: bool,
    /// Load the default model before accepting requests
    pub preload_model: bool,
    pub debug: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            embedding_model: DEFAULT_MODEL.to_string(),
            device: Device::Cpu,
            embedding_dimension: DEFAULT_DIMENSION,
            models_dir: PathBuf::from("./models"),
            backend: BackendKind::Onnx,
            allow_model_download: true,
            preload_model: false,
            debug: false,
        }
    }
}

impl ServiceConfig {
    /// Reads the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any variable source; unset variables keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT '{}'", port))?;
        }
        if let Some(model) = lookup("EMBEDDING_MODEL") {
            config.embedding_model = canonical_model_id(&model);
        }
        if let Some(device) = lookup("DEVICE") {
            config.device = device.parse()?;
        }
        if let Some(dimension) = lookup("EMBEDDING_DIMENSION") {
            config.embedding_dimension = dimension
                .trim()
                .parse()
                .with_context(|| format!("Invalid EMBEDDING_DIMENSION '{}'", dimension))?;
        }
        if let Some(dir) = lookup("MODELS_DIR") {
            config.models_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup("EMBEDDING_BACKEND") {
            config.backend = backend.parse()?;
        }
        if let Some(v) = lookup("ALLOW_MODEL_DOWNLOAD") {
            config.allow_model_download = parse_flag(&v);
        }
        if let Some(v) = lookup("PRELOAD_MODEL") {
            config.preload_model = parse_flag(&v);
        }
        if let Some(v) = lookup("DEBUG") {
            config.debug = parse_flag(&v);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.embedding_dimension == 0 {
            bail!("EMBEDDING_DIMENSION must be greater than 0");
        }
        if self.embedding_model.is_empty() {
            bail!("EMBEDDING_MODEL must not be empty");
        }
        if self.host.trim().is_empty() || self.host.contains(char::is_whitespace) {
            bail!("Invalid HOST '{}'", self.host);
        }
        Ok(())
    }

    /// `host:port`, resolved when the listener binds
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    value == "true" || value == "1" || value == "yes"
}
