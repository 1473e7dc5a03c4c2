// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX Embedding Model Wrapper
//!
//! Runs sentence-transformer exports (all-MiniLM-L6-v2 by default) through
//! ONNX Runtime.
//!
//! Features:
//! - ONNX model loading from disk, or from the HuggingFace hub when missing
//! - CPU execution, or CUDA with automatic CPU fallback
//! - BERT tokenization with truncation to the model's sequence limit
//! - Batch inference with attention-masked mean pooling
//! - Optional L2 normalization (sentence-transformers default)

use crate::config::Device;
use crate::embeddings::{
    canonical_model_id, hub_repo_id, local_model_dir, EmbeddingBackend, ModelHandle, ModelLoader,
};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use ndarray::{Array2, Axis};
use ort::execution_providers::{CPUExecutionProvider, CUDAExecutionProvider};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{info, warn};

const MODEL_FILE: &str = "model.onnx";
const TOKENIZER_FILE: &str = "tokenizer.json";
const HUB_MODEL_FILE: &str = "onnx/model.onnx";

/// Runtime options shared by every model the loader materializes
#[derive(Debug, Clone)]
pub struct OnnxModelOptions {
    /// Execution device
    pub device: Device,
    /// Maximum sequence length in tokens (256 for all-MiniLM-L6-v2)
    pub max_length: usize,
    /// L2-normalize pooled vectors
    pub normalize: bool,
    pub intra_threads: usize,
}

impl Default for OnnxModelOptions {
    fn default() -> Self {
        Self {
            device: Device::Cpu,
            max_length: 256,
            normalize: true,
            intra_threads: 4,
        }
    }
}

/// ONNX-based sentence embedding model
///
/// The session is wrapped in `Arc<Mutex<_>>` because inference needs
/// exclusive access; the struct itself is cheap to clone and share.
#[derive(Clone)]
pub struct OnnxEmbeddingModel {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    model_name: String,
    dimension: usize,
    normalize: bool,
}

impl std::fmt::Debug for OnnxEmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbeddingModel")
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .field("normalize", &self.normalize)
            .finish_non_exhaustive()
    }
}

impl OnnxEmbeddingModel {
    /// Creates a new ONNX embedding model from disk paths
    ///
    /// # Errors
    /// Returns error if:
    /// - Model or tokenizer file not found or invalid
    /// - ONNX Runtime initialization fails
    /// - `expected_dimension` is set and the model's hidden size differs
    ///
    /// # Example
    /// ```ignore
    /// let model = OnnxEmbeddingModel::new(
    ///     "all-MiniLM-L6-v2",
    ///     "./models/all-MiniLM-L6-v2-onnx/model.onnx",
    ///     "./models/all-MiniLM-L6-v2-onnx/tokenizer.json",
    ///     &OnnxModelOptions::default(),
    ///     Some(384),
    /// ).await?;
    /// ```
    pub async fn new<P: AsRef<Path>>(
        model_name: impl Into<String>,
        model_path: P,
        tokenizer_path: P,
        options: &OnnxModelOptions,
        expected_dimension: Option<usize>,
    ) -> Result<Self> {
        let model_name = model_name.into();
        let model_path = model_path.as_ref();
        let tokenizer_path = tokenizer_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }

        let mut session = match options.device {
            Device::Cpu => cpu_session(model_path, options.intra_threads)?,
            Device::Cuda => {
                info!("   Attempting CUDA execution provider...");
                match cuda_session(model_path, options.intra_threads) {
                    Ok(s) => {
                        info!("✅ CUDA execution provider initialized successfully!");
                        s
                    }
                    Err(e) => {
                        warn!("⚠️  CUDA execution provider failed: {:#}", e);
                        warn!("   Falling back to CPU execution provider");
                        cpu_session(model_path, options.intra_threads)?
                    }
                }
            }
        };

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: options.max_length,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure truncation: {}", e))?;

        // Test inference to learn the hidden size before accepting the model
        let dimension = {
            let (input_ids, attention_mask, token_type_ids) =
                encode_batch(&tokenizer, &["validation test".to_string()])?;

            let outputs = session.run(ort::inputs![
                "input_ids" => Value::from_array(input_ids)?,
                "attention_mask" => Value::from_array(attention_mask)?,
                "token_type_ids" => Value::from_array(token_type_ids)?
            ])?;

            let output_tensor = outputs[0]
                .try_extract_array::<f32>()
                .context("Failed to extract output tensor")?;
            hidden_dimension(output_tensor.shape(), expected_dimension)?
        };

        info!(
            "✅ ONNX embedding model {} loaded ({} dimensions, {:?})",
            model_name, dimension, options.device
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            model_name,
            dimension,
            normalize: options.normalize,
        })
    }

    /// Generates embeddings for multiple texts in one inference call
    ///
    /// Tokenizes all texts, pads to the longest sequence and mean-pools the
    /// token embeddings of each row, ignoring padding via the attention mask.
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let (input_ids, attention_mask, token_type_ids) = encode_batch(&self.tokenizer, texts)?;
        let mask_for_pooling = attention_mask.clone();

        let mut session_guard = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("ONNX session lock poisoned"))?;
        let outputs = session_guard.run(ort::inputs![
            "input_ids" => Value::from_array(input_ids)?,
            "attention_mask" => Value::from_array(attention_mask)?,
            "token_type_ids" => Value::from_array(token_type_ids)?
        ])?;

        let output_array = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        let mut embeddings: Vec<Vec<f32>> = Vec::with_capacity(texts.len());

        for batch_idx in 0..texts.len() {
            let batch_item = output_array.index_axis(Axis(0), batch_idx); // [seq_len, hidden_dim]
            let seq_len = batch_item.shape()[0];
            let hidden_dim = batch_item.shape()[1];
            let item_mask = mask_for_pooling.row(batch_idx);

            let mut pooled = vec![0.0f32; hidden_dim];
            let mut sum_mask = 0.0f32;

            for i in 0..seq_len {
                let mask_value = item_mask[i] as f32;
                sum_mask += mask_value;
                for j in 0..hidden_dim {
                    pooled[j] += batch_item[[i, j]] * mask_value;
                }
            }

            for val in &mut pooled {
                *val /= sum_mask.max(1e-9);
            }

            if self.normalize {
                let norm = pooled.iter().map(|x| x * x).sum::<f32>().sqrt();
                if norm > 0.0 {
                    for val in &mut pooled {
                        *val /= norm;
                    }
                }
            }

            embeddings.push(pooled);
        }

        for (i, emb) in embeddings.iter().enumerate() {
            if emb.len() != self.dimension {
                anyhow::bail!(
                    "Unexpected embedding dimension at index {}: {} (expected {})",
                    i,
                    emb.len(),
                    self.dimension
                );
            }
        }

        Ok(embeddings)
    }

    /// Generates embedding for a single text
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .pop()
            .context("Model returned no embedding for a single input")
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[async_trait]
impl EmbeddingBackend for OnnxEmbeddingModel {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        OnnxEmbeddingModel::embed_batch(self, texts).await
    }
}

/// Hidden size of a token-level `[batch, seq_len, hidden_dim]` output
fn hidden_dimension(shape: &[usize], expected: Option<usize>) -> Result<usize> {
    let dimension = match shape {
        [_, _, hidden] if *hidden > 0 => *hidden,
        _ => bail!(
            "Model outputs unexpected shape {:?} (expected [batch, seq_len, hidden_dim])",
            shape
        ),
    };

    if let Some(expected) = expected {
        if dimension != expected {
            bail!(
                "Model produces {}-dimensional embeddings, configured for {}",
                dimension,
                expected
            );
        }
    }

    Ok(dimension)
}

fn cpu_session(model_path: &Path, intra_threads: usize) -> Result<Session> {
    Session::builder()
        .context("Failed to create session builder")?
        .with_execution_providers([CPUExecutionProvider::default().build()])
        .context("Failed to set CPU execution provider")?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .context("Failed to set optimization level")?
        .with_intra_threads(intra_threads)
        .context("Failed to set intra threads")?
        .commit_from_file(model_path)
        .context(format!(
            "Failed to load ONNX model from {}",
            model_path.display()
        ))
}

fn cuda_session(model_path: &Path, intra_threads: usize) -> Result<Session> {
    Session::builder()
        .context("Failed to create session builder")?
        .with_execution_providers([CUDAExecutionProvider::default().build()])
        .context("Failed to set CUDA execution provider")?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .context("Failed to set optimization level")?
        .with_intra_threads(intra_threads)
        .context("Failed to set intra threads")?
        .commit_from_file(model_path)
        .context("Failed to load ONNX model on CUDA")
}

/// Tokenizes `texts` into zero-padded `[batch, max_len]` tensors:
/// input ids, attention mask and token type ids (all zeros).
fn encode_batch(
    tokenizer: &Tokenizer,
    texts: &[String],
) -> Result<(Array2<i64>, Array2<i64>, Array2<i64>)> {
    let encodings = texts
        .iter()
        .map(|text| {
            tokenizer
                .encode(text.as_str(), true)
                .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))
        })
        .collect::<Result<Vec<_>>>()?;

    let max_len = encodings
        .iter()
        .map(|enc| enc.get_ids().len())
        .max()
        .unwrap_or(0);

    let mut input_ids = Array2::<i64>::zeros((texts.len(), max_len));
    let mut attention_mask = Array2::<i64>::zeros((texts.len(), max_len));
    let token_type_ids = Array2::<i64>::zeros((texts.len(), max_len));

    for (row, encoding) in encodings.iter().enumerate() {
        for (col, (&id, &mask)) in encoding
            .get_ids()
            .iter()
            .zip(encoding.get_attention_mask())
            .enumerate()
        {
            input_ids[[row, col]] = id as i64;
            attention_mask[[row, col]] = mask as i64;
        }
    }

    Ok((input_ids, attention_mask, token_type_ids))
}

/// Loads ONNX sentence-transformer exports by model identifier
///
/// Looks for `<models_dir>/<name>-onnx/{model.onnx,tokenizer.json}` first.
/// When those are missing and downloads are allowed, fetches
/// `onnx/model.onnx` and `tokenizer.json` from the HuggingFace hub into
/// `<models_dir>/hub`.
///
/// Each model reports the hidden size it actually produces. Only models
/// registered with [`OnnxModelLoader::with_dimension`] are held to a size.
#[derive(Debug, Clone)]
pub struct OnnxModelLoader {
    models_dir: PathBuf,
    allow_download: bool,
    options: OnnxModelOptions,
    dimensions: HashMap<String, usize>,
}

impl OnnxModelLoader {
    pub fn new(models_dir: impl Into<PathBuf>, allow_download: bool, options: OnnxModelOptions) -> Self {
        Self {
            models_dir: models_dir.into(),
            allow_download,
            options,
            dimensions: HashMap::new(),
        }
    }

    /// Requires `model_id` to produce `dimension`-long vectors
    pub fn with_dimension(mut self, model_id: &str, dimension: usize) -> Self {
        self.dimensions.insert(canonical_model_id(model_id), dimension);
        self
    }

    pub fn expected_dimension(&self, model_id: &str) -> Option<usize> {
        self.dimensions.get(&canonical_model_id(model_id)).copied()
    }

    /// Local model and tokenizer paths for `model_id`, whether or not they exist
    pub fn local_paths(&self, model_id: &str) -> (PathBuf, PathBuf) {
        let dir = self.models_dir.join(local_model_dir(model_id));
        (dir.join(MODEL_FILE), dir.join(TOKENIZER_FILE))
    }

    async fn fetch_from_hub(&self, model_id: &str) -> Result<(PathBuf, PathBuf)> {
        let repo_id = hub_repo_id(model_id);
        let cache_dir = self.models_dir.join("hub");
        info!("Downloading {} from the HuggingFace hub", repo_id);

        tokio::task::spawn_blocking(move || -> Result<(PathBuf, PathBuf)> {
            let api = hf_hub::api::sync::ApiBuilder::new()
                .with_cache_dir(cache_dir)
                .with_progress(false)
                .build()
                .context("Failed to initialise HuggingFace hub client")?;
            let repo = api.model(repo_id.clone());

            let model_path = repo
                .get(HUB_MODEL_FILE)
                .context(format!("Failed to download {} from {}", HUB_MODEL_FILE, repo_id))?;
            let tokenizer_path = repo
                .get(TOKENIZER_FILE)
                .context(format!("Failed to download {} from {}", TOKENIZER_FILE, repo_id))?;

            Ok((model_path, tokenizer_path))
        })
        .await
        .context("Model download task panicked")?
    }
}

#[async_trait]
impl ModelLoader for OnnxModelLoader {
    async fn load(&self, model_id: &str) -> Result<ModelHandle> {
        let (mut model_path, mut tokenizer_path) = self.local_paths(model_id);

        if !model_path.exists() || !tokenizer_path.exists() {
            if !self.allow_download {
                anyhow::bail!(
                    "ONNX files for {} not found under {} and downloads are disabled",
                    model_id,
                    self.models_dir.display()
                );
            }
            (model_path, tokenizer_path) = self.fetch_from_hub(model_id).await?;
        }

        let model = OnnxEmbeddingModel::new(
            model_id,
            &model_path,
            &tokenizer_path,
            &self.options,
            self.expected_dimension(model_id),
        )
        .await?;
        Ok(Arc::new(model))
    }
}
