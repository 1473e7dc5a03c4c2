// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Deterministic hash-based embeddings
//!
//! Produces stable pseudo-random vectors from a hash of the input text. Used
//! when `EMBEDDING_BACKEND=hash` to run the service without model files, and
//! throughout the test suite. Identical texts always map to identical vectors,
//! so self-similarity is exactly 1.0; unrelated texts are close to orthogonal.

use crate::embeddings::{EmbeddingBackend, ModelHandle, ModelLoader};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct HashEmbeddingBackend {
    model_name: String,
    dimension: usize,
    normalize: bool,
}

impl HashEmbeddingBackend {
    pub fn new(model_name: impl Into<String>, dimension: usize, normalize: bool) -> Result<Self> {
        if dimension == 0 {
            return Err(anyhow!("Embedding dimension must be greater than 0"));
        }

        Ok(Self {
            model_name: model_name.into(),
            dimension,
            normalize,
        })
    }

    pub fn generate(&self, text: &str) -> Vec<f32> {
        let mut hasher = DefaultHasher::new();
        self.model_name.hash(&mut hasher);
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.dimension);

        // Linear congruential generator seeded by the text hash
        let mut current_seed = seed;
        for i in 0..self.dimension {
            current_seed =
                (current_seed.wrapping_mul(1664525).wrapping_add(1013904223)) ^ (i as u64);

            // Map to [-1, 1]
            let value = (current_seed as f64 / u64::MAX as f64) * 2.0 - 1.0;
            embedding.push(value as f32);
        }

        if self.normalize {
            let norm = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm > 0.0 {
                for value in &mut embedding {
                    *value /= norm;
                }
            }
        }

        embedding
    }
}

#[async_trait]
impl EmbeddingBackend for HashEmbeddingBackend {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.generate(text)).collect())
    }
}

/// Loader that accepts any identifier except those listed as unavailable.
#[derive(Debug, Clone)]
pub struct HashModelLoader {
    dimension: usize,
    unavailable: Vec<String>,
}

impl HashModelLoader {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            unavailable: Vec::new(),
        }
    }

    /// Makes `load` fail for `model_id`, simulating a model that cannot be fetched.
    pub fn with_unavailable(mut self, model_id: impl Into<String>) -> Self {
        self.unavailable.push(model_id.into());
        self
    }
}

#[async_trait]
impl ModelLoader for HashModelLoader {
    async fn load(&self, model_id: &str) -> Result<ModelHandle> {
        if self.unavailable.iter().any(|m| m == model_id) {
            anyhow::bail!("Model {} is not available", model_id);
        }

        let backend = HashEmbeddingBackend::new(model_id, self.dimension, true)?;
        Ok(Arc::new(backend))
    }
}
