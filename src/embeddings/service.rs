// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding façade
//!
//! Generates embeddings, compares vectors and ranks documents against a
//! query. Model loading is delegated to the injected [`ModelCache`].

use crate::embeddings::{
    canonical_model_id, cosine_similarity, EmbeddingBackend, EmbeddingError, ModelCache,
    ModelHandle,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Vectors produced for one `embed` call
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingBatch {
    /// Model that produced the vectors; differs from the requested one after a fallback
    pub model: String,
    pub vectors: Vec<Vec<f32>>,
}

/// One document scored against a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// Position of the document in the request
    pub index: usize,
    pub content: String,
    pub similarity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub model: String,
    /// Sorted by descending similarity, ties in request order
    pub results: Vec<RankedResult>,
}

#[derive(Debug, Clone)]
pub struct EmbeddingService {
    cache: Arc<ModelCache>,
    default_model: String,
}

impl EmbeddingService {
    pub fn new(cache: Arc<ModelCache>, default_model: impl AsRef<str>) -> Self {
        Self {
            cache,
            default_model: canonical_model_id(default_model.as_ref()),
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub async fn loaded_models(&self) -> Vec<String> {
        self.cache.loaded_models().await
    }

    /// Loads `model_id` (or the default) ahead of the first request
    pub async fn preload(&self, model_id: Option<&str>) -> Result<String, EmbeddingError> {
        let model = self.resolve_model(model_id).await?;
        Ok(model.model_name().to_string())
    }

    /// Generates one embedding per text
    ///
    /// An empty `texts` returns an empty batch without loading anything.
    ///
    /// # Errors
    /// - `ModelLoad` when neither the requested nor the default model loads
    /// - `Encoding` when inference fails or returns malformed output
    pub async fn embed(
        &self,
        texts: &[String],
        model_id: Option<&str>,
    ) -> Result<EmbeddingBatch, EmbeddingError> {
        if texts.is_empty() {
            return Ok(EmbeddingBatch {
                model: self.requested_model(model_id),
                vectors: Vec::new(),
            });
        }

        let model = self.resolve_model(model_id).await?;
        let vectors = Self::encode(&model, texts).await?;

        Ok(EmbeddingBatch {
            model: model.model_name().to_string(),
            vectors,
        })
    }

    /// Cosine similarity between two vectors; see [`cosine_similarity`]
    pub fn similarity(&self, a: &[f32], b: &[f32]) -> Result<f32, EmbeddingError> {
        cosine_similarity(a, b)
    }

    /// Ranks `documents` by similarity to `query`
    ///
    /// The query and documents are embedded in one batch on the same model.
    /// An empty `documents` returns an empty ranking without loading anything.
    pub async fn rank_by_relevance(
        &self,
        query: &str,
        documents: &[String],
        model_id: Option<&str>,
    ) -> Result<Ranking, EmbeddingError> {
        if documents.is_empty() {
            return Ok(Ranking {
                model: self.requested_model(model_id),
                results: Vec::new(),
            });
        }

        let model = self.resolve_model(model_id).await?;

        let mut batch = Vec::with_capacity(documents.len() + 1);
        batch.push(query.to_string());
        batch.extend(documents.iter().cloned());

        let vectors = Self::encode(&model, &batch).await?;
        let (query_vector, document_vectors) = vectors
            .split_first()
            .ok_or_else(|| EmbeddingError::encoding(model.model_name(), "empty model output"))?;

        let mut results = documents
            .iter()
            .zip(document_vectors)
            .enumerate()
            .map(|(index, (content, vector))| {
                Ok(RankedResult {
                    index,
                    content: content.clone(),
                    similarity: cosine_similarity(query_vector, vector)?,
                })
            })
            .collect::<Result<Vec<_>, EmbeddingError>>()?;

        // Stable: equal scores keep request order
        results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

        debug!(
            "Ranked {} documents with {}",
            results.len(),
            model.model_name()
        );

        Ok(Ranking {
            model: model.model_name().to_string(),
            results,
        })
    }

    fn requested_model(&self, model_id: Option<&str>) -> String {
        model_id
            .map(canonical_model_id)
            .unwrap_or_else(|| self.default_model.clone())
    }

    /// Requested model, or one attempt at the default if that fails to load
    async fn resolve_model(&self, model_id: Option<&str>) -> Result<ModelHandle, EmbeddingError> {
        let requested = self.requested_model(model_id);

        match self.cache.get_or_load(&requested).await {
            Ok(model) => Ok(model),
            Err(e) if requested != self.default_model => {
                warn!(
                    "Model {} unavailable ({}), falling back to default model: {}",
                    requested, e, self.default_model
                );
                self.cache.get_or_load(&self.default_model).await
            }
            Err(e) => Err(e),
        }
    }

    async fn encode(model: &ModelHandle, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        info!(
            "Generating embeddings for {} texts using {}",
            texts.len(),
            model.model_name()
        );

        let vectors = model
            .embed_batch(texts)
            .await
            .map_err(|e| EmbeddingError::encoding(model.model_name(), e))?;

        if vectors.len() != texts.len() {
            return Err(EmbeddingError::encoding(
                model.model_name(),
                format!("expected {} vectors, got {}", texts.len(), vectors.len()),
            ));
        }

        if let Some(bad) = vectors.iter().find(|v| v.len() != model.dimension()) {
            return Err(EmbeddingError::encoding(
                model.model_name(),
                format!(
                    "vector has {} dimensions, model declares {}",
                    bad.len(),
                    model.dimension()
                ),
            ));
        }

        Ok(vectors)
    }
}
