// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use thiserror::Error;

/// Failures surfaced by the embedding façade.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EmbeddingError {
    /// The backend could not materialize the requested model.
    #[error("Failed to load embedding model '{model}': {reason}")]
    ModelLoad { model: String, reason: String },

    /// Inference failed on an otherwise valid request. Never retried.
    #[error("Failed to generate embeddings with '{model}': {reason}")]
    Encoding { model: String, reason: String },

    #[error("Embedding dimensions do not match: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}

impl EmbeddingError {
    pub fn model_load(model: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        EmbeddingError::ModelLoad {
            model: model.into(),
            reason: format!("{:#}", reason),
        }
    }

    pub fn encoding(model: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        EmbeddingError::Encoding {
            model: model.into(),
            reason: format!("{:#}", reason),
        }
    }
}
