// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::embeddings::EmbeddingBatch;
use serde::{Deserialize, Serialize};

/// Response body for POST /embeddings
///
/// ```json
/// {
///   "embeddings": [[0.1, 0.2, ...], [0.3, 0.4, ...]],
///   "model": "all-MiniLM-L6-v2"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedResponse {
    /// One vector per input text, in request order
    pub embeddings: Vec<Vec<f32>>,

    /// Model that produced the vectors
    pub model: String,
}

impl From<EmbeddingBatch> for EmbedResponse {
    fn from(batch: EmbeddingBatch) -> Self {
        Self {
            embeddings: batch.vectors,
            model: batch.model,
        }
    }
}
