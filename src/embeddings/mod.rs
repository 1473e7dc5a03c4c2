// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding generation, model lifecycle and similarity scoring.

pub mod backend;
pub mod error;
pub mod hash_model;
pub mod model_cache;
pub mod onnx_model;
pub mod service;
pub mod similarity;

pub use backend::{EmbeddingBackend, ModelHandle, ModelLoader};
pub use error::EmbeddingError;
pub use hash_model::{HashEmbeddingBackend, HashModelLoader};
pub use model_cache::ModelCache;
pub use onnx_model::{OnnxEmbeddingModel, OnnxModelLoader, OnnxModelOptions};
pub use service::{EmbeddingBatch, EmbeddingService, RankedResult, Ranking};
pub use similarity::cosine_similarity;

/// Model used when a request names none, and the single fallback target
pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";

/// Output size of all-MiniLM-L6-v2
pub const DEFAULT_DIMENSION: usize = 384;

const SENTENCE_TRANSFORMERS_OWNER: &str = "sentence-transformers/";

/// Cache key for a model identifier.
///
/// `sentence-transformers/all-MiniLM-L6-v2` and `all-MiniLM-L6-v2` name the
/// same model; other owners keep their full hub id.
pub fn canonical_model_id(model_id: &str) -> String {
    let trimmed = model_id.trim();
    trimmed
        .strip_prefix(SENTENCE_TRANSFORMERS_OWNER)
        .unwrap_or(trimmed)
        .to_string()
}

/// HuggingFace hub repository for a model identifier
pub fn hub_repo_id(model_id: &str) -> String {
    let id = canonical_model_id(model_id);
    if id.contains('/') {
        id
    } else {
        format!("{}{}", SENTENCE_TRANSFORMERS_OWNER, id)
    }
}

/// Directory name under `MODELS_DIR` holding a model's ONNX export
pub fn local_model_dir(model_id: &str) -> String {
    let id = canonical_model_id(model_id);
    let name = id.rsplit('/').next().unwrap_or(id.as_str());
    format!("{}-onnx", name)
}
