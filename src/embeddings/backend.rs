// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Seams between the embedding façade and concrete model runtimes.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A loaded embedding model.
///
/// Implementations must be safe to share between concurrent requests once
/// loaded; every vector returned by one instance has `dimension()` entries.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Identifier the model was loaded under
    fn model_name(&self) -> &str;

    /// Length of every vector this model produces
    fn dimension(&self) -> usize;

    /// Embeds each text, returning one vector per input in input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Shared handle to a loaded model.
pub type ModelHandle = Arc<dyn EmbeddingBackend>;

/// Materializes models by identifier. Loading is expected to be slow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelLoader: Send + Sync {
    async fn load(&self, model_id: &str) -> Result<ModelHandle>;
}
